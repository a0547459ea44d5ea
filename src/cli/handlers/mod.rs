mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::model::config::{Config, StoreConfig};
use crate::model::task::TaskFields;
use crate::model::view::TaskView;
use crate::ops::deadline::is_deadline_near;
use crate::ops::store::{StoreError, TaskStore};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        command,
        json,
        config,
        file,
        no_color,
    } = cli;
    let open = || open_store(config.as_deref(), file.as_deref(), json, no_color);

    match command {
        // Init runs before any config is loaded
        Some(Commands::Init(args)) => cmd_init(args),
        None => {
            let (mut store, color) = open()?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            crate::cli::menu::run(&mut store, stdin.lock(), stdout.lock(), color)?;
            Ok(())
        }
        Some(Commands::Add(args)) => cmd_add(&mut open()?.0, args, json),
        Some(Commands::List(args)) => {
            let (mut store, color) = open()?;
            cmd_list(&mut store, args, json, color)
        }
        Some(Commands::Show(args)) => cmd_show(&mut open()?.0, args, json),
        Some(Commands::Edit(args)) => cmd_edit(&mut open()?.0, args, json),
        Some(Commands::Delete(args)) => cmd_delete(&mut open()?.0, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve config and flags into a store plus the color setting.
fn open_store(
    config_path: Option<&str>,
    file: Option<&str>,
    json: bool,
    no_color: bool,
) -> Result<(TaskStore, bool), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = resolve_config(&cwd, config_path.map(Path::new), file)?;
    let color = config.display.color && !no_color && !json;
    Ok((TaskStore::new(config.store), color))
}

/// Load the config file, then apply a `--file` override (relative to `cwd`).
pub fn resolve_config(
    cwd: &Path,
    config_path: Option<&Path>,
    file: Option<&str>,
) -> Result<Config, config_io::ConfigError> {
    let mut config = config_io::load_config(cwd, config_path)?;
    if let Some(file) = file {
        config.store = StoreConfig::new(PathBuf::from(file)).resolved_against(cwd);
    }
    Ok(config)
}

/// Print load diagnostics for malformed lines to stderr
fn report_malformed(store: &TaskStore) {
    for d in store.diagnostics() {
        if let crate::ops::store::Diagnostic::Malformed { .. } = d {
            eprintln!("warning: {}", d);
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(store: &mut TaskStore, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let fields = TaskFields {
        id: args.id,
        category: args.category,
        title: args.title,
        description: args.description,
        deadline: args.deadline,
        priority: args.priority,
        status: args.status,
        label: args.label,
    };
    let task = store.create_task(fields)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&TaskView::from(&task))?);
    } else {
        println!("Task created successfully! (ID {})", task.id());
    }
    Ok(())
}

fn cmd_list(
    store: &mut TaskStore,
    args: ListArgs,
    json: bool,
    color: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = args.by.into();
    let tasks = match store.list_sorted(key) {
        Ok(tasks) => tasks,
        Err(StoreError::Empty) if json => Vec::new(),
        Err(StoreError::Empty) => {
            report_malformed(store);
            println!("No tasks present in the file!");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    report_malformed(store);

    let views: Vec<TaskView> = tasks.iter().map(TaskView::from).collect();
    if json {
        let out = TaskListJson {
            sort: key,
            tasks: &views,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_task_listing(key, &views, &Local::now(), color) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(store: &mut TaskStore, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    store.load_all();
    report_malformed(store);
    let task = store.find_by_id(args.id)?;
    let view = TaskView::from(task);

    if json {
        let out = TaskDetailJson {
            task: &view,
            deadline_near: is_deadline_near(&view.deadline, Local::now()),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_task_detail(&view) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_edit(store: &mut TaskStore, args: EditArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let task = store.edit_task(args.id, &args.priority, &args.status)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&TaskView::from(&task))?);
    } else {
        println!(
            "Task {} edited: {} / {}",
            task.id(),
            task.priority(),
            task.status()
        );
    }
    Ok(())
}

fn cmd_delete(store: &mut TaskStore, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = store.delete_task(args.id)?;
    println!("Task with ID {} has been deleted.", id);
    Ok(())
}
