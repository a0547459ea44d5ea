use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::ops::sort::SortKey;

#[derive(Parser)]
#[command(name = "pt", about = concat!("plaintask v", env!("CARGO_PKG_VERSION"), " - tasks in one plain-text file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./plaintask.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<String>,

    /// Backing file, overriding the configured path
    #[arg(short = 'f', long, global = true)]
    pub file: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a plaintask.toml and an empty task file in the current directory
    Init(InitArgs),
    /// Create a task
    Add(AddArgs),
    /// List tasks, sorted
    List(ListArgs),
    /// Show task details
    Show(ShowArgs),
    /// Change a task's priority and status
    Edit(EditArgs),
    /// Delete a task
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing plaintask.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task ID (positive integer, unique)
    #[arg(long)]
    pub id: String,
    /// Category (Personal, Work, ...)
    #[arg(long)]
    pub category: String,
    /// Task title
    #[arg(long)]
    pub title: String,
    /// Longer description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Deadline as DD/MM/YYYY
    #[arg(long)]
    pub deadline: String,
    /// Low, Medium or High
    #[arg(long)]
    pub priority: String,
    /// Pending, "In Progress" or Completed
    #[arg(long, default_value = "Pending")]
    pub status: String,
    /// Free-form label
    #[arg(long, default_value = "")]
    pub label: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Sort order
    #[arg(long, value_enum, default_value_t = SortArg::Date)]
    pub by: SortArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Date,
    Priority,
    Category,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Priority => SortKey::Priority,
            SortArg::Category => SortKey::Category,
        }
    }
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID to show
    pub id: u32,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID to edit
    pub id: u32,
    /// New priority (Low, Medium, High)
    pub priority: String,
    /// New status (Pending, "In Progress", Completed)
    pub status: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID to delete
    pub id: u32,
}
