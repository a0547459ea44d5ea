//! Interactive numbered menu, used when `pt` runs without a subcommand.
//!
//! Reads choices line by line from any `BufRead` and writes prompts and
//! results to any `Write`, so the loop can be driven from tests. Store
//! errors are printed and the loop carries on; end of input exits.

use std::io::{self, BufRead, Write};

use chrono::Local;

use crate::cli::output::{format_task_detail, highlight_for, paint};
use crate::model::task::{
    Priority, Status, TaskFields, ValidationError, check_text, parse_deadline, parse_id,
};
use crate::model::view::TaskView;
use crate::ops::sort::SortKey;
use crate::ops::store::{StoreError, TaskStore};

const MAIN_MENU: &str = "\
Main Menu:
1. Create Task
2. View Tasks
3. Edit Task
4. Delete Task
5. Exit Program

Enter your choice (1-5): ";

const VIEW_MENU: &str = "\
View Options:
1. View by Date
2. View by Priority
3. View by Category
Enter your choice (1-3): ";

/// Run the menu loop until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: R,
    output: W,
    color: bool,
) -> io::Result<()> {
    let mut menu = Menu {
        input,
        out: output,
        color,
    };
    writeln!(menu.out, "Welcome To The Task Management System")?;
    writeln!(menu.out)?;

    loop {
        let Some(choice) = menu.prompt(MAIN_MENU)? else {
            return Ok(());
        };
        writeln!(menu.out)?;
        match choice.parse::<u8>() {
            Ok(1) => menu.create(store)?,
            Ok(2) => menu.view(store)?,
            Ok(3) => menu.edit(store)?,
            Ok(4) => menu.delete(store)?,
            Ok(5) => {
                writeln!(menu.out, "Thank you for using our system! Have a nice day.")?;
                return Ok(());
            }
            _ => writeln!(
                menu.out,
                "Invalid choice. Please enter a number between 1 and 5."
            )?,
        }
        writeln!(menu.out)?;
    }
}

struct Menu<R, W> {
    input: R,
    out: W,
    color: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Print `text` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until `check` accepts the answer.
    fn prompt_valid<T>(
        &mut self,
        text: &str,
        check: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<Option<(String, T)>> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match check(&answer) {
                Ok(value) => return Ok(Some((answer, value))),
                Err(e) => writeln!(self.out, "Invalid input! {}", e)?,
            }
        }
    }

    fn prompt_text(&mut self, text: &str, field: &'static str) -> io::Result<Option<String>> {
        Ok(self
            .prompt_valid(text, |s| check_text(field, s))?
            .map(|(answer, ())| answer))
    }

    fn prompt_id(&mut self, text: &str) -> io::Result<Option<u32>> {
        let Some(answer) = self.prompt(text)? else {
            return Ok(None);
        };
        match parse_id(&answer) {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.out, "Invalid task ID. Please enter a positive integer.")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: &StoreError) -> io::Result<()> {
        match err {
            StoreError::Empty => writeln!(self.out, "No tasks present in the file!"),
            other => writeln!(self.out, "Error: {}", other),
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    fn create(&mut self, store: &mut TaskStore) -> io::Result<()> {
        let Some(fields) = self.collect_fields()? else {
            return Ok(());
        };
        match store.create_task(fields) {
            Ok(_) => writeln!(self.out, "Task created successfully!"),
            Err(StoreError::DuplicateId(_)) => writeln!(
                self.out,
                "Task with the same ID already exists! Please choose a different ID."
            ),
            Err(e) => self.report(&e),
        }
    }

    fn collect_fields(&mut self) -> io::Result<Option<TaskFields>> {
        let mut fields = TaskFields::default();
        let Some(category) =
            self.prompt_text("Enter the Task Category (Personal, Work, etc.): ", "category")?
        else {
            return Ok(None);
        };
        fields.category = category;
        let Some(label) = self.prompt_text("Add a Label: ", "label")? else {
            return Ok(None);
        };
        fields.label = label;
        writeln!(self.out)?;
        let Some((id, _)) = self.prompt_valid("Enter the Task ID: ", parse_id)? else {
            return Ok(None);
        };
        fields.id = id;
        let Some(title) = self.prompt_text("Enter Title: ", "title")? else {
            return Ok(None);
        };
        fields.title = title;
        let Some(description) = self.prompt_text("Enter Description: ", "description")? else {
            return Ok(None);
        };
        fields.description = description;
        let Some((deadline, _)) =
            self.prompt_valid("Enter Deadline (DD/MM/YYYY): ", parse_deadline)?
        else {
            return Ok(None);
        };
        fields.deadline = deadline;
        let Some((priority, _)) = self.prompt_valid(
            "Enter the Task Priority (Low, Medium, High): ",
            Priority::parse,
        )?
        else {
            return Ok(None);
        };
        fields.priority = priority;
        let Some((status, _)) = self.prompt_valid(
            "Enter the Task Status (Pending, In Progress, Completed): ",
            Status::parse,
        )?
        else {
            return Ok(None);
        };
        fields.status = status;
        Ok(Some(fields))
    }

    fn view(&mut self, store: &mut TaskStore) -> io::Result<()> {
        let Some(choice) = self.prompt(VIEW_MENU)? else {
            return Ok(());
        };
        let key = match choice.parse::<u8>() {
            Ok(1) => SortKey::Date,
            Ok(2) => SortKey::Priority,
            Ok(3) => SortKey::Category,
            _ => {
                return writeln!(
                    self.out,
                    "Invalid view option. Please enter a number between 1 and 3."
                );
            }
        };
        writeln!(self.out)?;

        let tasks = match store.list_sorted(key) {
            Ok(tasks) => tasks,
            Err(e) => return self.report(&e),
        };
        let now = Local::now();
        for task in &tasks {
            let view = TaskView::from(task);
            let highlight = highlight_for(&view, &now);
            for line in format_task_detail(&view) {
                writeln!(self.out, "{}", paint(&line, highlight, self.color))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn edit(&mut self, store: &mut TaskStore) -> io::Result<()> {
        let Some(id) = self.prompt_id("Enter the task ID you want to update: ")? else {
            return Ok(());
        };
        store.load_all();
        if let Err(e) = store.find_by_id(id) {
            return self.report(&e);
        }
        let Some(priority) = self.prompt("Enter the new Priority (Low, Medium, High): ")? else {
            return Ok(());
        };
        let Some(status) =
            self.prompt("Enter the new Status (Pending, In Progress, Completed): ")?
        else {
            return Ok(());
        };
        match store.edit_task(id, &priority, &status) {
            Ok(_) => writeln!(self.out, "Task edited successfully."),
            Err(e) => self.report(&e),
        }
    }

    fn delete(&mut self, store: &mut TaskStore) -> io::Result<()> {
        let Some(id) = self.prompt_id("Enter the task ID you want to delete: ")? else {
            return Ok(());
        };
        match store.delete_task(id) {
            Ok(id) => writeln!(self.out, "Task with ID {} has been deleted.", id),
            Err(e) => self.report(&e),
        }
    }
}
