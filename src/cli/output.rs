use chrono::{DateTime, TimeZone};
use crossterm::style::Stylize;
use serde::Serialize;

use crate::model::task::{Priority, Status};
use crate::model::view::TaskView;
use crate::ops::deadline::is_near;
use crate::ops::sort::SortKey;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub sort: SortKey,
    pub tasks: &'a [TaskView],
}

#[derive(Serialize)]
pub struct TaskDetailJson<'a> {
    #[serde(flatten)]
    pub task: &'a TaskView,
    pub deadline_near: bool,
}

// ---------------------------------------------------------------------------
// Highlighting
// ---------------------------------------------------------------------------

/// Color a task is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Plain,
    /// Needs attention: deadline near, or high priority and not done
    Red,
    /// Completed
    Green,
}

/// Pick the highlight for a task. A near deadline wins over everything
/// except completion; otherwise completion, then high priority.
pub fn highlight_for<Tz: TimeZone>(task: &TaskView, now: &DateTime<Tz>) -> Highlight {
    let completed = Status::parse(&task.status).is_ok_and(Status::is_completed);
    let high = Priority::parse(&task.priority) == Ok(Priority::High);
    let near = is_near(&task.deadline, now);

    match (near, completed, high) {
        (_, true, _) => Highlight::Green,
        (true, false, _) => Highlight::Red,
        (false, false, true) => Highlight::Red,
        (false, false, false) => Highlight::Plain,
    }
}

/// Apply a highlight to one line. With `color` off the line is unchanged.
pub fn paint(line: &str, highlight: Highlight, color: bool) -> String {
    if !color {
        return line.to_string();
    }
    match highlight {
        Highlight::Plain => line.to_string(),
        Highlight::Red => line.red().bold().to_string(),
        Highlight::Green => line.green().bold().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(task: &TaskView) -> String {
    let label = if task.label.is_empty() {
        String::new()
    } else {
        format!(" [{}]", task.label)
    };
    format!(
        "{:>4}  {}  {:<6}  {:<11}  {}: {}{}",
        task.id, task.deadline, task.priority, task.status, task.category, task.title, label
    )
}

/// Format detailed task view
pub fn format_task_detail(task: &TaskView) -> Vec<String> {
    vec![
        format!("Category: {}", task.category),
        format!("Label: {}", task.label),
        String::new(),
        format!("Task ID: {}", task.id),
        format!("Title: {}", task.title),
        format!("Description: {}", task.description),
        format!("Deadline: {}", task.deadline),
        format!("Priority: {}", task.priority),
        format!("Status: {}", task.status),
    ]
}

/// Format a sorted listing: a header, then one line per task
pub fn format_task_listing<Tz: TimeZone>(
    key: SortKey,
    tasks: &[TaskView],
    now: &DateTime<Tz>,
    color: bool,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    let by = match key {
        SortKey::Date => "date",
        SortKey::Priority => "priority",
        SortKey::Category => "category",
    };
    lines.push(format!("== {} tasks by {} ==", tasks.len(), by));
    for task in tasks {
        lines.push(paint(&format_task_line(task), highlight_for(task, now), color));
    }
    lines
}
