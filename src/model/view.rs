use serde::Serialize;

use super::task::Task;

/// Display-ready snapshot of a task: every field as text, with priority
/// and status in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub deadline: String,
    pub priority: String,
    pub status: String,
    pub label: String,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        TaskView {
            id: task.id().to_string(),
            category: task.category().to_string(),
            title: task.title().to_string(),
            description: task.description().to_string(),
            deadline: task.deadline_text(),
            priority: task.priority().as_str().to_string(),
            status: task.status().as_str().to_string(),
            label: task.label().to_string(),
        }
    }
}
