use std::cmp::Ordering;

use serde::Serialize;

use crate::model::task::Task;

/// Ordering used when listing tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Earliest deadline first
    #[default]
    Date,
    /// High, then Medium, then Low
    Priority,
    /// Category text, ascending, case-sensitive
    Category,
}

impl SortKey {
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Date => by_deadline(a, b),
            SortKey::Priority => by_priority(a, b),
            SortKey::Category => by_category(a, b),
        }
    }
}

/// Chronological by deadline date
pub fn by_deadline(a: &Task, b: &Task) -> Ordering {
    a.deadline().cmp(&b.deadline())
}

/// Descending priority rank
pub fn by_priority(a: &Task, b: &Task) -> Ordering {
    b.priority().rank().cmp(&a.priority().rank())
}

/// Byte-wise category order
pub fn by_category(a: &Task, b: &Task) -> Ordering {
    a.category().cmp(b.category())
}

/// Sort tasks in place by `key`. Stable: ties keep file order.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    tasks.sort_by(|a, b| key.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskFields;
    use pretty_assertions::assert_eq;

    fn task(id: u32, category: &str, deadline: &str, priority: &str) -> Task {
        Task::from_fields(TaskFields {
            id: id.to_string(),
            category: category.into(),
            title: format!("task {id}"),
            description: String::new(),
            deadline: deadline.into(),
            priority: priority.into(),
            status: "pending".into(),
            label: String::new(),
        })
        .unwrap()
    }

    fn ids(tasks: &[Task]) -> Vec<u32> {
        tasks.iter().map(Task::id).collect()
    }

    #[test]
    fn test_priority_descending() {
        let mut tasks = vec![
            task(1, "a", "01/01/2027", "Low"),
            task(2, "a", "01/01/2027", "High"),
            task(3, "a", "01/01/2027", "Medium"),
        ];
        sort_tasks(&mut tasks, SortKey::Priority);
        let priorities: Vec<_> = tasks.iter().map(|t| t.priority().as_str()).collect();
        assert_eq!(priorities, vec!["High", "Medium", "Low"]);
    }

    #[test]
    fn test_category_ascending_case_sensitive() {
        let mut tasks = vec![
            task(1, "Work", "01/01/2027", "Low"),
            task(2, "Home", "01/01/2027", "Low"),
            task(3, "Art", "01/01/2027", "Low"),
            task(4, "art", "01/01/2027", "Low"),
        ];
        sort_tasks(&mut tasks, SortKey::Category);
        let cats: Vec<_> = tasks.iter().map(|t| t.category().to_string()).collect();
        assert_eq!(cats, vec!["Art", "Home", "Work", "art"]);
    }

    #[test]
    fn test_deadline_is_chronological_across_months_and_years() {
        // As text, "02/01/2026" < "15/12/2025"; as dates it is later.
        let mut tasks = vec![
            task(1, "a", "02/01/2026", "Low"),
            task(2, "a", "15/12/2025", "Low"),
            task(3, "a", "01/03/2025", "Low"),
        ];
        sort_tasks(&mut tasks, SortKey::Date);
        assert_eq!(ids(&tasks), vec![3, 2, 1]);
    }

    #[test]
    fn test_ties_keep_file_order() {
        let mut tasks = vec![
            task(5, "a", "01/01/2027", "High"),
            task(2, "b", "01/01/2027", "High"),
            task(9, "c", "01/01/2027", "Low"),
        ];
        sort_tasks(&mut tasks, SortKey::Priority);
        assert_eq!(ids(&tasks), vec![5, 2, 9]);
    }
}
