use crate::model::task::{DELIMITER, Task};

/// Serialize a task to one record line (no trailing newline).
///
/// Field order: `id, category, title, description, deadline, priority,
/// status, label`.
pub fn serialize_record(task: &Task) -> String {
    let id = task.id().to_string();
    let deadline = task.deadline_text();
    let fields: [&str; 8] = [
        &id,
        task.category(),
        task.title(),
        task.description(),
        &deadline,
        task.priority().as_str(),
        task.status().as_str(),
        task.label(),
    ];
    fields.join(DELIMITER.to_string().as_str())
}

/// Serialize lines into file contents, one per line, newline-terminated.
/// Lines are raw bytes so untouched records are written back unchanged.
pub fn serialize_lines<S: AsRef<[u8]>>(lines: &[S]) -> Vec<u8> {
    let mut out = Vec::new();
    for line in lines {
        out.extend_from_slice(line.as_ref());
        out.push(b'\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, Status, parse_deadline};

    #[test]
    fn test_serialize_field_order() {
        let task = Task::new(
            12,
            "Home".into(),
            "Fix tap".into(),
            "Kitchen sink drips".into(),
            parse_deadline("02/11/2026").unwrap(),
            Priority::Medium,
            Status::InProgress,
            "chores".into(),
        )
        .unwrap();
        assert_eq!(
            serialize_record(&task),
            "12,Home,Fix tap,Kitchen sink drips,02/11/2026,Medium,In Progress,chores"
        );
    }

    #[test]
    fn test_empty_trailing_label_keeps_eight_fields() {
        let task = Task::new(
            1,
            "Work".into(),
            "Call".into(),
            String::new(),
            parse_deadline("01/01/2027").unwrap(),
            Priority::Low,
            Status::Pending,
            String::new(),
        )
        .unwrap();
        let line = serialize_record(&task);
        assert_eq!(line, "1,Work,Call,,01/01/2027,Low,Pending,");
        assert_eq!(line.split(DELIMITER).count(), 8);
    }

    #[test]
    fn test_serialize_lines_terminates_each_line() {
        assert_eq!(serialize_lines(&["a", "b"]), b"a\nb\n");
        assert!(serialize_lines::<&str>(&[]).is_empty());
        let raw: [&[u8]; 2] = [b"Caf\xe9", b"x"];
        assert_eq!(serialize_lines(&raw), b"Caf\xe9\nx\n");
    }
}
