use std::fmt;

use chrono::NaiveDate;

/// The record delimiter. Free-text fields may not contain it.
pub const DELIMITER: char = ',';

/// Deadline text format (day first)
pub const DEADLINE_FORMAT: &str = "%d/%m/%Y";

/// Error type for field-level task validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("task ID must be a positive integer, got {0:?}")]
    InvalidId(String),
    #[error("invalid priority {0:?}: must be 'Low', 'Medium', or 'High'")]
    InvalidPriority(String),
    #[error("invalid status {0:?}: must be 'Pending', 'In Progress', or 'Completed'")]
    InvalidStatus(String),
    #[error("invalid deadline {0:?}: expected a real date in DD/MM/YYYY format")]
    InvalidDeadline(String),
    #[error("{field} may not contain a comma or a line break")]
    ForbiddenCharacter { field: &'static str },
}

/// Task priority, ordered Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Canonical on-disk / display form
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Sort rank: High(3) > Medium(2) > Low(1)
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Rank of raw priority text. Unrecognized text ranks lowest (0).
    pub fn rank_of(text: &str) -> u8 {
        Priority::parse(text).map(Priority::rank).unwrap_or(0)
    }

    /// Case-insensitive parse of `low`, `medium`, `high`
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ValidationError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

impl Status {
    /// Canonical on-disk / display form
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Case-insensitive parse. The in-progress state also accepts the
    /// underscore, hyphen and run-together spellings.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in progress" | "in_progress" | "in-progress" | "inprogress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(ValidationError::InvalidStatus(s.to_string())),
        }
    }

    pub fn is_completed(self) -> bool {
        self == Status::Completed
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a `DD/MM/YYYY` deadline. The text must have exactly that shape
/// (zero-padded day and month, four-digit year) and name a real date.
pub fn parse_deadline(s: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDeadline(s.to_string());
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return Err(invalid());
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !digits_ok {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(s, DEADLINE_FORMAT).map_err(|_| invalid())
}

/// Raw, unvalidated field values for a new task, in the shape a caller
/// collects them (CLI flags, menu prompts).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub deadline: String,
    pub priority: String,
    pub status: String,
    pub label: String,
}

/// A validated task. Fields are private so every instance has passed
/// validation; the ID has no setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: u32,
    category: String,
    title: String,
    description: String,
    deadline: NaiveDate,
    priority: Priority,
    status: Status,
    label: String,
}

impl Task {
    /// Build a task from typed values, checking the ID and the
    /// free-text fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        category: String,
        title: String,
        description: String,
        deadline: NaiveDate,
        priority: Priority,
        status: Status,
        label: String,
    ) -> Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::InvalidId(id.to_string()));
        }
        check_text("category", &category)?;
        check_text("title", &title)?;
        check_text("description", &description)?;
        check_text("label", &label)?;
        Ok(Task {
            id,
            category,
            title,
            description,
            deadline,
            priority,
            status,
            label,
        })
    }

    /// Validate and convert raw field text into a task.
    pub fn from_fields(fields: TaskFields) -> Result<Self, ValidationError> {
        let id = parse_id(&fields.id)?;
        let deadline = parse_deadline(&fields.deadline)?;
        let priority = Priority::parse(&fields.priority)?;
        let status = Status::parse(&fields.status)?;
        Task::new(
            id,
            fields.category,
            fields.title,
            fields.description,
            deadline,
            priority,
            status,
            fields.label,
        )
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// The deadline rendered back to `DD/MM/YYYY`
    pub fn deadline_text(&self) -> String {
        self.deadline.format(DEADLINE_FORMAT).to_string()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn set_category(&mut self, category: String) -> Result<(), ValidationError> {
        check_text("category", &category)?;
        self.category = category;
        Ok(())
    }

    pub fn set_label(&mut self, label: String) -> Result<(), ValidationError> {
        check_text("label", &label)?;
        self.label = label;
        Ok(())
    }
}

/// Parse a task ID: a positive integer, surrounding whitespace ignored.
pub fn parse_id(s: &str) -> Result<u32, ValidationError> {
    match s.trim().parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidId(s.to_string())),
    }
}

/// Reject free text containing the delimiter or a line break
pub fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains([DELIMITER, '\n', '\r']) {
        return Err(ValidationError::ForbiddenCharacter { field });
    }
    Ok(())
}
