use crate::model::task::{
    DELIMITER, Priority, Status, Task, ValidationError, parse_deadline, parse_id,
};

/// Number of fields in a record line
pub const FIELD_COUNT: usize = 8;

/// Error type for record decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl From<ValidationError> for RecordError {
    fn from(e: ValidationError) -> Self {
        RecordError::MalformedRecord(e.to_string())
    }
}

/// Parse one record line into a task.
///
/// Every field goes through the same validation as a newly created task,
/// so an unrecognized priority or status rejects the whole record.
pub fn parse_record(line: &str) -> Result<Task, RecordError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split(DELIMITER).collect();

    let id = fields[0].trim().parse::<i64>().map_err(|_| {
        RecordError::MalformedRecord(format!("task ID {:?} is not an integer", fields[0]))
    })?;

    if fields.len() != FIELD_COUNT {
        return Err(RecordError::MalformedRecord(format!(
            "expected {} fields, found {} (record {})",
            FIELD_COUNT,
            fields.len(),
            id
        )));
    }

    let id = parse_id(fields[0])?;
    let deadline = parse_deadline(fields[4])?;
    let priority = Priority::parse(fields[5])?;
    let status = Status::parse(fields[6])?;

    Ok(Task::new(
        id,
        fields[1].to_string(),
        fields[2].to_string(),
        fields[3].to_string(),
        deadline,
        priority,
        status,
        fields[7].to_string(),
    )?)
}

/// Parse a raw line from the backing file. Bytes that are not UTF-8 make
/// the record malformed.
pub fn parse_record_bytes(line: &[u8]) -> Result<Task, RecordError> {
    let text = std::str::from_utf8(line)
        .map_err(|e| RecordError::MalformedRecord(format!("not valid UTF-8: {}", e)))?;
    parse_record(text)
}

/// Read just the ID field of a record line. Returns `None` if it is not a
/// valid task ID. The rest of the line is not decoded.
pub fn parse_record_id(line: impl AsRef<[u8]>) -> Option<u32> {
    let line = line.as_ref();
    let end = line
        .iter()
        .position(|b| *b == DELIMITER as u8)
        .unwrap_or(line.len());
    let first = std::str::from_utf8(&line[..end]).ok()?;
    parse_id(first).ok()
}
