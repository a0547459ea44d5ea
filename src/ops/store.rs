use std::path::{Path, PathBuf};

use crate::io::store_io;
use crate::model::config::StoreConfig;
use crate::model::task::{Priority, Status, Task, TaskFields, ValidationError};
use crate::ops::sort::{SortKey, sort_tasks};
use crate::parse::{
    RecordError, parse_record_bytes, parse_record_id, serialize_lines, serialize_record,
};

pub use crate::ops::deadline::is_deadline_near;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task with ID {0} already exists")]
    DuplicateId(u32),
    #[error("task not found: {0}")]
    NotFound(u32),
    #[error("no tasks present in the file")]
    Empty,
    #[error("invalid field: {0}")]
    Invalid(#[from] ValidationError),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A problem found while loading the backing file. Loading never fails;
/// these are collected instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The file could not be opened or read
    Unreadable { path: PathBuf, message: String },
    /// A line could not be decoded (1-based line number). The line is kept
    /// verbatim on rewrite.
    Malformed { line: usize, error: RecordError },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::Unreadable { path, message } => {
                write!(f, "unable to open {}: {}", path.display(), message)
            }
            Diagnostic::Malformed { line, error } => write!(f, "line {}: {}", line, error),
        }
    }
}

/// One line of the backing file as loaded, kept as raw bytes. `source` is
/// written back verbatim unless the task is edited; blank and undecodable
/// lines are `Unparsed`.
#[derive(Debug, Clone)]
enum Entry {
    Task { task: Task, source: Vec<u8> },
    Unparsed(Vec<u8>),
}

/// The task collection and its backing file.
///
/// The file is the source of truth: listing, editing and deleting all
/// re-read it. Single-process use is assumed; there is no file locking.
#[derive(Debug)]
pub struct TaskStore {
    config: StoreConfig,
    entries: Vec<Entry>,
    diagnostics: Vec<Diagnostic>,
}

impl TaskStore {
    pub fn new(config: StoreConfig) -> Self {
        TaskStore {
            config,
            entries: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Shorthand for a store over `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        TaskStore::new(StoreConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Problems seen by the most recent load
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Tasks currently held in memory, in file order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Task { task, .. } => Some(task),
            Entry::Unparsed(_) => None,
        })
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    /// Append a new task. Fails with `DuplicateId` if the file already holds
    /// a record with this ID; nothing is written in that case.
    pub fn create(&mut self, task: Task) -> Result<(), StoreError> {
        let existing = self.read_raw()?;
        if let Some(bytes) = existing.as_deref() {
            let lines = store_io::split_lines(bytes);
            if lines.iter().any(|line| parse_record_id(line) == Some(task.id())) {
                return Err(StoreError::DuplicateId(task.id()));
            }
        }

        let line = serialize_record(&task);
        store_io::append_line(self.path(), existing.as_deref(), &line).map_err(|source| {
            StoreError::WriteError {
                path: self.config.path.clone(),
                source,
            }
        })?;
        tracing::debug!(id = task.id(), path = %self.path().display(), "task appended");
        self.entries.push(Entry::Task {
            task,
            source: line.into_bytes(),
        });
        Ok(())
    }

    /// Validate raw fields and create the task. Returns the stored task.
    pub fn create_task(&mut self, fields: TaskFields) -> Result<Task, StoreError> {
        let task = Task::from_fields(fields)?;
        self.create(task.clone())?;
        Ok(task)
    }

    // -----------------------------------------------------------------------
    // Load / query
    // -----------------------------------------------------------------------

    /// Re-read the backing file, replacing the in-memory set. An unreadable
    /// or missing file gives an empty set plus a diagnostic.
    pub fn load_all(&mut self) -> Vec<Task> {
        self.entries.clear();
        self.diagnostics.clear();

        let bytes = match store_io::read_store(self.path()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::info!(path = %self.path().display(), "backing file not found, no tasks");
                self.diagnostics.push(Diagnostic::Unreadable {
                    path: self.config.path.clone(),
                    message: "file does not exist".to_string(),
                });
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path().display(), error = %e, "unable to open backing file");
                self.diagnostics.push(Diagnostic::Unreadable {
                    path: self.config.path.clone(),
                    message: e.to_string(),
                });
                return Vec::new();
            }
        };

        for (idx, line) in store_io::split_lines(&bytes).into_iter().enumerate() {
            if line.trim_ascii().is_empty() {
                self.entries.push(Entry::Unparsed(line.to_vec()));
                continue;
            }
            match parse_record_bytes(line) {
                Ok(task) => self.entries.push(Entry::Task {
                    task,
                    source: line.to_vec(),
                }),
                Err(error) => {
                    tracing::warn!(line = idx + 1, %error, "skipping malformed record");
                    self.diagnostics.push(Diagnostic::Malformed {
                        line: idx + 1,
                        error,
                    });
                    self.entries.push(Entry::Unparsed(line.to_vec()));
                }
            }
        }

        tracing::debug!(
            path = %self.path().display(),
            tasks = self.tasks().count(),
            malformed = self.diagnostics.len(),
            "loaded backing file"
        );
        self.tasks().cloned().collect()
    }

    /// Linear scan of the loaded set
    pub fn find_by_id(&self, id: u32) -> Result<&Task, StoreError> {
        self.tasks()
            .find(|t| t.id() == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Reload and return the tasks ordered by `key`. An empty file is
    /// `Empty`, never an empty list.
    pub fn list_sorted(&mut self, key: SortKey) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.load_all();
        if tasks.is_empty() {
            return Err(StoreError::Empty);
        }
        sort_tasks(&mut tasks, key);
        Ok(tasks)
    }

    // -----------------------------------------------------------------------
    // Edit
    // -----------------------------------------------------------------------

    /// Set a task's priority and status, then rewrite the whole file.
    ///
    /// Both values are validated before anything changes. If the rewrite
    /// fails the in-memory task is restored and the file is untouched.
    pub fn update_fields(
        &mut self,
        id: u32,
        priority: &str,
        status: &str,
    ) -> Result<Task, StoreError> {
        self.load_all();

        let idx = self
            .entries
            .iter()
            .position(|e| matches!(e, Entry::Task { task, .. } if task.id() == id))
            .ok_or(StoreError::NotFound(id))?;

        let new_priority = Priority::parse(priority)?;
        let new_status = Status::parse(status)?;

        let Entry::Task { task, source } = &mut self.entries[idx] else {
            return Err(StoreError::NotFound(id));
        };
        let previous = (task.clone(), source.clone());
        task.set_priority(new_priority);
        task.set_status(new_status);
        *source = serialize_record(task).into_bytes();
        let updated = task.clone();

        if let Err(e) = self.rewrite() {
            self.entries[idx] = Entry::Task {
                task: previous.0,
                source: previous.1,
            };
            return Err(e);
        }
        tracing::debug!(id, priority = %new_priority, status = %new_status, "task edited");
        Ok(updated)
    }

    /// Edit entry point for front ends. Same contract as [`update_fields`](Self::update_fields).
    pub fn edit_task(&mut self, id: u32, priority: &str, status: &str) -> Result<Task, StoreError> {
        self.update_fields(id, priority, status)
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Remove every record with `id` from the backing file.
    ///
    /// Works on a fresh read of the file, comparing only the ID field; every
    /// other line, blank ones included, is kept byte-for-byte. If nothing
    /// matches the file is not written and `NotFound` is returned.
    pub fn delete_by_id(&mut self, id: u32) -> Result<(), StoreError> {
        let bytes = self.read_raw()?.ok_or(StoreError::NotFound(id))?;

        let mut found = false;
        let mut retained = Vec::new();
        for line in store_io::split_lines(&bytes) {
            if parse_record_id(line) == Some(id) {
                found = true;
            } else {
                retained.push(line);
            }
        }

        if !found {
            return Err(StoreError::NotFound(id));
        }

        self.write_all(&serialize_lines(&retained))?;
        self.entries
            .retain(|e| !matches!(e, Entry::Task { task, .. } if task.id() == id));
        tracing::debug!(id, remaining = retained.len(), "task deleted");
        Ok(())
    }

    /// Delete and hand back the removed ID for confirmation messages
    pub fn delete_task(&mut self, id: u32) -> Result<u32, StoreError> {
        self.delete_by_id(id)?;
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn read_raw(&self) -> Result<Option<Vec<u8>>, StoreError> {
        store_io::read_store(self.path()).map_err(|source| StoreError::ReadError {
            path: self.config.path.clone(),
            source,
        })
    }

    /// Overwrite the file from the in-memory entries, in order
    fn rewrite(&self) -> Result<(), StoreError> {
        let lines: Vec<&[u8]> = self
            .entries
            .iter()
            .map(|e| match e {
                Entry::Task { source, .. } => source.as_slice(),
                Entry::Unparsed(raw) => raw.as_slice(),
            })
            .collect();
        self.write_all(&serialize_lines(&lines))
    }

    fn write_all(&self, content: &[u8]) -> Result<(), StoreError> {
        store_io::atomic_write(self.path(), content).map_err(|source| {
            tracing::warn!(path = %self.path().display(), error = %source, "rewrite failed");
            StoreError::WriteError {
                path: self.config.path.clone(),
                source,
            }
        })
    }
}
