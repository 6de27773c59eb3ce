use super::enums::Status;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of a task, assigned at creation and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task. The text is fixed once the task exists.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    text: String,
    /// Current status
    pub status: Status,
}

impl Task {
    /// Create a task, case-folding its text
    pub fn new(text: &str, status: Status) -> Self {
        Self {
            id: TaskId::new(),
            text: text.to_lowercase(),
            status,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Project the task into its persisted form
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            text: self.text.clone(),
            status: self.status,
        }
    }
}

impl From<&TaskRecord> for Task {
    fn from(record: &TaskRecord) -> Self {
        Task::new(&record.text, record.status)
    }
}

/// Persisted shape of a task: `{"text": ..., "status": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub text: String,
    /// Older documents may omit the status; those tasks come back as doing
    #[serde(default)]
    pub status: Status,
}

impl TaskRecord {
    pub fn new(text: &str, status: Status) -> Self {
        Self {
            text: text.to_string(),
            status,
        }
    }
}
