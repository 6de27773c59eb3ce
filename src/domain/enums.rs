use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Status of a task. Declaration order is the grouping priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Doing,
    Later,
    Done,
    Cancelled,
}

/// Returned when a status tag does not name one of the four statuses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0:?}")]
pub struct StatusParseError(pub String);

impl Status {
    pub const ALL: [Status; 4] = [Status::Doing, Status::Later, Status::Done, Status::Cancelled];

    /// Grouping priority: doing(0) < later(1) < done(2) < cancelled(3)
    pub fn priority(&self) -> usize {
        match self {
            Self::Doing => 0,
            Self::Later => 1,
            Self::Done => 2,
            Self::Cancelled => 3,
        }
    }

    /// Parse a status tag typed by the user or passed on the command line.
    ///
    /// Surrounding whitespace and case are ignored. Saved records do not go
    /// through here: serde matches their lowercase tag exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "doing" => Some(Self::Doing),
            "later" => Some(Self::Later),
            "done" => Some(Self::Done),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Convert status to its stored tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Doing => "doing",
            Self::Later => "later",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Label shown on the status button and in the status menu
    pub fn label(&self) -> &'static str {
        match self {
            Self::Doing => "doing",
            Self::Later => "later",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_tag())
    }
}

impl FromStr for Status {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// Run state of the interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

impl TimerState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

/// Segment of an interval run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Work,
    Break,
}

impl TimerMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTasks,
    StatusMenu,
    Dragging,
    ConfirmClear,
    TimerConfig,
}
