pub mod enums;
pub mod navigator;
pub mod ordering;
pub mod store;
pub mod task;
pub mod timer;

pub use enums::{Status, StatusParseError, TimerMode, TimerState, UiMode};
pub use store::TaskStore;
pub use task::{Task, TaskId, TaskRecord};
pub use timer::{IntervalTimer, TimerConfig, TimerError, TimerEvent};
