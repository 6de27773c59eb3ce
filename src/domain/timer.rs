use super::enums::{TimerMode, TimerState};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Default work segment length in minutes
pub const DEFAULT_WORK_MINUTES: u32 = 25;
/// Default break segment length in minutes
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Persisted timer configuration.
///
/// Numeric fields decode leniently: numbers and numeric strings are accepted,
/// anything else falls back to the field's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerConfig {
    #[serde(deserialize_with = "lenient_u32")]
    pub hours: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub minutes: u32,
    #[serde(deserialize_with = "lenient_bool")]
    pub enable_breaks: bool,
    /// Work segment length in minutes
    #[serde(deserialize_with = "lenient_work")]
    pub work_interval: u32,
    /// Break segment length in minutes
    #[serde(deserialize_with = "lenient_break")]
    pub break_interval: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            enable_breaks: false,
            work_interval: DEFAULT_WORK_MINUTES,
            break_interval: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerConfig {
    /// Build a configuration from raw form fields, coercing bad input to defaults
    pub fn from_inputs(
        hours: &str,
        minutes: &str,
        enable_breaks: bool,
        work_interval: &str,
        break_interval: &str,
    ) -> Self {
        Self {
            hours: parse_number(hours).unwrap_or(0),
            minutes: parse_number(minutes).unwrap_or(0),
            enable_breaks,
            work_interval: positive_or(parse_number(work_interval), DEFAULT_WORK_MINUTES),
            break_interval: positive_or(parse_number(break_interval), DEFAULT_BREAK_MINUTES),
        }
    }

    /// Configured run length in seconds
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60
    }

    pub fn work_seconds(&self) -> u64 {
        u64::from(positive_or(Some(self.work_interval), DEFAULT_WORK_MINUTES)) * 60
    }

    pub fn break_seconds(&self) -> u64 {
        u64::from(positive_or(Some(self.break_interval), DEFAULT_BREAK_MINUTES)) * 60
    }
}

/// Parse the leading integer of a form field, the way a browser's parseInt would
fn parse_number(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Overlong input saturates instead of being rejected
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

fn positive_or(value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => default,
    }
}

fn number_from_value(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
            .or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v.min(u32::MAX as f64) as u32)),
        serde_json::Value::String(s) => parse_number(s),
        _ => None,
    }
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).unwrap_or(0))
}

fn lenient_work<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(positive_or(number_from_value(&value), DEFAULT_WORK_MINUTES))
}

fn lenient_break<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(positive_or(number_from_value(&value), DEFAULT_BREAK_MINUTES))
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Signal produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown reached zero and the timer is idle again
    Completed,
    /// A work segment ended
    BreakStarted,
    /// A break segment ended
    WorkStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("cannot {action} a timer that is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Countdown with optional alternating work/break segments.
///
/// The timer owns no clock: an external scheduler calls [`IntervalTimer::tick`]
/// once per elapsed second.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    state: TimerState,
    mode: TimerMode,
    remaining_seconds: u64,
    total_seconds: u64,
    breaks_enabled: bool,
    work_duration_seconds: u64,
    break_duration_seconds: u64,
    completed_work_intervals: u32,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            mode: TimerMode::Work,
            remaining_seconds: 0,
            total_seconds: 0,
            breaks_enabled: false,
            work_duration_seconds: u64::from(DEFAULT_WORK_MINUTES) * 60,
            break_duration_seconds: u64::from(DEFAULT_BREAK_MINUTES) * 60,
            completed_work_intervals: 0,
        }
    }

    /// Start a new run from `config`, discarding any run in progress
    pub fn start(&mut self, config: &TimerConfig) {
        self.total_seconds = config.total_seconds();
        self.remaining_seconds = self.total_seconds;
        self.breaks_enabled = config.enable_breaks;
        if config.enable_breaks {
            self.work_duration_seconds = config.work_seconds();
            self.break_duration_seconds = config.break_seconds();
            self.mode = TimerMode::Work;
            self.completed_work_intervals = 0;
        }
        self.state = TimerState::Running;
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.state = TimerState::Idle;
            return Some(TimerEvent::Completed);
        }

        if !self.breaks_enabled {
            return None;
        }

        let cycle = self.work_duration_seconds + self.break_duration_seconds;
        if cycle == 0 {
            return None;
        }
        let elapsed = self.total_seconds - self.remaining_seconds;
        let in_cycle = elapsed % cycle;

        match self.mode {
            TimerMode::Work if in_cycle >= self.work_duration_seconds => {
                self.mode = TimerMode::Break;
                self.completed_work_intervals += 1;
                Some(TimerEvent::BreakStarted)
            }
            // Position dropped back below the work length: the cycle wrapped
            TimerMode::Break if in_cycle < self.work_duration_seconds => {
                self.mode = TimerMode::Work;
                Some(TimerEvent::WorkStarted)
            }
            _ => None,
        }
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        if self.state != TimerState::Running {
            return Err(TimerError::InvalidTransition {
                action: "pause",
                state: self.state.name(),
            });
        }
        self.state = TimerState::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), TimerError> {
        if self.state != TimerState::Paused {
            return Err(TimerError::InvalidTransition {
                action: "resume",
                state: self.state.name(),
            });
        }
        self.state = TimerState::Running;
        Ok(())
    }

    /// Stop and clear the run; valid from any state
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_seconds = 0;
        self.completed_work_intervals = 0;
        self.mode = TimerMode::Work;
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn breaks_enabled(&self) -> bool {
        self.breaks_enabled
    }

    pub fn completed_work_intervals(&self) -> u32 {
        self.completed_work_intervals
    }

    /// Fraction of the run already elapsed (0.0 when idle with nothing left)
    pub fn progress_ratio(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        elapsed as f64 / self.total_seconds as f64
    }

    /// Remaining time as "HH:MM:SS"
    pub fn format_remaining(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

/// Format seconds as "HH:MM:SS"
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
