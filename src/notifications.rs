//! Completion and segment-change signals
//! Desktop notifications are only implemented on macOS; every platform gets the terminal bell

use crate::domain::TimerEvent;
use std::io::Write;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Receives timer signals. The app calls it once per event.
pub trait Notifier {
    fn notify(&self, event: TimerEvent);
}

/// Rings the terminal bell and posts a desktop notification where supported
#[derive(Debug, Default)]
pub struct SystemNotifier;

impl Notifier for SystemNotifier {
    fn notify(&self, event: TimerEvent) {
        ring_bell();
        match event {
            TimerEvent::Completed => notify_timer_completed(),
            TimerEvent::BreakStarted => notify_segment_change("Time for a break"),
            TimerEvent::WorkStarted => notify_segment_change("Back to work"),
        }
    }
}

/// Short human message for an event
pub fn event_message(event: TimerEvent) -> &'static str {
    match event {
        TimerEvent::Completed => "Timer finished",
        TimerEvent::BreakStarted => "Time for a break",
        TimerEvent::WorkStarted => "Back to work",
    }
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

/// Send a notification when the countdown finishes
pub fn notify_timer_completed() {
    #[cfg(target_os = "macos")]
    {
        let _ = Command::new("osascript")
            .arg("-e")
            .arg(r#"display notification "Time is up" with title "dolist - Timer Finished""#)
            .output();
    }
}

/// Send a notification when the timer switches between work and break
pub fn notify_segment_change(message: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "dolist - Timer""#,
            message.replace('"', "\\\"")
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}
