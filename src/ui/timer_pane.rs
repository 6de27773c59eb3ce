use crate::app::AppState;
use crate::domain::{IntervalTimer, TimerState};
use crate::ui::styles::{
    border_style, gauge_style, hint_style, timer_state_style, title_style, Palette,
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Wall-clock time a running countdown finishes
fn ends_at(timer: &IntervalTimer, now: DateTime<Local>) -> Option<DateTime<Local>> {
    if timer.state() != TimerState::Running {
        return None;
    }
    let remaining = i64::try_from(timer.remaining_seconds()).ok()?;
    Some(now + chrono::Duration::seconds(remaining))
}

/// Badge text, e.g. "RUNNING · work"
fn status_line(timer: &IntervalTimer) -> String {
    match timer.state() {
        TimerState::Idle => "IDLE".to_string(),
        state if timer.breaks_enabled() => {
            format!("{} · {}", state.name().to_uppercase(), timer.mode().name())
        }
        state => state.name().to_uppercase(),
    }
}

/// Render the countdown pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let timer = &app.timer;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(palette))
        .title(Span::styled(" Timer ", title_style(palette)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            format!("  {}", timer.format_remaining()),
            timer_state_style(timer.state(), timer.mode()),
        ),
        Line::styled(
            format!("  {}", status_line(timer)),
            timer_state_style(timer.state(), timer.mode()),
        ),
        Line::raw(""),
    ];

    if timer.breaks_enabled() && timer.state() != TimerState::Idle {
        lines.push(Line::raw(format!(
            "  Work intervals done: {}",
            timer.completed_work_intervals()
        )));
    }

    if let Some(end) = ends_at(timer, Local::now()) {
        lines.push(Line::raw(format!("  Ends at {}", end.format("%H:%M"))));
    }

    let config = &app.timer_config;
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  Set: ", hint_style(palette)),
        Span::raw(format!("{}h {}m", config.hours, config.minutes)),
    ]));
    if config.enable_breaks {
        lines.push(Line::from(vec![
            Span::styled("  Breaks: ", hint_style(palette)),
            Span::raw(format!(
                "{}m work / {}m break",
                config.work_interval, config.break_interval
            )),
        ]));
    } else {
        lines.push(Line::styled("  Breaks off", hint_style(palette)));
    }

    f.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(palette))
        .ratio(timer.progress_ratio().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[1]);
}
