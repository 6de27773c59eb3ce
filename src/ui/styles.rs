use crate::domain::{Status, TimerMode, TimerState};
use ratatui::style::{Color, Modifier, Style};

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight_bg: Color,
}

/// Palette for the dark or light theme
pub fn palette(dark: bool) -> Palette {
    if dark {
        Palette {
            fg: Color::White,
            bg: Color::Reset,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            highlight_bg: Color::LightCyan,
        }
    } else {
        Palette {
            fg: Color::Black,
            bg: Color::White,
            muted: Color::Gray,
            accent: Color::Blue,
            highlight_bg: Color::LightBlue,
        }
    }
}

/// Default text style
pub fn default_style(p: &Palette) -> Style {
    Style::default().fg(p.fg).bg(p.bg)
}

/// Selected row highlight style
pub fn selected_style(p: &Palette) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(p.highlight_bg)
        .add_modifier(Modifier::BOLD)
}

/// Row a dragged task would land on
pub fn drop_target_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Colour of a status dot and label
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Doing => Color::Magenta,
        Status::Later => Color::Yellow,
        Status::Done => Color::Green,
        Status::Cancelled => Color::Red,
    }
}

pub fn status_style(status: Status) -> Style {
    let style = Style::default().fg(status_color(status));
    match status {
        Status::Doing => style.add_modifier(Modifier::BOLD),
        Status::Cancelled => style.add_modifier(Modifier::DIM),
        _ => style,
    }
}

/// Task text style; closed tasks are struck through
pub fn task_text_style(p: &Palette, status: Status) -> Style {
    match status {
        Status::Done => Style::default().fg(p.muted).add_modifier(Modifier::CROSSED_OUT),
        Status::Cancelled => Style::default()
            .fg(p.muted)
            .add_modifier(Modifier::CROSSED_OUT | Modifier::DIM),
        _ => Style::default().fg(p.fg),
    }
}

/// Timer badge style
pub fn timer_state_style(state: TimerState, mode: TimerMode) -> Style {
    match (state, mode) {
        (TimerState::Running, TimerMode::Work) => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        (TimerState::Running, TimerMode::Break) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        (TimerState::Paused, _) => Style::default().fg(Color::Yellow),
        (TimerState::Idle, _) => Style::default().fg(Color::Gray),
    }
}

/// Title style for panes
pub fn title_style(p: &Palette) -> Style {
    Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(p: &Palette) -> Style {
    Style::default().fg(p.muted)
}

/// Modal background style
pub fn modal_bg_style(p: &Palette) -> Style {
    if p.bg == Color::White {
        Style::default().bg(Color::Gray).fg(Color::Black)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style(p: &Palette) -> Style {
    Style::default().fg(p.muted)
}

/// Progress gauge style
pub fn gauge_style(p: &Palette) -> Style {
    Style::default().fg(p.accent).bg(p.muted)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
