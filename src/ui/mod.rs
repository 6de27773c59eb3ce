pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod timer_pane;

use crate::app::{AppState, StatusMessage};
use crate::domain::navigator::{segment_count, segment_of};
use crate::domain::UiMode;
use input_form::{render_input_form, render_timer_form};
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_confirm_clear, render_status_menu};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use styles::{
    default_style, error_style, hint_style, palette, selected_style, status_style, title_style,
    Palette,
};
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let palette = palette(app.dark_mode);
    let layout = create_layout(size, app.show_timer);

    f.render_widget(Block::default().style(default_style(&palette)), size);

    render_keybindings(f, app.ui_mode, &palette, layout.keybindings_area);
    render_list_pane(f, app, &palette, layout.list_area);
    if let Some(timer_area) = layout.timer_area {
        render_timer_pane(f, app, &palette, timer_area);
    }
    render_footer(f, app, &palette, layout.footer_area);

    match app.ui_mode {
        UiMode::AddingTasks => render_input_form(f, app, &palette, size),
        UiMode::StatusMenu => render_status_menu(f, app, &palette, size),
        UiMode::ConfirmClear => render_confirm_clear(f, app, &palette, size),
        UiMode::TimerConfig => render_timer_form(f, app, &palette, size),
        UiMode::Normal | UiMode::Dragging => {}
    }
}

/// Footer: the last message if any, else per-status counts and the navigator
fn render_footer(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    if let Some(message) = &app.status_message {
        let line = Line::styled(format!(" {}", message.text()), message_style(message, palette));
        f.render_widget(Paragraph::new(line), area);
        return;
    }

    let mut spans = vec![Span::raw(" ")];
    for (status, count) in app.store.counts() {
        spans.push(Span::styled(format!("{} {}  ", count, status.label()), status_style(status)));
    }

    let segments = segment_count(app.store.len());
    if segments > 1 {
        spans.push(Span::styled("│ ", hint_style(palette)));
        let current = segment_of(app.selected_index);
        for segment in 0..segments {
            let label = format!("{}", segment + 1);
            if segment == current {
                spans.push(Span::styled(label, selected_style(palette)));
            } else {
                spans.push(Span::styled(label, hint_style(palette)));
            }
            spans.push(Span::raw(" "));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Failures in red, timer notices in the accent color
fn message_style(message: &StatusMessage, palette: &Palette) -> Style {
    if message.is_error() {
        error_style()
    } else {
        title_style(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_is_not_drawn_as_error() {
        let palette = palette(false);
        let notice = StatusMessage::Notice("Time for a break".to_string());
        let error = StatusMessage::Error("Could not save tasks".to_string());

        assert_eq!(message_style(&notice, &palette), title_style(&palette));
        assert_ne!(message_style(&notice, &palette), error_style());
        assert_eq!(message_style(&error, &palette), error_style());
    }
}
