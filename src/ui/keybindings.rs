use crate::domain::UiMode;
use crate::ui::styles::{hint_style, Palette};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hints for the current mode
pub fn hints_for(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Normal => {
            " ↑/↓ select   a add   Enter status   x delete   g grab   1-9 jump   C clear   \
             o timer   S start   p pause   r reset   t show timer   T theme   q quit"
        }
        UiMode::AddingTasks => " Enter save   Alt+Enter new line   Esc cancel",
        UiMode::StatusMenu => " ↑/↓ choose   Enter apply   d/l/D/c status   x delete   Esc close",
        UiMode::Dragging => " ↑/↓ move target   Enter drop   Esc cancel",
        UiMode::ConfirmClear => " y clear everything   n keep",
        UiMode::TimerConfig => " Tab next field   Space breaks on/off   Enter start   Esc close",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, palette: &Palette, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints_for(mode))).style(hint_style(palette));
    f.render_widget(paragraph, area);
}
