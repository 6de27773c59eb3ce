use crate::app::AppState;
use crate::domain::Status;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, selected_style, status_style, Palette},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut keys shown next to each status in the menu
const STATUS_KEYS: [&str; 4] = ["d", "l", "D", "c"];

/// Render the status menu for one task
pub fn render_status_menu(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let Some(menu) = &app.status_menu else {
        return;
    };
    let task_text = app
        .store
        .get(menu.task_id)
        .map(|t| t.text().to_string())
        .unwrap_or_default();

    let modal_area = create_modal_area(area, 11);
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();
    lines.push(Line::raw(format!("  {}", task_text)));
    lines.push(Line::raw(""));

    for (idx, status) in Status::ALL.iter().enumerate() {
        let label = format!("  [{}] {}", STATUS_KEYS[idx], status.label());
        let style = if idx == menu.selected {
            selected_style(palette)
        } else {
            status_style(*status)
        };
        lines.push(Line::styled(label, style));
    }

    let delete_style = if menu.selected == Status::ALL.len() {
        selected_style(palette)
    } else {
        modal_title_style()
    };
    lines.push(Line::styled("  [x] delete", delete_style));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [Esc]", modal_title_style()),
        Span::raw(" Close"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Set Status ", modal_title_style()))
                .style(modal_bg_style(palette)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the clear all confirmation
pub fn render_confirm_clear(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let modal_area = create_modal_area(area, 8);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Delete all {} tasks?", app.store.len())),
        Line::raw("  This cannot be undone."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Clear all  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Clear All ", modal_title_style()))
                .style(modal_bg_style(palette)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
