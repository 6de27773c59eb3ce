use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, Palette},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the multi-line form for adding tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };
    let text_lines: Vec<&str> = form.text.split('\n').collect();
    let height = (text_lines.len() as u16).saturating_add(6).min(area.height);
    let modal_area = create_modal_area(area, height);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("One task per line:")];
    let last = text_lines.len() - 1;
    for (idx, text) in text_lines.iter().enumerate() {
        let mut spans = vec![
            Span::raw("> "),
            Span::styled(text.to_string(), modal_title_style()),
        ];
        if idx == last {
            spans.push(Span::styled("█", modal_title_style())); // Cursor
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Enter to save  ·  Alt+Enter for a new line  ·  Esc to cancel",
        hint_style(palette),
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Tasks ", modal_title_style()))
                .style(modal_bg_style(palette)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the timer settings form
pub fn render_timer_form(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let Some(form) = &app.timer_form else {
        return;
    };
    let modal_area = create_modal_area(area, 13);
    f.render_widget(Clear, modal_area);

    let breaks = if form.enable_breaks { "[x]" } else { "[ ]" };
    let fields: [(&str, &str); 5] = [
        ("Hours", form.hours.as_str()),
        ("Minutes", form.minutes.as_str()),
        ("Breaks", breaks),
        ("Work (min)", form.work_interval.as_str()),
        ("Break (min)", form.break_interval.as_str()),
    ];

    let mut lines = vec![Line::raw("")];
    for (idx, (label, value)) in fields.iter().enumerate() {
        let editing = idx == form.editing_field;
        // Interval lengths only matter with breaks on
        let style = if idx >= 3 && !form.enable_breaks {
            hint_style(palette)
        } else {
            modal_title_style()
        };
        lines.push(Line::from(vec![
            Span::raw(if editing { "> " } else { "  " }),
            Span::raw(format!("{:<12}", label)),
            Span::styled(value.to_string(), style),
            if editing && idx != 2 {
                Span::styled("█", modal_title_style())
            } else {
                Span::raw("")
            },
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Tab next  ·  Space breaks  ·  Enter start  ·  Esc close",
        hint_style(palette),
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Timer ", modal_title_style()))
                .style(modal_bg_style(palette)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
