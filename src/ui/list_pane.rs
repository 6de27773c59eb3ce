use crate::app::AppState;
use crate::domain::navigator::{segment_of, NAV_GROUP_SIZE};
use crate::domain::{Task, UiMode};
use crate::ui::styles::{
    border_style, default_style, drop_target_style, hint_style, selected_style, status_style,
    task_text_style, title_style, Palette,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the task list and remember where its rows landed
pub fn render_list_pane(f: &mut Frame, app: &mut AppState, palette: &Palette, area: Rect) {
    let date = Local::now().format("%a %b %d");
    let title = format!(" Tasks ({}) ", date);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(palette))
        .title(Span::styled(title, title_style(palette)));

    if app.store.is_empty() {
        let empty = Paragraph::new(Line::styled("  Nothing here yet. Press a to add tasks.", hint_style(palette)))
            .block(block);
        f.render_widget(empty, area);
        app.list_geometry.height = 0;
        return;
    }

    let dragging = app.ui_mode == UiMode::Dragging;
    let moved = app.drag.as_ref().map(|d| d.moved);
    let highlighted = app
        .drag
        .as_ref()
        .map(|d| d.target_index)
        .unwrap_or(app.selected_index);

    let items: Vec<ListItem> = app
        .store
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let carried = moved == Some(task.id());
            ListItem::new(create_task_line(task, idx, carried, palette))
        })
        .collect();

    let highlight = if dragging {
        drop_target_style()
    } else {
        selected_style(palette)
    };
    let list = List::new(items)
        .block(block)
        .style(default_style(palette))
        .highlight_style(highlight);

    let mut state = ListState::default()
        .with_offset(app.list_geometry.offset)
        .with_selected(Some(highlighted));
    f.render_stateful_widget(list, area, &mut state);

    app.list_geometry.top = area.y.saturating_add(1);
    app.list_geometry.height = area.height.saturating_sub(2);
    app.list_geometry.offset = state.offset();
}

/// Create a single line for a task
/// Format: 2 ● write report            [doing]
fn create_task_line(task: &Task, index: usize, carried: bool, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();

    // Navigator marker on the first row of each segment
    let marker = if index % NAV_GROUP_SIZE == 0 {
        format!("{:>2} ", segment_of(index) + 1)
    } else {
        "   ".to_string()
    };
    spans.push(Span::styled(marker, hint_style(palette)));

    spans.push(Span::styled(if carried { "≡ " } else { "● " }, status_style(task.status)));
    spans.push(Span::styled(
        task.text().to_string(),
        task_text_style(palette, task.status),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("[{}]", task.status.label()),
        status_style(task.status),
    ));

    Line::from(spans)
}
