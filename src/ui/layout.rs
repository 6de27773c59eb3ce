use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the timer pane when shown
pub const TIMER_PANE_WIDTH: u16 = 36;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
    pub timer_area: Option<Rect>,
    pub footer_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: task list, with the timer pane on the right when shown
/// - Bottom bar: counts, navigator and messages (1 row)
pub fn create_layout(area: Rect, show_timer: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let content_area = main_chunks[1];

    let (list_area, timer_area) = if show_timer {
        let horizontal_split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),                     // List pane
                Constraint::Length(TIMER_PANE_WIDTH), // Timer pane
            ])
            .split(content_area);
        (horizontal_split[0], Some(horizontal_split[1]))
    } else {
        (content_area, None)
    };

    MainLayout {
        keybindings_area: main_chunks[0],
        list_area,
        timer_area,
        footer_area: main_chunks[2],
    }
}

/// Create a centered modal area of the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
