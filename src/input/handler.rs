use crate::app::AppState;
use crate::domain::{Status, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTasks => handle_input_form_mode(app, key),
        UiMode::StatusMenu => handle_status_menu_mode(app, key),
        UiMode::Dragging => handle_dragging_mode(app, key),
        UiMode::ConfirmClear => handle_confirm_clear_mode(app, key),
        UiMode::TimerConfig => handle_timer_form_mode(app, key),
    }
}

/// Handle mouse events: press on a task picks it up, release drops it
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(mouse.row),
        _ => {}
    }
}

/// Handle pasted text; only the add form accepts it
pub fn handle_paste(app: &mut AppState, text: &str) {
    if app.ui_mode == UiMode::AddingTasks {
        app.input_form_paste(text);
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Any key clears the footer message
    app.dismiss_message();

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Navigator segments
        KeyCode::Char(c @ '1'..='9') => {
            let segment = c.to_digit(10).map_or(0, |d| d as usize - 1);
            app.jump_to_segment(segment);
            Ok(false)
        }

        // Add tasks
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_tasks();
            Ok(false)
        }

        // Status menu
        KeyCode::Enter | KeyCode::Char('s') => {
            app.open_status_menu();
            Ok(false)
        }

        // Delete
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Pick up the selected task
        KeyCode::Char('g') | KeyCode::Char(' ') => {
            app.start_drag();
            Ok(false)
        }

        // Clear all
        KeyCode::Char('C') => {
            app.request_clear_all();
            Ok(false)
        }

        // Timer
        KeyCode::Char('o') | KeyCode::Char('O') => {
            app.open_timer_form();
            Ok(false)
        }
        KeyCode::Char('S') => {
            app.start_timer();
            Ok(false)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.toggle_timer_pause();
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_timer();
            Ok(false)
        }
        KeyCode::Char('t') => {
            app.toggle_timer_visible();
            Ok(false)
        }

        // Theme
        KeyCode::Char('T') => {
            app.toggle_theme();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in the add tasks form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Alt+Enter or Shift+Enter starts a new line, Enter submits
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
        {
            app.input_form_newline();
            Ok(false)
        }
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_form_newline();
            Ok(false)
        }
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in the status menu
fn handle_status_menu_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.status_menu_up(),
        KeyCode::Down | KeyCode::Char('j') => app.status_menu_down(),
        KeyCode::Enter => app.status_menu_choose(),

        // Shortcuts
        KeyCode::Char('d') => app.status_menu_set(Status::Doing),
        KeyCode::Char('l') => app.status_menu_set(Status::Later),
        KeyCode::Char('D') => app.status_menu_set(Status::Done),
        KeyCode::Char('c') => app.status_menu_set(Status::Cancelled),
        KeyCode::Char('x') | KeyCode::Delete => app.status_menu_delete(),

        KeyCode::Esc => {
            app.close_status_menu();
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys while a task is picked up
fn handle_dragging_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.drag_target_up(),
        KeyCode::Down | KeyCode::Char('j') => app.drag_target_down(),
        KeyCode::Enter | KeyCode::Char('g') | KeyCode::Char(' ') => app.drop_dragged(),
        KeyCode::Esc => app.cancel_drag(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the clear all confirmation
fn handle_confirm_clear_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear_all(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_clear_all(false),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the timer settings form
fn handle_timer_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.timer_form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.timer_form_prev_field(),
        KeyCode::Char(' ') => app.timer_form_toggle_breaks(),
        KeyCode::Backspace => app.timer_form_backspace(),
        KeyCode::Char(c) => app.timer_form_add_char(c),
        KeyCode::Enter => app.submit_timer_form(),
        KeyCode::Esc => app.cancel_timer_form(),
        _ => {}
    }
    Ok(false)
}
