use crate::domain::navigator;
use crate::domain::{
    IntervalTimer, Status, TaskId, TaskStore, TimerConfig, TimerEvent, TimerState, UiMode,
};
use crate::notifications::{self, Notifier, SystemNotifier};
use crate::persistence::{
    load_flag, load_timer_config, save_flag, save_timer_config, Storage, THEME_KEY,
    TIMER_VISIBLE_KEY,
};
use crate::ticker::SecondTicker;
use anyhow::Result;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Entries of the status menu: the four statuses followed by delete
pub const STATUS_MENU_LEN: usize = Status::ALL.len() + 1;

/// Status menu opened on one task
#[derive(Debug, Clone)]
pub struct StatusMenuState {
    pub task_id: TaskId,
    /// Highlighted entry; `Status::ALL.len()` is the delete entry
    pub selected: usize,
}

/// A task picked up for a drag gesture
#[derive(Debug, Clone)]
pub struct DragState {
    pub moved: TaskId,
    /// Row the task would be dropped onto
    pub target_index: usize,
    /// Started with the mouse rather than the keyboard
    pub by_mouse: bool,
}

/// Multi-line input for new tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub text: String,
}

/// Fields of the timer configuration form
pub const TIMER_FORM_FIELDS: usize = 5;

/// Raw text of the timer configuration form
#[derive(Debug, Clone)]
pub struct TimerFormState {
    pub hours: String,
    pub minutes: String,
    pub enable_breaks: bool,
    pub work_interval: String,
    pub break_interval: String,
    /// 0 = hours, 1 = minutes, 2 = breaks toggle, 3 = work, 4 = break
    pub editing_field: usize,
}

impl TimerFormState {
    fn from_config(config: &TimerConfig) -> Self {
        Self {
            hours: config.hours.to_string(),
            minutes: config.minutes.to_string(),
            enable_breaks: config.enable_breaks,
            work_interval: config.work_interval.to_string(),
            break_interval: config.break_interval.to_string(),
            editing_field: 0,
        }
    }

    pub fn to_config(&self) -> TimerConfig {
        TimerConfig::from_inputs(
            &self.hours,
            &self.minutes,
            self.enable_breaks,
            &self.work_interval,
            &self.break_interval,
        )
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.editing_field {
            0 => Some(&mut self.hours),
            1 => Some(&mut self.minutes),
            3 => Some(&mut self.work_interval),
            4 => Some(&mut self.break_interval),
            _ => None,
        }
    }
}

/// Rows of the task list as last drawn, for mapping mouse positions
#[derive(Debug, Clone, Copy, Default)]
pub struct ListGeometry {
    /// Screen row of the first task
    pub top: u16,
    /// Number of visible task rows
    pub height: u16,
    /// Index of the first visible task
    pub offset: usize,
}

/// Footer message: a failure or a timer notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Notice(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Notice(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub timer: IntervalTimer,
    pub timer_config: TimerConfig,
    storage: Rc<dyn Storage>,
    notifier: Box<dyn Notifier>,
    second_ticker: SecondTicker,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub status_menu: Option<StatusMenuState>,
    pub drag: Option<DragState>,
    pub timer_form: Option<TimerFormState>,
    pub show_timer: bool,
    pub dark_mode: bool,
    /// Last error or notice shown in the footer
    pub status_message: Option<StatusMessage>,
    pub list_geometry: ListGeometry,
}

impl AppState {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self::with_notifier(storage, Box::new(SystemNotifier))
    }

    pub fn with_notifier(storage: Rc<dyn Storage>, notifier: Box<dyn Notifier>) -> Self {
        let store = TaskStore::load(storage.clone());
        let timer_config = load_timer_config(storage.as_ref());
        let show_timer = load_flag(storage.as_ref(), TIMER_VISIBLE_KEY, true);
        let dark_mode = load_flag(storage.as_ref(), THEME_KEY, false);

        Self {
            store,
            timer: IntervalTimer::new(),
            timer_config,
            storage,
            notifier,
            second_ticker: SecondTicker::new(Instant::now()),
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            status_menu: None,
            drag: None,
            timer_form: None,
            show_timer,
            dark_mode,
            status_message: None,
            list_geometry: ListGeometry::default(),
        }
    }

    /// Record a failed operation in the footer instead of aborting
    fn report<T>(&mut self, action: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                error!(action, error = %format!("{err:#}"), "operation failed");
                self.status_message = Some(StatusMessage::Error(format!(
                    "Could not {}: {:#}",
                    action, err
                )));
                None
            }
        }
    }

    // ---- selection ------------------------------------------------------

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.store.tasks().get(self.selected_index).map(|t| t.id())
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.store.len() {
            self.selected_index += 1;
        }
    }

    /// Keep the selection on `id` after the list moved around
    fn follow(&mut self, id: TaskId) {
        if let Some(index) = self.store.position(id) {
            self.selected_index = index;
        }
    }

    fn clamp_selection(&mut self) {
        if self.store.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.store.len() {
            self.selected_index = self.store.len() - 1;
        }
    }

    /// Jump the selection to the first task of navigator segment `segment`
    pub fn jump_to_segment(&mut self, segment: usize) {
        if let Some(index) = navigator::first_index(segment, self.store.len()) {
            self.selected_index = index;
        }
    }

    // ---- adding tasks ---------------------------------------------------

    pub fn start_add_tasks(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTasks;
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
        }
    }

    pub fn input_form_newline(&mut self) {
        self.input_form_add_char('\n');
    }

    /// Pasted text may span several lines; each becomes a task on submit.
    /// Terminals may send pasted line breaks as CRLF or a bare CR.
    pub fn input_form_paste(&mut self, text: &str) {
        if let Some(form) = &mut self.input_form {
            form.text.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
        }
    }

    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            self.ui_mode = UiMode::Normal;
            let result = self.store.add_tasks(&form.text);
            if let Some(ids) = self.report("save new tasks", result) {
                if let Some(last) = ids.last() {
                    self.follow(*last);
                }
            }
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // ---- status menu ----------------------------------------------------

    pub fn open_status_menu(&mut self) {
        if let Some(task_id) = self.selected_task_id() {
            let selected = self
                .store
                .get(task_id)
                .map(|t| t.status.priority())
                .unwrap_or(0);
            self.status_menu = Some(StatusMenuState { task_id, selected });
            self.ui_mode = UiMode::StatusMenu;
        }
    }

    pub fn status_menu_up(&mut self) {
        if let Some(menu) = &mut self.status_menu {
            menu.selected = menu.selected.saturating_sub(1);
        }
    }

    pub fn status_menu_down(&mut self) {
        if let Some(menu) = &mut self.status_menu {
            if menu.selected + 1 < STATUS_MENU_LEN {
                menu.selected += 1;
            }
        }
    }

    /// Apply the highlighted menu entry
    pub fn status_menu_choose(&mut self) {
        let Some(selected) = self.status_menu.as_ref().map(|m| m.selected) else {
            return;
        };
        match Status::ALL.get(selected) {
            Some(status) => self.status_menu_set(*status),
            None => self.status_menu_delete(),
        }
    }

    pub fn status_menu_set(&mut self, status: Status) {
        if let Some(menu) = self.close_status_menu() {
            let result = self.store.set_status(menu.task_id, status);
            self.report("save status", result);
            self.follow(menu.task_id);
        }
    }

    pub fn status_menu_delete(&mut self) {
        if let Some(menu) = self.close_status_menu() {
            let result = self.store.delete(menu.task_id);
            self.report("delete task", result);
            self.clamp_selection();
        }
    }

    pub fn close_status_menu(&mut self) -> Option<StatusMenuState> {
        self.ui_mode = UiMode::Normal;
        self.status_menu.take()
    }

    /// Delete the selected task without going through the menu
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.store.delete(id);
            self.report("delete task", result);
            self.clamp_selection();
        }
    }

    // ---- drag and drop --------------------------------------------------

    /// Pick up the selected task
    pub fn start_drag(&mut self) {
        if let Some(moved) = self.selected_task_id() {
            self.drag = Some(DragState {
                moved,
                target_index: self.selected_index,
                by_mouse: false,
            });
            self.ui_mode = UiMode::Dragging;
        }
    }

    pub fn drag_target_up(&mut self) {
        if let Some(drag) = &mut self.drag {
            drag.target_index = drag.target_index.saturating_sub(1);
        }
    }

    pub fn drag_target_down(&mut self) {
        let len = self.store.len();
        if let Some(drag) = &mut self.drag {
            if drag.target_index + 1 < len {
                drag.target_index += 1;
            }
        }
    }

    /// Drop the carried task onto the current target row
    pub fn drop_dragged(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        let Some(target) = self.store.tasks().get(drag.target_index).map(|t| t.id()) else {
            return;
        };
        let result = self.store.reorder(drag.moved, target);
        if let Some(true) = self.report("save new order", result) {
            debug!(target_index = drag.target_index, "drop applied");
        }
        self.follow(drag.moved);
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Task index under screen row `row`, if any
    pub fn index_at_row(&self, row: u16) -> Option<usize> {
        let geometry = self.list_geometry;
        if row < geometry.top || row >= geometry.top + geometry.height {
            return None;
        }
        let index = geometry.offset + usize::from(row - geometry.top);
        (index < self.store.len()).then_some(index)
    }

    pub fn mouse_down(&mut self, row: u16) {
        if self.ui_mode != UiMode::Normal {
            return;
        }
        if let Some(index) = self.index_at_row(row) {
            self.selected_index = index;
            self.start_drag();
            if let Some(drag) = &mut self.drag {
                drag.by_mouse = true;
            }
        }
    }

    pub fn mouse_drag(&mut self, row: u16) {
        let Some(index) = self.index_at_row(row) else {
            return;
        };
        if let Some(drag) = &mut self.drag {
            if drag.by_mouse {
                drag.target_index = index;
            }
        }
    }

    /// Release over a row drops there; release anywhere else cancels
    pub fn mouse_up(&mut self, row: u16) {
        if !self.drag.as_ref().is_some_and(|d| d.by_mouse) {
            return;
        }
        match self.index_at_row(row) {
            Some(index) => {
                if let Some(drag) = &mut self.drag {
                    drag.target_index = index;
                }
                self.drop_dragged();
            }
            None => self.cancel_drag(),
        }
    }

    // ---- clear all ------------------------------------------------------

    pub fn request_clear_all(&mut self) {
        if !self.store.is_empty() {
            self.ui_mode = UiMode::ConfirmClear;
        }
    }

    pub fn confirm_clear_all(&mut self, confirmed: bool) {
        self.ui_mode = UiMode::Normal;
        if confirmed {
            let result = self.store.clear_all();
            self.report("clear tasks", result);
            self.selected_index = 0;
        }
    }

    // ---- timer ----------------------------------------------------------

    pub fn open_timer_form(&mut self) {
        self.timer_form = Some(TimerFormState::from_config(&self.timer_config));
        self.ui_mode = UiMode::TimerConfig;
    }

    pub fn timer_form_next_field(&mut self) {
        if let Some(form) = &mut self.timer_form {
            form.editing_field = (form.editing_field + 1) % TIMER_FORM_FIELDS;
        }
    }

    pub fn timer_form_prev_field(&mut self) {
        if let Some(form) = &mut self.timer_form {
            form.editing_field = (form.editing_field + TIMER_FORM_FIELDS - 1) % TIMER_FORM_FIELDS;
        }
    }

    pub fn timer_form_add_char(&mut self, c: char) {
        let changed = match self.timer_form.as_mut().and_then(|f| f.field_mut()) {
            Some(field) if c.is_ascii_digit() && field.len() < 4 => {
                field.push(c);
                true
            }
            _ => false,
        };
        if changed {
            self.timer_form_changed();
        }
    }

    pub fn timer_form_backspace(&mut self) {
        let changed = self
            .timer_form
            .as_mut()
            .and_then(|f| f.field_mut())
            .and_then(|field| field.pop())
            .is_some();
        if changed {
            self.timer_form_changed();
        }
    }

    pub fn timer_form_toggle_breaks(&mut self) {
        if let Some(form) = &mut self.timer_form {
            form.enable_breaks = !form.enable_breaks;
        }
        self.timer_form_changed();
    }

    /// Every edit is saved straight away
    fn timer_form_changed(&mut self) {
        if let Some(config) = self.timer_form.as_ref().map(TimerFormState::to_config) {
            self.timer_config = config;
            let result = save_timer_config(self.storage.as_ref(), &config);
            self.report("save timer settings", result);
        }
    }

    /// Close the form and start a run with its settings
    pub fn submit_timer_form(&mut self) {
        if let Some(form) = self.timer_form.take() {
            self.ui_mode = UiMode::Normal;
            self.timer_config = form.to_config();
            self.start_timer();
        }
    }

    pub fn cancel_timer_form(&mut self) {
        self.timer_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Start a run with the saved configuration
    pub fn start_timer(&mut self) {
        let config = self.timer_config;
        let result = save_timer_config(self.storage.as_ref(), &config);
        self.report("save timer settings", result);

        self.timer.start(&config);
        self.second_ticker.reset(Instant::now());
        self.show_timer = true;
        info!(
            total_seconds = self.timer.total_seconds(),
            breaks = config.enable_breaks,
            "timer started"
        );
    }

    /// Pause a running timer or resume a paused one
    pub fn toggle_timer_pause(&mut self) {
        let result = match self.timer.state() {
            TimerState::Running => self.timer.pause(),
            TimerState::Paused => {
                self.second_ticker.reset(Instant::now());
                self.timer.resume()
            }
            TimerState::Idle => return,
        };
        if let Err(err) = result {
            debug!(error = %err, "timer transition ignored");
        }
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        info!("timer reset");
    }

    /// Advance the timer by whatever whole seconds passed since the last call
    pub fn tick(&mut self, now: Instant) {
        let due = self.second_ticker.due(now);
        if self.timer.state() == TimerState::Running {
            self.advance_timer(due);
        }
    }

    /// Advance the timer by `seconds` ticks, signalling every event
    pub fn advance_timer(&mut self, seconds: u64) {
        for _ in 0..seconds {
            if let Some(event) = self.timer.tick() {
                self.on_timer_event(event);
            }
            if self.timer.state() != TimerState::Running {
                break;
            }
        }
    }

    fn on_timer_event(&mut self, event: TimerEvent) {
        info!(?event, completed = self.timer.completed_work_intervals(), "timer event");
        self.notifier.notify(event);
        self.status_message = Some(StatusMessage::Notice(
            notifications::event_message(event).to_string(),
        ));
    }

    // ---- flags ----------------------------------------------------------

    pub fn toggle_timer_visible(&mut self) {
        self.show_timer = !self.show_timer;
        let result = save_flag(self.storage.as_ref(), TIMER_VISIBLE_KEY, self.show_timer);
        self.report("save timer visibility", result);
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        let result = save_flag(self.storage.as_ref(), THEME_KEY, self.dark_mode);
        self.report("save theme", result);
    }

    pub fn dismiss_message(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimerMode;
    use crate::persistence::storage::testing::FlakyStorage;
    use crate::persistence::{load_task_records, MemoryStorage};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNotifier {
        events: Rc<RefCell<Vec<TimerEvent>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, event: TimerEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    fn create_test_app() -> (AppState, Rc<MemoryStorage>, Rc<RefCell<Vec<TimerEvent>>>) {
        let storage = Rc::new(MemoryStorage::new());
        let notifier = RecordingNotifier::default();
        let events = notifier.events.clone();
        let app = AppState::with_notifier(storage.clone(), Box::new(notifier));
        (app, storage, events)
    }

    fn add(app: &mut AppState, text: &str) {
        app.start_add_tasks();
        app.input_form_paste(text);
        app.submit_input_form();
    }

    fn texts(app: &AppState) -> Vec<String> {
        app.store.tasks().iter().map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn test_app_state_new() {
        let (app, _storage, _events) = create_test_app();
        assert!(app.store.is_empty());
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.show_timer);
        assert!(!app.dark_mode);
        assert_eq!(app.timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_add_tasks_through_form() {
        let (mut app, storage, _events) = create_test_app();
        app.start_add_tasks();
        for c in "First".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_newline();
        app.input_form_paste("Second\r\nThird");
        app.input_form_backspace();
        app.submit_input_form();

        assert_eq!(texts(&app), vec!["first", "second", "thir"]);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.selected_index, 2);
        assert_eq!(load_task_records(storage.as_ref()).len(), 3);
    }

    #[test]
    fn test_paste_with_carriage_return_line_breaks() {
        let (mut app, _storage, _events) = create_test_app();
        add(&mut app, "Alpha\rBeta\r\rGamma\r\nDelta");

        assert_eq!(texts(&app), vec!["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn test_cancel_input_form() {
        let (mut app, _storage, _events) = create_test_app();
        app.start_add_tasks();
        app.input_form_add_char('x');
        app.cancel_input_form();
        assert!(app.store.is_empty());
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_move_selection() {
        let (mut app, _storage, _events) = create_test_app();
        add(&mut app, "a\nb");
        app.selected_index = 0;

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_status_menu_changes_status_and_follows_task() {
        let (mut app, _storage, _events) = create_test_app();
        add(&mut app, "a\nb\nc");
        app.selected_index = 0;

        app.open_status_menu();
        assert_eq!(app.ui_mode, UiMode::StatusMenu);
        app.status_menu_down();
        app.status_menu_down();
        app.status_menu_choose();

        assert_eq!(texts(&app), vec!["b", "c", "a"]);
        assert_eq!(app.store.tasks()[2].status, Status::Done);
        assert_eq!(app.selected_index, 2);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_status_menu_delete_entry() {
        let (mut app, _storage, _events) = create_test_app();
        add(&mut app, "a\nb");
        app.selected_index = 1;

        app.open_status_menu();
        for _ in 0..10 {
            app.status_menu_down();
        }
        assert_eq!(app.status_menu.as_ref().map(|m| m.selected), Some(Status::ALL.len()));
        app.status_menu_choose();

        assert_eq!(texts(&app), vec!["a"]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_keyboard_drag_and_drop() {
        let (mut app, storage, _events) = create_test_app();
        add(&mut app, "a\nb\nc");
        app.selected_index = 0;

        app.start_drag();
        app.drag_target_down();
        app.drag_target_down();
        app.drag_target_down();
        app.drop_dragged();

        assert_eq!(texts(&app), vec!["b", "c", "a"]);
        assert_eq!(app.selected_index, 2);
        let saved: Vec<String> = load_task_records(storage.as_ref())
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(saved, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_cancel_drag_keeps_order() {
        let (mut app, _storage, _events) = create_test_app();
        add(&mut app, "a\nb");
        app.selected_index = 1;
        app.start_drag();
        app.drag_target_up();
        app.cancel_drag();
        assert_eq!(texts(&app), vec!["a", "b"]);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_mouse_drag_maps_rows_to_tasks() {
        let (mut app, _storage, _events) = create_test_app();
        add(&mut app, "a\nb\nc\nd");
        app.list_geometry = ListGeometry {
            top: 3,
            height: 10,
            offset: 0,
        };

        assert_eq!(app.index_at_row(2), None);
        assert_eq!(app.index_at_row(3), Some(0));
        assert_eq!(app.index_at_row(7), None);

        app.mouse_down(6);
        assert_eq!(app.ui_mode, UiMode::Dragging);
        app.mouse_drag(5);
        app.mouse_up(4);

        assert_eq!(texts(&app), vec!["a", "d", "b", "c"]);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_mouse_release_outside_list_cancels() {
        let (mut app, _storage, _events) = create_test_app();
        add(&mut app, "a\nb");
        app.list_geometry = ListGeometry {
            top: 1,
            height: 5,
            offset: 0,
        };

        app.mouse_down(1);
        app.mouse_up(20);
        assert!(app.drag.is_none());
        assert_eq!(texts(&app), vec!["a", "b"]);
    }

    #[test]
    fn test_clear_all_requires_confirmation_step() {
        let (mut app, storage, _events) = create_test_app();
        add(&mut app, "a\nb");

        app.request_clear_all();
        assert_eq!(app.ui_mode, UiMode::ConfirmClear);
        app.confirm_clear_all(false);
        assert_eq!(app.store.len(), 2);

        app.request_clear_all();
        app.confirm_clear_all(true);
        assert!(app.store.is_empty());
        assert!(load_task_records(storage.as_ref()).is_empty());
    }

    #[test]
    fn test_jump_to_segment() {
        let (mut app, _storage, _events) = create_test_app();
        add(&mut app, "1\n2\n3\n4\n5\n6\n7");

        app.jump_to_segment(1);
        assert_eq!(app.selected_index, 5);
        app.jump_to_segment(4);
        assert_eq!(app.selected_index, 5);
        app.jump_to_segment(0);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_persistence_failure_is_surfaced() {
        let storage = Rc::new(FlakyStorage::default());
        let mut app =
            AppState::with_notifier(storage.clone(), Box::new(RecordingNotifier::default()));
        storage.fail_writes.set(true);

        add(&mut app, "keep me");
        assert_eq!(texts(&app), vec!["keep me"]);
        let message = app.status_message.clone().unwrap();
        assert!(message.is_error());
        assert!(message.text().contains("save new tasks"));
        assert!(message.text().contains("storage unavailable"));
    }

    #[test]
    fn test_tasks_reload_into_new_app() {
        let (mut app, storage, _events) = create_test_app();
        add(&mut app, "a\nb");
        app.selected_index = 0;
        app.open_status_menu();
        app.status_menu_set(Status::Later);

        let reloaded = AppState::with_notifier(storage.clone(), Box::new(RecordingNotifier::default()));
        assert_eq!(texts(&reloaded), vec!["b", "a"]);
        assert_eq!(reloaded.store.tasks()[1].status, Status::Later);
    }

    #[test]
    fn test_timer_form_saves_on_every_change() {
        let (mut app, storage, _events) = create_test_app();
        app.open_timer_form();
        app.timer_form_next_field();
        app.timer_form_backspace();
        app.timer_form_add_char('2');
        app.timer_form_add_char('x');

        assert_eq!(app.timer_config.minutes, 2);
        assert_eq!(load_timer_config(storage.as_ref()).minutes, 2);

        app.timer_form_next_field();
        app.timer_form_toggle_breaks();
        assert!(load_timer_config(storage.as_ref()).enable_breaks);

        app.cancel_timer_form();
        assert_eq!(app.timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_timer_runs_and_signals() {
        let (mut app, storage, events) = create_test_app();
        app.open_timer_form();
        if let Some(form) = &mut app.timer_form {
            form.minutes = "3".to_string();
            form.enable_breaks = true;
            form.work_interval = "1".to_string();
            form.break_interval = "1".to_string();
        }
        app.submit_timer_form();
        assert_eq!(app.timer.state(), TimerState::Running);
        assert_eq!(load_timer_config(storage.as_ref()).minutes, 3);

        app.advance_timer(60);
        assert_eq!(app.timer.mode(), TimerMode::Break);
        assert_eq!(
            app.status_message,
            Some(StatusMessage::Notice("Time for a break".to_string()))
        );

        app.toggle_timer_pause();
        assert_eq!(app.timer.state(), TimerState::Paused);
        app.tick(Instant::now() + std::time::Duration::from_secs(30));
        assert_eq!(app.timer.remaining_seconds(), 120);
        app.toggle_timer_pause();

        app.advance_timer(500);
        assert_eq!(app.timer.state(), TimerState::Idle);
        assert_eq!(
            *events.borrow(),
            vec![
                TimerEvent::BreakStarted,
                TimerEvent::WorkStarted,
                TimerEvent::Completed
            ]
        );
    }

    #[test]
    fn test_reset_timer() {
        let (mut app, _storage, _events) = create_test_app();
        app.timer_config = TimerConfig::from_inputs("0", "5", false, "", "");
        app.start_timer();
        app.advance_timer(10);
        app.reset_timer();
        assert_eq!(app.timer.state(), TimerState::Idle);
        assert_eq!(app.timer.remaining_seconds(), 0);
    }

    #[test]
    fn test_flags_persist() {
        let (mut app, storage, _events) = create_test_app();
        app.toggle_timer_visible();
        app.toggle_theme();

        assert!(!load_flag(storage.as_ref(), TIMER_VISIBLE_KEY, true));
        assert!(load_flag(storage.as_ref(), THEME_KEY, false));
    }
}
