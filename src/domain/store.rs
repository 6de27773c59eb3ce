use super::enums::Status;
use super::ordering::{self, split_input};
use super::task::{Task, TaskId, TaskRecord};
use crate::persistence::{load_task_records, save_task_records, Storage};
use anyhow::Result;
use std::rc::Rc;
use tracing::{debug, info};

/// Ordered task collection mirrored into storage.
///
/// Every mutating operation applies its change in memory first and then
/// writes the whole list synchronously. A failed write is returned to the
/// caller; the in-memory list keeps the change.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Rc<dyn Storage>,
}

impl TaskStore {
    /// Empty store writing to `storage`
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            tasks: Vec::new(),
            storage,
        }
    }

    /// Store restored from the saved task document
    #[tracing::instrument(skip_all)]
    pub fn load(storage: Rc<dyn Storage>) -> Self {
        let records = load_task_records(storage.as_ref());
        let mut store = Self::new(storage);
        store.restore(&records);
        info!(tasks = store.len(), "restored task list");
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    /// Task counts per status, in priority order
    pub fn counts(&self) -> [(Status, usize); 4] {
        ordering::status_counts(&self.tasks)
    }

    /// Add one `doing` task per non-blank line of `raw_input`.
    ///
    /// Blank input is a no-op and does not touch storage.
    #[tracing::instrument(skip(self, raw_input), fields(bytes = raw_input.len()))]
    pub fn add_tasks(&mut self, raw_input: &str) -> Result<Vec<TaskId>> {
        let lines = split_input(raw_input);
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<TaskId> = lines
            .iter()
            .map(|line| {
                let task = Task::new(line, Status::Doing);
                let id = task.id();
                self.tasks.push(task);
                id
            })
            .collect();

        self.regroup();
        debug!(added = ids.len(), total = self.tasks.len(), "tasks added");
        self.persist()?;
        Ok(ids)
    }

    /// Change a task's status. Returns `false` when the task is unknown.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn set_status(&mut self, id: TaskId, status: Status) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) else {
            return Ok(false);
        };
        task.status = status;

        self.regroup();
        debug!(%status, "status changed");
        self.persist()?;
        Ok(true)
    }

    /// Change a task's status from a textual tag.
    ///
    /// An unrecognised tag leaves the list untouched and returns `false`.
    pub fn set_status_tag(&mut self, id: TaskId, tag: &str) -> Result<bool> {
        match tag.parse::<Status>() {
            Ok(status) => self.set_status(id, status),
            Err(err) => {
                debug!(error = %err, "ignoring status change");
                Ok(false)
            }
        }
    }

    /// Remove one task. Remaining tasks keep their relative order.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn delete(&mut self, id: TaskId) -> Result<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        self.tasks.remove(index);

        debug!(index, remaining = self.tasks.len(), "task deleted");
        self.persist()?;
        Ok(true)
    }

    /// Remove every task. Any confirmation belongs to the caller.
    #[tracing::instrument(skip(self))]
    pub fn clear_all(&mut self) -> Result<()> {
        let removed = self.tasks.len();
        self.tasks.clear();

        info!(removed, "cleared all tasks");
        self.persist()
    }

    /// Drop `moved` onto `target`.
    ///
    /// Moving forward lands the task right after the target, moving backward
    /// right before it. The list is not regrouped afterwards, so a task can
    /// sit next to a different status group until the next regroup.
    #[tracing::instrument(skip_all, fields(moved = %moved, target = %target))]
    pub fn reorder(&mut self, moved: TaskId, target: TaskId) -> Result<bool> {
        let (Some(from), Some(to)) = (self.position(moved), self.position(target)) else {
            return Ok(false);
        };
        if !ordering::reorder(&mut self.tasks, from, to) {
            return Ok(false);
        }

        debug!(from, to, "task moved");
        self.persist()?;
        Ok(true)
    }

    /// Stable regroup by status priority
    pub fn regroup(&mut self) {
        ordering::regroup(&mut self.tasks);
    }

    /// Persisted projection of the list in display order
    pub fn serialize(&self) -> Vec<TaskRecord> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    /// Replace the list with `records`, keeping each saved status, then regroup once
    pub fn restore(&mut self, records: &[TaskRecord]) {
        self.tasks = records.iter().map(Task::from).collect();
        self.regroup();
    }

    /// Write the current list to storage
    pub fn persist(&self) -> Result<()> {
        save_task_records(self.storage.as_ref(), &self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::storage::testing::FlakyStorage;
    use crate::persistence::documents::TASKS_KEY;
    use crate::persistence::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn store() -> (TaskStore, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        (TaskStore::new(storage.clone()), storage)
    }

    fn texts(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.text()).collect()
    }

    fn saved(storage: &MemoryStorage) -> Vec<TaskRecord> {
        load_task_records(storage)
    }

    fn id_of(store: &TaskStore, text: &str) -> TaskId {
        store
            .tasks()
            .iter()
            .find(|t| t.text() == text)
            .map(|t| t.id())
            .unwrap()
    }

    #[test]
    fn test_add_tasks_multi_line() {
        let (mut store, storage) = store();
        let ids = store.add_tasks("A\nb\n\nC").unwrap();

        assert_eq!(ids.len(), 3);
        assert_eq!(texts(&store), vec!["a", "b", "c"]);
        assert!(store.tasks().iter().all(|t| t.status == Status::Doing));
        assert_eq!(saved(&storage).len(), 3);
    }

    #[test]
    fn test_add_tasks_blank_is_noop() {
        let (mut store, storage) = store();
        assert!(store.add_tasks("  \n\t\n").unwrap().is_empty());
        assert!(store.is_empty());
        assert_eq!(storage.read(TASKS_KEY).unwrap(), None);
    }

    #[test]
    fn test_add_tasks_lands_at_end_of_doing_group() {
        let (mut store, _storage) = store();
        store.add_tasks("one\ntwo").unwrap();
        let one = id_of(&store, "one");
        store.set_status(one, Status::Later).unwrap();

        store.add_tasks("three").unwrap();
        assert_eq!(texts(&store), vec!["two", "three", "one"]);
    }

    #[test]
    fn test_set_status_regroups_and_persists() {
        let (mut store, storage) = store();
        store.add_tasks("a\nb\nc").unwrap();
        let a = id_of(&store, "a");

        assert!(store.set_status(a, Status::Cancelled).unwrap());
        assert_eq!(texts(&store), vec!["b", "c", "a"]);
        assert_eq!(saved(&storage)[2], TaskRecord::new("a", Status::Cancelled));
    }

    #[test]
    fn test_set_status_unknown_id() {
        let (mut store, _storage) = store();
        store.add_tasks("a").unwrap();
        assert!(!store.set_status(TaskId::new(), Status::Done).unwrap());
    }

    #[test]
    fn test_set_status_tag_rejects_unknown_tag() {
        let (mut store, storage) = store();
        store.add_tasks("a\nb").unwrap();
        let b = id_of(&store, "b");
        let before = saved(&storage);

        assert!(!store.set_status_tag(b, "blocked").unwrap());
        assert_eq!(store.get(b).map(|t| t.status), Some(Status::Doing));
        assert_eq!(saved(&storage), before);

        assert!(store.set_status_tag(b, "done").unwrap());
        assert_eq!(store.get(b).map(|t| t.status), Some(Status::Done));
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let (mut store, storage) = store();
        store.add_tasks("a\nb\nc\nd").unwrap();
        let b = id_of(&store, "b");

        assert!(store.delete(b).unwrap());
        assert_eq!(texts(&store), vec!["a", "c", "d"]);
        assert_eq!(saved(&storage).len(), 3);
        assert!(!store.delete(b).unwrap());
    }

    #[test]
    fn test_delete_does_not_regroup() {
        let (mut store, _storage) = store();
        store.add_tasks("a\nb\nc").unwrap();
        let a = id_of(&store, "a");
        let c = id_of(&store, "c");
        store.set_status(a, Status::Later).unwrap();
        // b, c, a(later) -> drag a before b: a(later), b, c
        store.reorder(a, id_of(&store, "b")).unwrap();
        assert_eq!(texts(&store), vec!["a", "b", "c"]);

        store.delete(c).unwrap();
        assert_eq!(texts(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_clear_all() {
        let (mut store, storage) = store();
        store.add_tasks("a\nb").unwrap();

        store.clear_all().unwrap();
        assert!(store.is_empty());
        assert!(saved(&storage).is_empty());
        assert_eq!(storage.read(TASKS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_reorder_forward_places_after_target() {
        let (mut store, storage) = store();
        store.add_tasks("a\nb\nc").unwrap();
        let c = id_of(&store, "c");
        store.set_status(c, Status::Later).unwrap();
        let a = id_of(&store, "a");

        assert!(store.reorder(a, c).unwrap());
        assert_eq!(texts(&store), vec!["b", "c", "a"]);
        // Not regrouped: a (doing) now follows c (later)
        assert!(!ordering::is_grouped(store.tasks()));
        assert_eq!(saved(&storage)[2].text, "a");
    }

    #[test]
    fn test_reorder_backward_places_before_target() {
        let (mut store, _storage) = store();
        store.add_tasks("a\nb\nc\nd").unwrap();
        let d = id_of(&store, "d");
        let b = id_of(&store, "b");

        assert!(store.reorder(d, b).unwrap());
        assert_eq!(texts(&store), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_reorder_noops() {
        let (mut store, _storage) = store();
        store.add_tasks("a\nb").unwrap();
        let a = id_of(&store, "a");

        assert!(!store.reorder(a, a).unwrap());
        assert!(!store.reorder(a, TaskId::new()).unwrap());
        assert_eq!(texts(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_round_trip_equals_regroup() {
        let (mut store, storage) = store();
        store.add_tasks("a\nb\nc\nd\ne").unwrap();
        store.set_status(id_of(&store, "b"), Status::Done).unwrap();
        store.set_status(id_of(&store, "d"), Status::Later).unwrap();
        // Break grouping on purpose: drag e onto b (forward) so e lands after b
        store.reorder(id_of(&store, "e"), id_of(&store, "b")).unwrap();
        assert!(!ordering::is_grouped(store.tasks()));

        let mut expected = store.serialize();
        let mut regrouped_store = TaskStore::new(Rc::new(MemoryStorage::new()));
        regrouped_store.restore(&expected);
        expected = regrouped_store.serialize();

        let reloaded = TaskStore::load(storage.clone());
        assert_eq!(reloaded.serialize(), expected);
        assert!(ordering::is_grouped(reloaded.tasks()));
    }

    #[test]
    fn test_restore_keeps_statuses_and_case_folds() {
        let (mut store, _storage) = store();
        store.restore(&[
            TaskRecord::new("Later One", Status::Later),
            TaskRecord::new("doing one", Status::Doing),
            TaskRecord::new("gone", Status::Cancelled),
        ]);
        assert_eq!(
            store.serialize(),
            vec![
                TaskRecord::new("doing one", Status::Doing),
                TaskRecord::new("later one", Status::Later),
                TaskRecord::new("gone", Status::Cancelled),
            ]
        );
    }

    #[test]
    fn test_counts() {
        let (mut store, _storage) = store();
        store.add_tasks("a\nb\nc").unwrap();
        store.set_status(id_of(&store, "c"), Status::Done).unwrap();
        assert_eq!(
            store.counts(),
            [
                (Status::Doing, 2),
                (Status::Later, 0),
                (Status::Done, 1),
                (Status::Cancelled, 0)
            ]
        );
    }

    #[test]
    fn test_rejected_changes_do_not_write() {
        let storage = Rc::new(FlakyStorage::default());
        let mut store = TaskStore::new(storage.clone());
        store.add_tasks("a\nb").unwrap();
        assert_eq!(storage.writes.get(), 1);
        let b = id_of(&store, "b");

        assert!(!store.set_status_tag(b, "blocked").unwrap());
        assert!(store.add_tasks("  \n ").unwrap().is_empty());
        assert!(!store.reorder(b, b).unwrap());
        assert_eq!(storage.writes.get(), 1);

        assert!(store.set_status_tag(b, "done").unwrap());
        assert_eq!(storage.writes.get(), 2);
    }

    #[test]
    fn test_write_failure_is_reported_and_change_kept() {
        let storage = Rc::new(FlakyStorage::default());
        let mut store = TaskStore::new(storage.clone());
        store.add_tasks("a").unwrap();

        storage.fail_writes.set(true);
        let err = store.add_tasks("b").unwrap_err();
        assert!(err.to_string().contains("storage unavailable"));
        assert_eq!(texts(&store), vec!["a", "b"]);

        storage.fail_writes.set(false);
        store.persist().unwrap();
        assert_eq!(load_task_records(storage.as_ref()).len(), 2);
    }
}
