use super::storage::Storage;
use crate::domain::{TaskRecord, TimerConfig};
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Ordered task list
pub const TASKS_KEY: &str = "todo-tasks";
/// Timer configuration
pub const TIMER_CONFIG_KEY: &str = "timer-config";
/// Whether the timer pane is shown
pub const TIMER_VISIBLE_KEY: &str = "timer-visible";
/// Dark theme flag
pub const THEME_KEY: &str = "dark-mode";

/// Read a raw document, treating read failures as absent
fn read_document(storage: &dyn Storage, key: &str) -> Option<String> {
    match storage.read(key) {
        Ok(content) => content.filter(|c| !c.trim().is_empty()),
        Err(err) => {
            warn!(key, error = %format!("{err:#}"), "could not read document; using defaults");
            None
        }
    }
}

/// Load the saved task records in display order.
///
/// A missing or unparsable document yields an empty list. Inside a valid
/// array, records that do not decode (for instance an unknown status) are
/// skipped and the rest are kept.
pub fn load_task_records(storage: &dyn Storage) -> Vec<TaskRecord> {
    let Some(content) = read_document(storage, TASKS_KEY) else {
        return Vec::new();
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&content) {
        Ok(values) => values,
        Err(err) => {
            warn!(key = TASKS_KEY, error = %err, "malformed task document; starting empty");
            return Vec::new();
        }
    };

    let total = values.len();
    let records: Vec<TaskRecord> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(index, error = %err, "skipping malformed task record");
                None
            }
        })
        .collect();

    debug!(loaded = records.len(), total, "loaded task records");
    records
}

/// Replace the saved task list
pub fn save_task_records(storage: &dyn Storage, records: &[TaskRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("failed to encode tasks")?;
    storage.write(TASKS_KEY, &json)
}

/// Load the timer configuration, defaults when absent or malformed
pub fn load_timer_config(storage: &dyn Storage) -> TimerConfig {
    let Some(content) = read_document(storage, TIMER_CONFIG_KEY) else {
        return TimerConfig::default();
    };

    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!(key = TIMER_CONFIG_KEY, error = %err, "malformed timer config; using defaults");
        TimerConfig::default()
    })
}

pub fn save_timer_config(storage: &dyn Storage, config: &TimerConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config).context("failed to encode timer config")?;
    storage.write(TIMER_CONFIG_KEY, &json)
}

/// Load a boolean flag document. Accepts `true`/`false` and their quoted forms.
pub fn load_flag(storage: &dyn Storage, key: &str, default: bool) -> bool {
    let Some(content) = read_document(storage, key) else {
        return default;
    };

    match content.trim().trim_matches('"') {
        "true" => true,
        "false" => false,
        other => {
            warn!(key, value = other, "malformed flag; using default");
            default
        }
    }
}

pub fn save_flag(storage: &dyn Storage, key: &str, value: bool) -> Result<()> {
    storage.write(key, if value { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::persistence::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_tasks_document_is_empty() {
        let storage = MemoryStorage::new();
        assert!(load_task_records(&storage).is_empty());
    }

    #[test]
    fn test_task_records_round_trip() {
        let storage = MemoryStorage::new();
        let records = vec![
            TaskRecord::new("a", Status::Doing),
            TaskRecord::new("b", Status::Cancelled),
        ];
        save_task_records(&storage, &records).unwrap();
        assert_eq!(load_task_records(&storage), records);
    }

    #[test]
    fn test_task_document_shape() {
        let storage = MemoryStorage::new();
        save_task_records(&storage, &[TaskRecord::new("pay rent", Status::Later)]).unwrap();

        let raw = storage.read(TASKS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!([{"text": "pay rent", "status": "later"}]));
    }

    #[test]
    fn test_corrupt_tasks_document_is_empty() {
        let storage = MemoryStorage::new();
        storage.write(TASKS_KEY, "{not json").unwrap();
        assert!(load_task_records(&storage).is_empty());

        storage.write(TASKS_KEY, r#"{"text":"a","status":"doing"}"#).unwrap();
        assert!(load_task_records(&storage).is_empty());
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let storage = MemoryStorage::new();
        storage
            .write(
                TASKS_KEY,
                r#"[{"text":"keep","status":"done"},{"text":"bad","status":"someday"},{"status":"doing"},{"text":"old"}]"#,
            )
            .unwrap();

        assert_eq!(
            load_task_records(&storage),
            vec![
                TaskRecord::new("keep", Status::Done),
                TaskRecord::new("old", Status::Doing),
            ]
        );
    }

    #[test]
    fn test_timer_config_defaults_and_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(load_timer_config(&storage), TimerConfig::default());

        let config = TimerConfig::from_inputs("1", "15", true, "50", "10");
        save_timer_config(&storage, &config).unwrap();
        assert_eq!(load_timer_config(&storage), config);

        storage.write(TIMER_CONFIG_KEY, "[]").unwrap();
        assert_eq!(load_timer_config(&storage), TimerConfig::default());
    }

    #[test]
    fn test_flags() {
        let storage = MemoryStorage::new();
        assert!(!load_flag(&storage, THEME_KEY, false));
        assert!(load_flag(&storage, TIMER_VISIBLE_KEY, true));

        save_flag(&storage, THEME_KEY, true).unwrap();
        assert!(load_flag(&storage, THEME_KEY, false));

        storage.write(THEME_KEY, "\"false\"").unwrap();
        assert!(!load_flag(&storage, THEME_KEY, true));

        storage.write(THEME_KEY, "maybe").unwrap();
        assert!(load_flag(&storage, THEME_KEY, true));
    }
}
