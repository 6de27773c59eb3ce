pub mod documents;
pub mod files;
pub mod storage;

pub use documents::{
    load_flag, load_task_records, load_timer_config, save_flag, save_task_records,
    save_timer_config, THEME_KEY, TIMER_VISIBLE_KEY,
};
pub use files::{ensure_data_dir, init_local_dir, log_file};
pub use storage::{FileStorage, MemoryStorage, Storage};
