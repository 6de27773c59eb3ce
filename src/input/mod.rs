mod handler;

pub use handler::{handle_key, handle_mouse, handle_paste};
