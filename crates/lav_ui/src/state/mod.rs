//! Window-level input state

pub mod window_state;

pub use window_state::{MouseButtons, UIWindowState};
