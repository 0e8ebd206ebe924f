//! # Core Module
//!
//! Shared abstractions used across the crate.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for windows, input and widgets

pub mod config;

pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    UiConfig,
    WindowConfig,
    InputConfig,
    TreeViewConfig,
    PaneConfig,
    SplitPaneConfig,
    LoggingConfig,
    Config,
    ConfigError,
};
