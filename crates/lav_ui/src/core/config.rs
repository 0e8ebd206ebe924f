//! # Unified Configuration System
//!
//! Configuration for the UI engine: window defaults, input tuning, widget defaults and
//! logging. Every section is serializable and can be loaded from TOML or RON through the
//! [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Window Config**: Title and initial size seeding the root bounding box
//! - **Input Config**: Scroll sensitivities for panes and sliders
//! - **Tree View Config**: Row height and per-depth indentation
//! - **Pane Config**: Scrollbar thickness
//! - **Split Pane Config**: Handle thickness and color
//! - **Logging Config**: Default log filter

use serde::{Serialize, Deserialize};

use crate::foundation::math::{hex_to_vec4, Vec4};

pub use crate::config::{Config, ConfigError};

/// # Window Configuration
///
/// Initial geometry for a [`crate::ui::UIWindow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width in pixels
    pub width: u32,
    /// Initial height in pixels
    pub height: u32,
}

impl WindowConfig {
    /// Create a window configuration
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("lav", 800, 600)
    }
}

/// # Input Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Pixels a pane scrolls per scroll-wheel unit
    pub pane_scroll_step: f32,
    /// Fraction of a slider's range moved per scroll-wheel unit
    pub slider_scroll_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pane_scroll_step: 20.0,
            slider_scroll_sensitivity: 0.01,
        }
    }
}

/// # Tree View Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeViewConfig {
    /// Height of a single row in pixels
    pub row_size: f32,
    /// Horizontal indentation per nesting level in pixels
    pub indent: f32,
    /// Show a vertical scrollbar when rows overflow
    pub scrollbar: bool,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            row_size: 30.0,
            indent: 20.0,
            scrollbar: false,
        }
    }
}

/// # Pane Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneConfig {
    /// Scrollbar thickness in pixels
    pub scrollbar_size: f32,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self { scrollbar_size: 20.0 }
    }
}

/// # Split Pane Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitPaneConfig {
    /// Handle thickness along the split axis in pixels
    pub handle_size: f32,
    /// Handle color as `#rrggbb` or `#rrggbbaa`
    pub handle_color: String,
}

impl SplitPaneConfig {
    /// Parsed handle color, `None` if the hex string is malformed
    pub fn handle_color(&self) -> Option<Vec4> {
        hex_to_vec4(&self.handle_color)
    }
}

impl Default for SplitPaneConfig {
    fn default() -> Self {
        Self {
            handle_size: 10.0,
            handle_color: "#757575ff".to_string(),
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// # Complete UI Configuration
///
/// Top-level configuration that encompasses all sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Window defaults
    pub window: WindowConfig,
    /// Input tuning
    pub input: InputConfig,
    /// Tree view defaults
    pub tree_view: TreeViewConfig,
    /// Scroll pane defaults
    pub pane: PaneConfig,
    /// Split pane defaults
    pub split_pane: SplitPaneConfig,
    /// Logging defaults
    pub logging: LoggingConfig,
}

impl UiConfig {
    /// Create a configuration with the given window title and defaults elsewhere
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig {
                title: title.into(),
                ..WindowConfig::default()
            },
            ..Self::default()
        }
    }

    /// Set the initial window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set the tree view row size and indentation
    pub fn with_tree_rows(mut self, row_size: f32, indent: f32) -> Self {
        self.tree_view.row_size = row_size;
        self.tree_view.indent = indent;
        self
    }

    /// Set the default log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        if self.tree_view.row_size <= 0.0 {
            return Err(ConfigError::Invalid("tree view row size must be positive".to_string()));
        }

        if self.tree_view.indent < 0.0 {
            return Err(ConfigError::Invalid("tree view indent cannot be negative".to_string()));
        }

        if !self.input.pane_scroll_step.is_finite() || !self.input.slider_scroll_sensitivity.is_finite() {
            return Err(ConfigError::Invalid("scroll sensitivities must be finite".to_string()));
        }

        for (name, size) in [
            ("scrollbar size", self.pane.scrollbar_size),
            ("split handle size", self.split_pane.handle_size),
        ] {
            if !size.is_finite() || size < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be finite and non-negative, got {}", name, size)));
            }
        }

        if self.split_pane.handle_color().is_none() {
            return Err(ConfigError::Invalid(format!(
                "split handle color is not a hex color: {:?}",
                self.split_pane.handle_color
            )));
        }

        Ok(())
    }
}

impl Config for UiConfig {}
