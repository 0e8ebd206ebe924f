//! Label widget

use crate::foundation::math::{hex_to_vec4, Vec4};
use crate::props::{keys, PropsBase};

/// Default label text color
pub const DEFAULT_TEXT_COLOR: &str = "#141414ff";

/// Static text; transparent to the pointer, so whatever lies under it gets the input
#[derive(Debug, Clone, PartialEq)]
pub struct UILabel {
    text: String,
    color: Vec4,
}

impl UILabel {
    /// Label in the default text color
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: hex_to_vec4(DEFAULT_TEXT_COLOR).unwrap_or_else(|| Vec4::new(0.0, 0.0, 0.0, 1.0)),
        }
    }

    /// Builder: text color
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Displayed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text color
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Write text and color into the element's properties
    pub fn apply(&self, props: &mut PropsBase) {
        props.set(keys::TEXT, self.text.as_str());
        props.set(keys::COLOR, self.color);
    }

    /// Replace the text
    pub fn set_text(&mut self, text: impl Into<String>, props: &mut PropsBase) {
        self.text = text.into();
        self.apply(props);
    }
}
