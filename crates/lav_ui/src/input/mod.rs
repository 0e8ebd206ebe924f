//! Input classification
//!
//! Raw backend input ([`InputEvent`]) goes in, element-targeted [`crate::events::UIEvent`]s
//! come out.

pub mod hit_test;
pub mod processor;

use crate::foundation::math::Vec2;

pub use hit_test::{hit_test, is_attached};
pub use processor::{RoutedEvent, UIInputProcessor};

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// Button went down
    Press,
    /// Button went up
    Release,
}

/// Raw input as delivered by the windowing backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to a window-space position
    CursorMoved(Vec2),
    /// Mouse button changed state
    MouseButton {
        /// Which button
        button: MouseButton,
        /// Press or release
        action: ButtonAction,
    },
    /// Scroll wheel moved
    Scroll(Vec2),
    /// Cursor left the window
    CursorLeft,
    /// Window framebuffer resized
    Resized {
        /// New width in pixels
        width: f32,
        /// New height in pixels
        height: f32,
    },
}

impl InputEvent {
    /// Cursor move from coordinates
    pub fn cursor(x: f32, y: f32) -> Self {
        InputEvent::CursorMoved(Vec2::new(x, y))
    }

    /// Button press
    pub fn press(button: MouseButton) -> Self {
        InputEvent::MouseButton { button, action: ButtonAction::Press }
    }

    /// Button release
    pub fn release(button: MouseButton) -> Self {
        InputEvent::MouseButton { button, action: ButtonAction::Release }
    }

    /// Vertical scroll
    pub fn scroll(y: f32) -> Self {
        InputEvent::Scroll(Vec2::new(0.0, y))
    }
}
