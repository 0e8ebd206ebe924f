//! Window geometry and pointer state

use std::rc::Rc;

use bitflags::bitflags;

use crate::events::ancestry;
use crate::foundation::math::Vec2;
use crate::input::MouseButton;
use crate::layout::BoundingBox;
use crate::ui::element::{UIRef, WeakUIRef};

bitflags! {
    /// Mouse buttons currently held
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        /// Left button
        const LEFT = 1 << 0;
        /// Right button
        const RIGHT = 1 << 1;
        /// Middle button
        const MIDDLE = 1 << 2;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
        }
    }
}

/// State shared by a window's input processing
///
/// Element targets are held weakly: a removed element drops out of the state as soon as
/// its last strong handle goes away.
#[derive(Debug, Clone)]
pub struct UIWindowState {
    /// Window size in pixels
    pub window_size: Vec2,
    /// Size change from the last resize
    pub window_size_delta: Vec2,
    /// Cursor position
    pub mouse_pos: Vec2,
    /// Cursor movement from the last cursor event
    pub mouse_diff: Vec2,
    /// Cursor position at the last left press
    pub press_pos: Vec2,
    /// Last scroll amount
    pub scroll_offset: Vec2,
    /// Held buttons
    pub buttons: MouseButtons,
    /// Left button held and the pointer moved since the press
    pub is_dragging: bool,

    hovered: Option<WeakUIRef>,
    hover_path: Vec<WeakUIRef>,
    prev_hovered: Option<WeakUIRef>,
    clicked: Option<WeakUIRef>,
    selected: Option<WeakUIRef>,
}

impl Default for UIWindowState {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

fn upgrade(target: Option<&WeakUIRef>) -> Option<UIRef> {
    target.and_then(WeakUIRef::upgrade)
}

impl UIWindowState {
    /// State for a window of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            window_size: Vec2::new(width, height),
            window_size_delta: Vec2::zeros(),
            mouse_pos: Vec2::zeros(),
            mouse_diff: Vec2::zeros(),
            press_pos: Vec2::zeros(),
            scroll_offset: Vec2::zeros(),
            buttons: MouseButtons::empty(),
            is_dragging: false,
            hovered: None,
            hover_path: Vec::new(),
            prev_hovered: None,
            clicked: None,
            selected: None,
        }
    }

    /// Box seeding the root layout pass
    pub fn root_box(&self) -> BoundingBox {
        BoundingBox { pos: Vec2::zeros(), size: self.window_size }
    }

    /// Record a new window size
    pub fn resize(&mut self, width: f32, height: f32) {
        let size = Vec2::new(width, height);
        self.window_size_delta = size - self.window_size;
        self.window_size = size;
    }

    /// True while `button` is held
    pub fn is_held(&self, button: MouseButton) -> bool {
        self.buttons.contains(button.into())
    }

    /// Element under the pointer
    pub fn hovered(&self) -> Option<UIRef> {
        upgrade(self.hovered.as_ref())
    }

    /// Hovered element followed by its ancestors, as of the last hover change
    ///
    /// Elements dropped since then are skipped.
    pub fn hover_path(&self) -> Vec<UIRef> {
        self.hover_path.iter().filter_map(WeakUIRef::upgrade).collect()
    }

    /// Element that was under the pointer before the last hover change
    pub fn prev_hovered(&self) -> Option<UIRef> {
        upgrade(self.prev_hovered.as_ref())
    }

    /// Element the left button went down on, while it is held
    pub fn clicked(&self) -> Option<UIRef> {
        upgrade(self.clicked.as_ref())
    }

    /// Element of the most recent left press
    pub fn selected(&self) -> Option<UIRef> {
        upgrade(self.selected.as_ref())
    }

    /// Replace the hovered element, remembering the previous one
    pub fn set_hovered(&mut self, element: Option<&UIRef>) {
        self.prev_hovered = self.hovered.take();
        self.hovered = element.map(Rc::downgrade);
        self.hover_path = element
            .map(|e| ancestry(e).iter().map(Rc::downgrade).collect())
            .unwrap_or_default();
    }

    /// Record the element a left press landed on
    pub fn set_clicked(&mut self, element: Option<&UIRef>) {
        self.clicked = element.map(Rc::downgrade);
        if element.is_some() {
            self.selected = self.clicked.clone();
        }
    }

    /// Forget the pressed element
    pub fn clear_clicked(&mut self) {
        self.clicked = None;
        self.is_dragging = false;
    }
}
