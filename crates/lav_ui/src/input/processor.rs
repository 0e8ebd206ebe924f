//! UI Input Processing
//!
//! Turns raw backend input into element-targeted events, keeping hover, press and drag
//! state in the window's [`UIWindowState`].

use std::rc::Rc;

use log::trace;

use super::hit_test::hit_test;
use super::{ButtonAction, InputEvent, MouseButton};
use crate::events::{
    ancestry, MouseButtonEvt, MouseDragEvt, MouseEnterEvt, MouseExitEvt, MouseMoveEvt, MouseMoveScanEvt,
    MouseScrollEvt, UIEvent,
};
use crate::foundation::math::Vec2;
use crate::state::{MouseButtons, UIWindowState};
use crate::ui::element::UIRef;

/// An event paired with the element it is routed to
#[derive(Debug, Clone)]
pub struct RoutedEvent {
    /// Element the dispatch starts at
    pub target: UIRef,
    /// The event
    pub event: UIEvent,
}

impl RoutedEvent {
    fn new(target: UIRef, event: impl Into<UIEvent>) -> Self {
        Self { target, event: event.into() }
    }
}

/// UI input processor
///
/// Classification only: the caller dispatches the returned events in order.
#[derive(Debug, Default)]
pub struct UIInputProcessor {
    pressed_this_frame: MouseButtons,
    released_this_frame: MouseButtons,
}

impl UIInputProcessor {
    /// Create a new UI input processor
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `button` went down since the last [`Self::reset_frame_flags`]
    pub fn pressed_this_frame(&self, button: MouseButton) -> bool {
        self.pressed_this_frame.contains(button.into())
    }

    /// True if `button` went up since the last [`Self::reset_frame_flags`]
    pub fn released_this_frame(&self, button: MouseButton) -> bool {
        self.released_this_frame.contains(button.into())
    }

    /// Reset per-frame input flags (call after processing the frame's input)
    pub fn reset_frame_flags(&mut self) {
        self.pressed_this_frame = MouseButtons::empty();
        self.released_this_frame = MouseButtons::empty();
    }

    /// Classify one input event
    ///
    /// # Returns
    /// Events to dispatch, in order
    pub fn process(&mut self, state: &mut UIWindowState, root: &UIRef, input: &InputEvent) -> Vec<RoutedEvent> {
        let mut out = Vec::new();
        match *input {
            InputEvent::CursorMoved(pos) => self.cursor_moved(state, root, pos, &mut out),
            InputEvent::MouseButton { button, action } => {
                self.mouse_button(state, root, button, action, &mut out);
            }
            InputEvent::Scroll(offset) => {
                state.scroll_offset = offset;
                if let Some(hovered) = state.hovered() {
                    out.push(RoutedEvent::new(hovered, MouseScrollEvt { pos: state.mouse_pos, offset }));
                }
            }
            InputEvent::CursorLeft => {
                let path = state.hover_path();
                state.set_hovered(None);
                for left in path {
                    out.push(RoutedEvent::new(left, MouseExitEvt { pos: state.mouse_pos }));
                }
            }
            InputEvent::Resized { width, height } => state.resize(width, height),
        }
        trace!("{:?} classified into {} events", input, out.len());
        out
    }

    /// Hover pre-pass: scan event, then exit strictly before enter on a hover change
    ///
    /// Exit goes to every element of the old hover path the pointer left, innermost first;
    /// Enter goes to every element of the new path it reached, outermost first.
    fn scan(&self, state: &mut UIWindowState, root: &UIRef, out: &mut Vec<RoutedEvent>) {
        let pos = state.mouse_pos;
        let hit = hit_test(root, pos);
        if let Some(hit) = &hit {
            out.push(RoutedEvent::new(Rc::clone(hit), MouseMoveScanEvt { pos }));
        }

        let old_path = state.hover_path();
        let new_path = hit.as_ref().map(ancestry).unwrap_or_default();
        let same = old_path.len() == new_path.len()
            && old_path.iter().zip(&new_path).all(|(a, b)| Rc::ptr_eq(a, b));
        if same {
            return;
        }

        state.set_hovered(hit.as_ref());
        for left in old_path.iter().filter(|e| !contains(&new_path, e)) {
            out.push(RoutedEvent::new(Rc::clone(left), MouseExitEvt { pos }));
        }
        for entered in new_path.iter().rev().filter(|e| !contains(&old_path, e)) {
            out.push(RoutedEvent::new(Rc::clone(entered), MouseEnterEvt { pos }));
        }
    }

    fn cursor_moved(&self, state: &mut UIWindowState, root: &UIRef, pos: Vec2, out: &mut Vec<RoutedEvent>) {
        let delta = pos - state.mouse_pos;
        state.mouse_diff = delta;
        state.mouse_pos = pos;

        self.scan(state, root, out);

        if state.is_held(MouseButton::Left) {
            if let Some(clicked) = state.clicked() {
                state.is_dragging = true;
                out.push(RoutedEvent::new(clicked, MouseDragEvt { pos, delta, origin: state.press_pos }));
            }
        }

        if let Some(hovered) = state.hovered() {
            out.push(RoutedEvent::new(hovered, MouseMoveEvt { pos, delta }));
        }
    }

    fn mouse_button(
        &mut self,
        state: &mut UIWindowState,
        root: &UIRef,
        button: MouseButton,
        action: ButtonAction,
        out: &mut Vec<RoutedEvent>,
    ) {
        self.scan(state, root, out);

        let flag = MouseButtons::from(button);
        match action {
            ButtonAction::Press => {
                state.buttons.insert(flag);
                self.pressed_this_frame.insert(flag);
                if button == MouseButton::Left {
                    state.press_pos = state.mouse_pos;
                    let hovered = state.hovered();
                    state.set_clicked(hovered.as_ref());
                }
            }
            ButtonAction::Release => {
                state.buttons.remove(flag);
                self.released_this_frame.insert(flag);
            }
        }

        if let Some(hovered) = state.hovered() {
            out.push(RoutedEvent::new(hovered, MouseButtonEvt { button, action, pos: state.mouse_pos }));
        }

        if action == ButtonAction::Release && button == MouseButton::Left {
            state.clear_clicked();
        }
    }
}

fn contains(path: &[UIRef], element: &UIRef) -> bool {
    path.iter().any(|e| Rc::ptr_eq(e, element))
}
