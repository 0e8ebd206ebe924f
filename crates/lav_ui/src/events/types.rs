//! Event payloads
//!
//! The event set is closed: every payload is a fixed-shape struct, [`UIEvent`] is the sum
//! over them and [`EventKind`] is its payload-free tag used for subscription lookup.

use crate::foundation::math::Vec2;
use crate::input::{ButtonAction, MouseButton};
use crate::ui::element::ElementId;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Mouse button pressed or released
    MouseButton,
    /// Pointer moved while the left button is held on an element
    MouseDrag,
    /// Pointer entered an element
    MouseEnter,
    /// Pointer left an element
    MouseExit,
    /// Pointer moved
    MouseMove,
    /// Hover pre-pass, sent before any enter/exit/move of the same motion
    MouseMoveScan,
    /// Scroll wheel
    MouseScroll,
    /// Slider value changed
    Slider,
}

impl EventKind {
    /// Every kind, in declaration order
    pub const ALL: [EventKind; 8] = [
        EventKind::MouseButton,
        EventKind::MouseDrag,
        EventKind::MouseEnter,
        EventKind::MouseExit,
        EventKind::MouseMove,
        EventKind::MouseMoveScan,
        EventKind::MouseScroll,
        EventKind::Slider,
    ];

    /// Whether the event travels from the target up to the root
    ///
    /// Enter and exit are delivered to the exact element only.
    pub fn bubbles(self) -> bool {
        !matches!(self, EventKind::MouseEnter | EventKind::MouseExit)
    }
}

/// Mouse button pressed or released
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvt {
    /// Which button
    pub button: MouseButton,
    /// Press or release
    pub action: ButtonAction,
    /// Cursor position
    pub pos: Vec2,
}

impl MouseButtonEvt {
    /// True for a left button press
    pub fn is_left_press(&self) -> bool {
        self.button == MouseButton::Left && self.action == ButtonAction::Press
    }

    /// True for a left button release
    pub fn is_left_release(&self) -> bool {
        self.button == MouseButton::Left && self.action == ButtonAction::Release
    }
}

/// Pointer moved while the left button is held
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseDragEvt {
    /// Current cursor position
    pub pos: Vec2,
    /// Movement since the previous cursor event
    pub delta: Vec2,
    /// Position where the drag started
    pub origin: Vec2,
}

/// Pointer entered an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEnterEvt {
    /// Cursor position
    pub pos: Vec2,
}

/// Pointer left an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseExitEvt {
    /// Cursor position
    pub pos: Vec2,
}

/// Pointer moved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvt {
    /// Cursor position
    pub pos: Vec2,
    /// Movement since the previous cursor event
    pub delta: Vec2,
}

/// Hover scan pre-pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveScanEvt {
    /// Cursor position
    pub pos: Vec2,
}

/// Scroll wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrollEvt {
    /// Cursor position
    pub pos: Vec2,
    /// Scroll amount per axis
    pub offset: Vec2,
}

/// Slider value changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderEvt {
    /// New value in the slider's range
    pub value: f32,
    /// New position in `[0, 1]`
    pub percentage: f32,
    /// Slider that changed
    pub source: ElementId,
}

/// Closed sum over every event payload
#[derive(Debug, Clone, PartialEq)]
pub enum UIEvent {
    /// See [`MouseButtonEvt`]
    MouseButton(MouseButtonEvt),
    /// See [`MouseDragEvt`]
    MouseDrag(MouseDragEvt),
    /// See [`MouseEnterEvt`]
    MouseEnter(MouseEnterEvt),
    /// See [`MouseExitEvt`]
    MouseExit(MouseExitEvt),
    /// See [`MouseMoveEvt`]
    MouseMove(MouseMoveEvt),
    /// See [`MouseMoveScanEvt`]
    MouseMoveScan(MouseMoveScanEvt),
    /// See [`MouseScrollEvt`]
    MouseScroll(MouseScrollEvt),
    /// See [`SliderEvt`]
    Slider(SliderEvt),
}

impl UIEvent {
    /// Tag of this event
    pub fn kind(&self) -> EventKind {
        match self {
            UIEvent::MouseButton(_) => EventKind::MouseButton,
            UIEvent::MouseDrag(_) => EventKind::MouseDrag,
            UIEvent::MouseEnter(_) => EventKind::MouseEnter,
            UIEvent::MouseExit(_) => EventKind::MouseExit,
            UIEvent::MouseMove(_) => EventKind::MouseMove,
            UIEvent::MouseMoveScan(_) => EventKind::MouseMoveScan,
            UIEvent::MouseScroll(_) => EventKind::MouseScroll,
            UIEvent::Slider(_) => EventKind::Slider,
        }
    }

    /// Typed view of the payload
    pub fn payload<E: EventPayload>(&self) -> Option<&E> {
        E::from_event(self)
    }
}

/// Implemented by every payload struct; names its kind at compile time
pub trait EventPayload: Into<UIEvent> + 'static {
    /// Kind this payload is delivered under
    const KIND: EventKind;

    /// Borrow the payload out of an event of matching kind
    fn from_event(event: &UIEvent) -> Option<&Self>;
}

macro_rules! event_payload {
    ($payload:ident, $variant:ident) => {
        impl EventPayload for $payload {
            const KIND: EventKind = EventKind::$variant;

            fn from_event(event: &UIEvent) -> Option<&Self> {
                match event {
                    UIEvent::$variant(e) => Some(e),
                    _ => None,
                }
            }
        }

        impl From<$payload> for UIEvent {
            fn from(e: $payload) -> Self {
                UIEvent::$variant(e)
            }
        }
    };
}

event_payload!(MouseButtonEvt, MouseButton);
event_payload!(MouseDragEvt, MouseDrag);
event_payload!(MouseEnterEvt, MouseEnter);
event_payload!(MouseExitEvt, MouseExit);
event_payload!(MouseMoveEvt, MouseMove);
event_payload!(MouseMoveScanEvt, MouseMoveScan);
event_payload!(MouseScrollEvt, MouseScroll);
event_payload!(SliderEvt, Slider);
