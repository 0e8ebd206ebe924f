//! Event system
//!
//! Key principles:
//! - Closed set of fixed-shape payloads ([`UIEvent`]), subscription by exact kind
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Per-element registration ([`Events`]), bubbling tree dispatch ([`dispatch()`])

pub mod dispatch;
pub mod registry;
pub mod types;

pub use dispatch::{ancestry, dispatch, dispatch_to, DispatchGuard};
pub use registry::{EventHandler, Events, SubscriptionId};
pub use types::{
    EventKind, EventPayload, MouseButtonEvt, MouseDragEvt, MouseEnterEvt, MouseExitEvt,
    MouseMoveEvt, MouseMoveScanEvt, MouseScrollEvt, SliderEvt, UIEvent,
};
