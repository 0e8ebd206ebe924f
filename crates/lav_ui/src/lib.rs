//! # lav_ui
//!
//! A retained-mode UI composition engine: a tree of typed elements, each carrying a layout
//! specification, a property set and typed event handlers.
//!
//! ## Features
//!
//! - **Layout**: Parent-relative position/scale/inset specifications resolved into pixel boxes
//! - **Properties**: Key/value element configuration with value-based change tracking
//! - **Events**: Closed set of typed events, bubbling dispatch, consumption
//! - **Widgets**: Panes with scrollbars, split panes, buttons, images, labels, sliders and tree views
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lav_ui::prelude::*;
//!
//! let mut window = UIWindow::new(800, 600);
//! let button = UIBase::button(
//!     LayoutBase::new()
//!         .with_position(PositionXY::rel(0.5, 0.5))
//!         .with_scale(ScaleXY::px(120.0, 40.0))
//!         .with_anchor(Anchor::Center),
//! );
//! button.borrow_mut().events.subscribe::<MouseButtonEvt, _>(|e| {
//!     println!("clicked at {:?}", e.pos);
//!     true
//! });
//! window.add(button).unwrap();
//!
//! window.send(InputEvent::cursor(400.0, 300.0));
//! window.send(InputEvent::press(MouseButton::Left));
//! window.update();
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod foundation;
pub mod input;
pub mod layout;
pub mod props;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

pub use error::{PropError, TreeError, UIError, UIResult};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        core::config::{Config, UiConfig},
        error::{PropError, TreeError, UIError, UIResult},
        events::{
            EventKind, EventPayload, Events, MouseButtonEvt, MouseDragEvt, MouseEnterEvt,
            MouseExitEvt, MouseMoveEvt, MouseMoveScanEvt, MouseScrollEvt, SliderEvt,
            SubscriptionId, UIEvent,
        },
        foundation::math::{Vec2, Vec4},
        input::{ButtonAction, InputEvent, MouseButton},
        layout::{
            Anchor, BasicCalculator, BoundingBox, LayoutBase, Position, PositionXY, Scale, ScaleXY,
            TBLR,
        },
        props::{keys, PropValue, PropsBase},
        state::UIWindowState,
        ui::{
            DrawElement, ElementId, ItemPath, Orientation, SplitSlot, TreeChange, TreeItem, UIBase,
            UIRef, UIRenderBackend, UISplitPane, UIWindow, VariantKind,
        },
    };
}
