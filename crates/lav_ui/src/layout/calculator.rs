//! UI layout calculations
//!
//! Converts a layout specification and a parent box into a screen-space bounding box.

use super::geometry::{Anchor, BoundingBox, Position, PositionType, PositionXY, Scale, ScaleType, ScaleXY, TBLR};
use crate::foundation::math::Vec2;

/// Stateless layout calculator shared by every [`super::LayoutBase`]
///
/// Resolution is a direct parent-to-child evaluation: no constraint solving, no iteration.
/// Every numeric input has a defined output, so nothing here can fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCalculator;

impl BasicCalculator {
    /// Resolve a length against the parent extent on the same axis
    pub fn resolve_length(scale: Scale, extent: f32) -> f32 {
        match scale.kind {
            ScaleType::Absolute => scale.value,
            ScaleType::Relative => scale.value * extent,
        }
    }

    /// Resolve a position component into an absolute coordinate
    ///
    /// # Arguments
    /// * `position` - user supplied position component
    /// * `origin` - content box start on this axis
    /// * `extent` - content box extent on this axis
    pub fn resolve_coordinate(position: Position, origin: f32, extent: f32) -> f32 {
        match position.kind {
            PositionType::Absolute => origin + position.value,
            PositionType::Relative => origin + position.value * extent,
        }
    }

    /// Parent box shrunk by the insets
    ///
    /// Left/right insets resolve against the parent width, top/bottom against its height.
    pub fn content_box(parent: &BoundingBox, insets: &TBLR) -> BoundingBox {
        let top = Self::resolve_length(insets.top, parent.height());
        let bottom = Self::resolve_length(insets.bottom, parent.height());
        let left = Self::resolve_length(insets.left, parent.width());
        let right = Self::resolve_length(insets.right, parent.width());

        BoundingBox::new(
            parent.x() + left,
            parent.y() + top,
            parent.width() - left - right,
            parent.height() - top - bottom,
        )
    }

    /// Resolve a full layout specification against the parent box
    ///
    /// # Returns
    /// Bounding box in absolute pixels; extents may be zero or negative.
    pub fn resolve(
        parent: &BoundingBox,
        position: &PositionXY,
        scale: &ScaleXY,
        insets: &TBLR,
        anchor: Anchor,
    ) -> BoundingBox {
        let content = Self::content_box(parent, insets);

        let size = Vec2::new(
            Self::resolve_length(scale.x, content.width()),
            Self::resolve_length(scale.y, content.height()),
        );

        let anchor_point = Vec2::new(
            Self::resolve_coordinate(position.x, content.x(), content.width()),
            Self::resolve_coordinate(position.y, content.y(), content.height()),
        );

        let (anchor_x, anchor_y) = anchor.to_normalized();
        BoundingBox {
            pos: Vec2::new(anchor_point.x - anchor_x * size.x, anchor_point.y - anchor_y * size.y),
            size,
        }
    }
}
