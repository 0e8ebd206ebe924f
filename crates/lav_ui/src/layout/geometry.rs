//! Geometry value types
//!
//! Unit-tagged layout inputs (`Position`, `Scale`, `TBLR`) and the resolved, unit-free
//! [`BoundingBox`] the rendering layer consumes.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;

/// How a position component is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PositionType {
    /// Pixel offset from the parent's content box origin
    #[default]
    Absolute,
    /// Fraction of the parent's content extent (0 = start edge, 1 = end edge)
    Relative,
}

/// How a scale (or inset) component is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScaleType {
    /// Pixels
    #[default]
    Absolute,
    /// Fraction of the parent's extent along the same axis
    Relative,
}

/// A single position component
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Numeric value, meaningful only together with `kind`
    pub value: f32,
    /// Unit of `value`
    pub kind: PositionType,
}

impl Position {
    /// Pixel position
    pub const fn px(value: f32) -> Self {
        Self { value, kind: PositionType::Absolute }
    }

    /// Parent-relative position
    pub const fn rel(value: f32) -> Self {
        Self { value, kind: PositionType::Relative }
    }
}

/// A single scale component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Numeric value, meaningful only together with `kind`
    pub value: f32,
    /// Unit of `value`
    pub kind: ScaleType,
}

impl Scale {
    /// Pixel extent
    pub const fn px(value: f32) -> Self {
        Self { value, kind: ScaleType::Absolute }
    }

    /// Parent-relative extent
    pub const fn rel(value: f32) -> Self {
        Self { value, kind: ScaleType::Relative }
    }

    /// Zero pixels
    pub const fn zero() -> Self {
        Self::px(0.0)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::px(100.0)
    }
}

/// Position on both axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionXY {
    /// Horizontal component
    pub x: Position,
    /// Vertical component
    pub y: Position,
}

impl PositionXY {
    /// Build from two components
    pub const fn new(x: Position, y: Position) -> Self {
        Self { x, y }
    }

    /// Pixel offsets on both axes
    pub const fn px(x: f32, y: f32) -> Self {
        Self::new(Position::px(x), Position::px(y))
    }

    /// Relative fractions on both axes
    pub const fn rel(x: f32, y: f32) -> Self {
        Self::new(Position::rel(x), Position::rel(y))
    }
}

/// Scale on both axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleXY {
    /// Horizontal component
    pub x: Scale,
    /// Vertical component
    pub y: Scale,
}

impl ScaleXY {
    /// Build from two components
    pub const fn new(x: Scale, y: Scale) -> Self {
        Self { x, y }
    }

    /// Pixel extents on both axes
    pub const fn px(width: f32, height: f32) -> Self {
        Self::new(Scale::px(width), Scale::px(height))
    }

    /// Relative fractions on both axes
    pub const fn rel(width: f32, height: f32) -> Self {
        Self::new(Scale::rel(width), Scale::rel(height))
    }
}

/// Top/bottom/left/right insets, each with its own unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TBLR {
    /// Inset from the parent's top edge
    pub top: Scale,
    /// Inset from the parent's bottom edge
    pub bottom: Scale,
    /// Inset from the parent's left edge
    pub left: Scale,
    /// Inset from the parent's right edge
    pub right: Scale,
}

impl TBLR {
    /// Build from four components
    pub const fn new(top: Scale, bottom: Scale, left: Scale, right: Scale) -> Self {
        Self { top, bottom, left, right }
    }

    /// Same inset on every side
    pub const fn all(value: Scale) -> Self {
        Self::new(value, value, value, value)
    }

    /// Pixel insets
    pub const fn px(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self::new(Scale::px(top), Scale::px(bottom), Scale::px(left), Scale::px(right))
    }

    /// `vertical` on top and bottom, `horizontal` on left and right
    pub const fn symmetric(vertical: Scale, horizontal: Scale) -> Self {
        Self::new(vertical, vertical, horizontal, horizontal)
    }

    /// No insets
    pub const fn zero() -> Self {
        Self::all(Scale::zero())
    }
}

impl Default for TBLR {
    fn default() -> Self {
        Self::zero()
    }
}

/// Which point of an element's box its resolved position denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Anchor {
    /// Top-left corner
    #[default]
    TopLeft,
    /// Top-center
    TopCenter,
    /// Top-right corner
    TopRight,
    /// Middle-left
    MiddleLeft,
    /// Center of the box
    Center,
    /// Middle-right
    MiddleRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-center
    BottomCenter,
    /// Bottom-right corner
    BottomRight,
}

impl Anchor {
    /// Get the normalized anchor position (0.0 to 1.0) inside the box
    pub fn to_normalized(&self) -> (f32, f32) {
        match self {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::TopCenter => (0.5, 0.0),
            Anchor::TopRight => (1.0, 0.0),
            Anchor::MiddleLeft => (0.0, 0.5),
            Anchor::Center => (0.5, 0.5),
            Anchor::MiddleRight => (1.0, 0.5),
            Anchor::BottomLeft => (0.0, 1.0),
            Anchor::BottomCenter => (0.5, 1.0),
            Anchor::BottomRight => (1.0, 1.0),
        }
    }
}

/// Resolved axis-aligned rectangle in absolute pixel space
///
/// Extents may be zero or negative; such boxes are valid and simply contain nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl BoundingBox {
    /// Build from origin and extent
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Box at the origin with the given extent
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Empty box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Left edge
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    /// Top edge
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Width
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Height
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// True when either extent is zero or negative
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Check if a point is inside the box (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        !self.is_empty()
            && point.x >= self.x()
            && point.x <= self.right()
            && point.y >= self.y()
            && point.y <= self.bottom()
    }

    /// Overlap of two boxes; an empty box at the clamped corner when they do not overlap
    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x().max(other.x());
        let y = self.y().max(other.y());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        BoundingBox::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// The same box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> BoundingBox {
        BoundingBox {
            pos: self.pos + offset,
            size: self.size,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges_inclusive() {
        let bbox = BoundingBox::new(100.0, 100.0, 200.0, 100.0);

        // Point inside
        assert!(bbox.contains(Vec2::new(150.0, 150.0)));

        // Point on edge
        assert!(bbox.contains(Vec2::new(100.0, 100.0)));
        assert!(bbox.contains(Vec2::new(300.0, 200.0)));

        // Point outside
        assert!(!bbox.contains(Vec2::new(50.0, 50.0)));
        assert!(!bbox.contains(Vec2::new(350.0, 250.0)));
    }

    #[test]
    fn test_degenerate_box_contains_nothing() {
        let flat = BoundingBox::new(10.0, 10.0, 0.0, 50.0);
        assert!(flat.is_empty());
        assert!(!flat.contains(Vec2::new(10.0, 20.0)));

        let inverted = BoundingBox::new(10.0, 10.0, -5.0, 5.0);
        assert!(!inverted.contains(Vec2::new(8.0, 12.0)));
    }

    #[test]
    fn test_intersection() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(50.0, 80.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), BoundingBox::new(50.0, 80.0, 50.0, 20.0));

        let far = BoundingBox::new(500.0, 500.0, 10.0, 10.0);
        assert!(a.intersection(&far).is_empty());
    }

    #[test]
    fn test_anchor_normalized() {
        assert_eq!(Anchor::TopLeft.to_normalized(), (0.0, 0.0));
        assert_eq!(Anchor::Center.to_normalized(), (0.5, 0.5));
        assert_eq!(Anchor::BottomRight.to_normalized(), (1.0, 1.0));
    }
}
