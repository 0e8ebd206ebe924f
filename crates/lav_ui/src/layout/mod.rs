//! Layout model
//!
//! Unit-tagged geometry inputs, the stateless [`BasicCalculator`] and the per-element
//! [`LayoutBase`] cache.

pub mod calculator;
pub mod geometry;
pub mod layout_base;

pub use calculator::BasicCalculator;
pub use geometry::{
    Anchor, BoundingBox, Position, PositionType, PositionXY, Scale, ScaleType, ScaleXY, TBLR,
};
pub use layout_base::LayoutBase;
