//! Per-element layout specification with a lazily resolved bounding box

use super::calculator::BasicCalculator;
use super::geometry::{Anchor, BoundingBox, PositionXY, ScaleXY, TBLR};
use crate::foundation::math::Vec2;

/// Layout inputs of one element plus its cached resolution
///
/// The resolved box is only recomputed when a setter ran since the last resolution or
/// when the parent box differs from the one it was last resolved against.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBase {
    position: PositionXY,
    scale: ScaleXY,
    tblr: TBLR,
    anchor: Anchor,

    bbox: BoundingBox,
    view: BoundingBox,
    dirty: bool,
    last_parent: Option<BoundingBox>,
}

impl Default for LayoutBase {
    fn default() -> Self {
        Self {
            position: PositionXY::default(),
            scale: ScaleXY::default(),
            tblr: TBLR::default(),
            anchor: Anchor::default(),
            bbox: BoundingBox::zero(),
            view: BoundingBox::zero(),
            dirty: true,
            last_parent: None,
        }
    }
}

impl LayoutBase {
    /// Create a layout with pixel position (0,0), 100x100 pixel scale, no insets
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout that fills the parent's content box
    pub fn fill() -> Self {
        Self::new()
            .with_position(PositionXY::rel(0.0, 0.0))
            .with_scale(ScaleXY::rel(1.0, 1.0))
    }

    /// Builder: set position
    pub fn with_position(mut self, position: PositionXY) -> Self {
        self.set_position(position);
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: ScaleXY) -> Self {
        self.set_scale(scale);
        self
    }

    /// Builder: set insets
    pub fn with_tblr(mut self, tblr: TBLR) -> Self {
        self.set_tblr(tblr);
        self
    }

    /// Builder: set anchor
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.set_anchor(anchor);
        self
    }

    /// Set position and mark the layout dirty
    pub fn set_position(&mut self, position: PositionXY) -> &mut Self {
        self.position = position;
        self.dirty = true;
        self
    }

    /// Set scale and mark the layout dirty
    pub fn set_scale(&mut self, scale: ScaleXY) -> &mut Self {
        self.scale = scale;
        self.dirty = true;
        self
    }

    /// Set insets and mark the layout dirty
    pub fn set_tblr(&mut self, tblr: TBLR) -> &mut Self {
        self.tblr = tblr;
        self.dirty = true;
        self
    }

    /// Set anchor and mark the layout dirty
    pub fn set_anchor(&mut self, anchor: Anchor) -> &mut Self {
        self.anchor = anchor;
        self.dirty = true;
        self
    }

    /// Current position specification
    pub fn position(&self) -> PositionXY {
        self.position
    }

    /// Current scale specification
    pub fn scale(&self) -> ScaleXY {
        self.scale
    }

    /// Current insets
    pub fn tblr(&self) -> TBLR {
        self.tblr
    }

    /// Current anchor
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Force the next [`Self::resolve`] to recompute
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// True when a setter ran since the last resolution
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Resolve against `parent`, reusing the cached box when nothing changed
    pub fn resolve(&mut self, parent: &BoundingBox) -> BoundingBox {
        if self.dirty || self.last_parent.as_ref() != Some(parent) {
            self.bbox = BasicCalculator::resolve(parent, &self.position, &self.scale, &self.tblr, self.anchor);
            self.last_parent = Some(*parent);
            self.dirty = false;
        }
        self.bbox
    }

    /// Clip the resolved box against the parent's visible area and store the result
    pub fn compute_view_box(&mut self, parent_view: &BoundingBox) -> BoundingBox {
        self.view = self.bbox.intersection(parent_view);
        self.view
    }

    /// Last resolved box
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Last computed visible area
    pub fn view_box(&self) -> BoundingBox {
        self.view
    }

    /// Point inside the resolved box
    pub fn is_point_inside(&self, point: Vec2) -> bool {
        self.bbox.contains(point)
    }

    /// Point inside the visible (clipped) area
    pub fn is_point_inside_view(&self, point: Vec2) -> bool {
        self.view.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::Scale;

    #[test]
    fn test_new_layout_is_dirty() {
        assert!(LayoutBase::new().is_dirty());
    }

    #[test]
    fn test_resolve_caches_until_setter() {
        let parent = BoundingBox::from_size(100.0, 100.0);
        let mut layout = LayoutBase::new().with_scale(ScaleXY::rel(0.5, 0.5));

        let first = layout.resolve(&parent);
        assert_eq!(first, BoundingBox::new(0.0, 0.0, 50.0, 50.0));
        assert!(!layout.is_dirty());

        layout.set_position(PositionXY::px(10.0, 10.0));
        assert!(layout.is_dirty());
        assert_eq!(layout.resolve(&parent), BoundingBox::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_parent_change_triggers_recompute() {
        let mut layout = LayoutBase::fill();
        assert_eq!(layout.resolve(&BoundingBox::from_size(100.0, 100.0)).width(), 100.0);
        assert_eq!(layout.resolve(&BoundingBox::from_size(300.0, 100.0)).width(), 300.0);
    }

    #[test]
    fn test_insets_applied() {
        let mut layout = LayoutBase::fill().with_tblr(TBLR::all(Scale::px(10.0)));
        let resolved = layout.resolve(&BoundingBox::from_size(100.0, 100.0));
        assert_eq!(resolved, BoundingBox::new(10.0, 10.0, 80.0, 80.0));
    }

    #[test]
    fn test_view_box_clipped_to_parent_view() {
        let mut layout = LayoutBase::new()
            .with_position(PositionXY::px(50.0, 50.0))
            .with_scale(ScaleXY::px(100.0, 100.0));
        let parent = BoundingBox::from_size(100.0, 100.0);
        layout.resolve(&parent);
        let view = layout.compute_view_box(&parent);

        assert_eq!(view, BoundingBox::new(50.0, 50.0, 50.0, 50.0));
        assert!(layout.is_point_inside(Vec2::new(120.0, 120.0)));
        assert!(!layout.is_point_inside_view(Vec2::new(120.0, 120.0)));
        assert!(layout.is_point_inside_view(Vec2::new(75.0, 75.0)));
    }
}
