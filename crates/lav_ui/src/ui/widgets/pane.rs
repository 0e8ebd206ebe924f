//! Pane widget - container that scrolls its children when they overflow

use crate::events::UIEvent;
use crate::foundation::math::{remap, Vec2};
use crate::layout::BoundingBox;

use super::{Orientation, Reaction};

/// Default pixels scrolled per wheel unit
pub const DEFAULT_SCROLL_STEP: f32 = 20.0;

/// Default scrollbar thickness in pixels
pub const DEFAULT_SCROLLBAR_SIZE: f32 = 20.0;

/// Shortest scrollbar knob, unless the track itself is shorter
pub const MIN_KNOB_LENGTH: f32 = 16.0;

/// One scrollbar of a pane
///
/// The track runs along the pane's right (vertical) or bottom (horizontal) edge and is only
/// shown while the content overflows on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scrollbar {
    /// Content overflows this axis
    pub visible: bool,
    /// Whole bar area
    pub track: BoundingBox,
    /// Draggable part; its length follows the visible share of the content
    pub knob: BoundingBox,
}

fn along(v: Vec2, orientation: Orientation) -> f32 {
    match orientation {
        Orientation::Horizontal => v.x,
        Orientation::Vertical => v.y,
    }
}

fn with_along(v: Vec2, orientation: Orientation, value: f32) -> Vec2 {
    match orientation {
        Orientation::Horizontal => Vec2::new(value, v.y),
        Orientation::Vertical => Vec2::new(v.x, value),
    }
}

/// Scroll state of a container
///
/// Children are laid out against the viewport (pane box minus shown scrollbars) shifted by
/// the scroll offset. The offset is clamped to `[0, content - viewport]` per axis using the
/// extents measured by the last layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct UIPane {
    scroll: Vec2,
    content: Vec2,
    viewport: Vec2,
    scroll_step: f32,

    scrollbar_size: f32,
    horizontal: Option<Scrollbar>,
    vertical: Option<Scrollbar>,
    /// Bar being dragged and the grab point's distance from the knob start
    grab: Option<(Orientation, f32)>,
}

impl Default for UIPane {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_STEP)
    }
}

impl UIPane {
    /// Pane with the given wheel step and no scrollbars
    pub fn new(scroll_step: f32) -> Self {
        Self {
            scroll: Vec2::zeros(),
            content: Vec2::zeros(),
            viewport: Vec2::zeros(),
            scroll_step,
            scrollbar_size: DEFAULT_SCROLLBAR_SIZE,
            horizontal: None,
            vertical: None,
            grab: None,
        }
    }

    /// Builder: enable scrollbars per axis with the given thickness
    pub fn with_scrollbars(mut self, horizontal: bool, vertical: bool, size: f32) -> Self {
        self.horizontal = horizontal.then(Scrollbar::default);
        self.vertical = vertical.then(Scrollbar::default);
        self.scrollbar_size = size.max(0.0);
        self
    }

    /// Current scroll offset
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Pixels per wheel unit
    pub fn scroll_step(&self) -> f32 {
        self.scroll_step
    }

    /// Change the wheel step
    pub fn set_scroll_step(&mut self, step: f32) {
        self.scroll_step = step;
    }

    /// Extent of the children measured by the last layout pass
    pub fn content_size(&self) -> Vec2 {
        self.content
    }

    /// Visible extent for the children
    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    /// Scrollbar of an axis, if enabled
    pub fn scrollbar(&self, orientation: Orientation) -> Option<&Scrollbar> {
        match orientation {
            Orientation::Horizontal => self.horizontal.as_ref(),
            Orientation::Vertical => self.vertical.as_ref(),
        }
    }

    fn scrollbar_mut(&mut self, orientation: Orientation) -> Option<&mut Scrollbar> {
        match orientation {
            Orientation::Horizontal => self.horizontal.as_mut(),
            Orientation::Vertical => self.vertical.as_mut(),
        }
    }

    fn shows(&self, orientation: Orientation) -> bool {
        self.scrollbar(orientation).is_some_and(|bar| bar.visible)
    }

    /// Space taken from the pane box by the shown scrollbars
    fn bar_impact(&self) -> Vec2 {
        let thickness = |shown: bool| if shown { self.scrollbar_size } else { 0.0 };
        Vec2::new(
            thickness(self.shows(Orientation::Vertical)),
            thickness(self.shows(Orientation::Horizontal)),
        )
    }

    /// Largest reachable offset per axis
    pub fn max_scroll(&self) -> Vec2 {
        Vec2::new(
            (self.content.x - self.viewport.x).max(0.0),
            (self.content.y - self.viewport.y).max(0.0),
        )
    }

    /// Part of the pane box left for the children
    pub fn viewport_box(&self, bbox: &BoundingBox) -> BoundingBox {
        let size = bbox.size - self.bar_impact();
        BoundingBox { pos: bbox.pos, size: Vec2::new(size.x.max(0.0), size.y.max(0.0)) }
    }

    /// Box the children resolve against
    pub fn child_frame(&self, bbox: &BoundingBox) -> BoundingBox {
        self.viewport_box(bbox).translated(-self.scroll)
    }

    /// Record measured extents, decide which scrollbars show and re-clamp the offset
    ///
    /// # Returns
    /// `true` when a scrollbar appeared or disappeared, so the children need another
    /// layout against the new viewport
    pub fn set_extents(&mut self, content: Vec2, bbox: BoundingBox) -> bool {
        let before = (self.shows(Orientation::Horizontal), self.shows(Orientation::Vertical));
        let size = self.scrollbar_size;
        let impact = |shown: bool| if shown { size } else { 0.0 };

        // A horizontal bar can push the content into vertical overflow and back
        let mut vertical = self.vertical.is_some() && content.y > bbox.height();
        let horizontal = self.horizontal.is_some() && content.x > bbox.width() - impact(vertical);
        vertical = self.vertical.is_some() && content.y > bbox.height() - impact(horizontal);

        self.content = content;
        self.viewport = Vec2::new(
            (bbox.width() - impact(vertical)).max(0.0),
            (bbox.height() - impact(horizontal)).max(0.0),
        );

        if let Some(bar) = &mut self.vertical {
            bar.visible = vertical;
            bar.track = BoundingBox::new(bbox.right() - size, bbox.y(), size, bbox.height());
        }
        if let Some(bar) = &mut self.horizontal {
            bar.visible = horizontal;
            bar.track = BoundingBox::new(bbox.x(), bbox.bottom() - size, bbox.width() - impact(vertical), size);
        }

        self.scroll = self.clamped(self.scroll);
        self.place_knobs();
        before != (horizontal, vertical)
    }

    fn place_knobs(&mut self) {
        let max = self.max_scroll();
        let (scroll, content, viewport) = (self.scroll, self.content, self.viewport);
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let Some(bar) = self.scrollbar_mut(orientation) else {
                continue;
            };
            let track = bar.track;
            let length = along(track.size, orientation).max(0.0);
            let visible_share = if along(content, orientation) > 0.0 {
                (along(viewport, orientation) / along(content, orientation)).min(1.0)
            } else {
                1.0
            };
            let knob_length = (length * visible_share).max(MIN_KNOB_LENGTH.min(length));
            let offset = remap(along(scroll, orientation), 0.0, along(max, orientation), 0.0, length - knob_length);
            let start = along(track.pos, orientation) + offset;
            bar.knob = BoundingBox {
                pos: with_along(track.pos, orientation, start),
                size: with_along(track.size, orientation, knob_length),
            };
        }
    }

    /// Move the offset, clamped
    ///
    /// # Returns
    /// `true` if the offset changed
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        self.scroll_to(self.scroll + delta)
    }

    /// Set the offset, clamped
    pub fn scroll_to(&mut self, offset: Vec2) -> bool {
        let next = self.clamped(offset);
        let changed = next != self.scroll;
        self.scroll = next;
        if changed {
            self.place_knobs();
        }
        changed
    }

    fn clamped(&self, offset: Vec2) -> Vec2 {
        let max = self.max_scroll();
        Vec2::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
    }

    /// Shown scrollbar under `point`; vertical wins in the corner
    pub fn scrollbar_at(&self, point: Vec2) -> Option<Orientation> {
        [Orientation::Vertical, Orientation::Horizontal]
            .into_iter()
            .find(|&o| self.scrollbar(o).is_some_and(|bar| bar.visible && bar.track.contains(point)))
    }

    /// Distance from the knob start kept under the cursor while dragging
    ///
    /// Pressing the track outside the knob grabs the knob by its middle.
    fn grab_offset(&self, orientation: Orientation, point: Vec2) -> f32 {
        let Some(bar) = self.scrollbar(orientation) else {
            return 0.0;
        };
        if bar.knob.contains(point) {
            along(point - bar.knob.pos, orientation)
        } else {
            along(bar.knob.size, orientation) / 2.0
        }
    }

    /// Scroll so the knob start sits `grab` before `point`
    fn drag_knob(&mut self, orientation: Orientation, point: Vec2, grab: f32) -> bool {
        let Some(bar) = self.scrollbar(orientation) else {
            return false;
        };
        let travel = along(bar.track.size, orientation) - along(bar.knob.size, orientation);
        let knob_start = along(point, orientation) - grab - along(bar.track.pos, orientation);
        let target = remap(knob_start, 0.0, travel, 0.0, along(self.max_scroll(), orientation));
        self.scroll_to(with_along(self.scroll, orientation, target))
    }

    /// Scrollbar boxes handed to the renderer
    pub fn parts(&self) -> Vec<(&'static str, BoundingBox)> {
        let mut parts = Vec::new();
        if let Some(bar) = self.vertical.filter(|bar| bar.visible) {
            parts.push(("vscroll_track", bar.track));
            parts.push(("vscroll_knob", bar.knob));
        }
        if let Some(bar) = self.horizontal.filter(|bar| bar.visible) {
            parts.push(("hscroll_track", bar.track));
            parts.push(("hscroll_knob", bar.knob));
        }
        parts
    }

    /// Wheel scrolls, scrollbars follow press and drag
    ///
    /// Wheel input is consumed only when the offset actually moved. Over the horizontal bar
    /// the wheel scrolls sideways.
    pub fn react(&mut self, event: &UIEvent) -> Reaction {
        match event {
            UIEvent::MouseScroll(e) => {
                let delta = -e.offset * self.scroll_step;
                let delta = match self.scrollbar_at(e.pos) {
                    Some(Orientation::Horizontal) => Vec2::new(delta.y, delta.x),
                    _ => delta,
                };
                if self.scroll_by(delta) {
                    return Reaction::consumed();
                }
            }
            UIEvent::MouseButton(e) if e.is_left_press() => {
                self.grab = self.scrollbar_at(e.pos).map(|o| (o, self.grab_offset(o, e.pos)));
                if let Some((orientation, grab)) = self.grab {
                    self.drag_knob(orientation, e.pos, grab);
                    return Reaction::consumed();
                }
            }
            UIEvent::MouseButton(e) if e.is_left_release() => self.grab = None,
            UIEvent::MouseDrag(e) => {
                if let Some((orientation, grab)) = self.grab {
                    self.drag_knob(orientation, e.pos, grab);
                    return Reaction::consumed();
                }
            }
            _ => {}
        }
        Reaction::ignored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MouseButtonEvt, MouseDragEvt, MouseScrollEvt};
    use crate::input::{ButtonAction, MouseButton};
    use approx::assert_relative_eq;

    fn wheel(y: f32) -> UIEvent {
        MouseScrollEvt { pos: Vec2::zeros(), offset: Vec2::new(0.0, y) }.into()
    }

    fn press(x: f32, y: f32) -> UIEvent {
        MouseButtonEvt { button: MouseButton::Left, action: ButtonAction::Press, pos: Vec2::new(x, y) }.into()
    }

    fn drag(x: f32, y: f32) -> UIEvent {
        MouseDragEvt { pos: Vec2::new(x, y), delta: Vec2::zeros(), origin: Vec2::zeros() }.into()
    }

    /// 100x100 pane with a 10px vertical bar over 400px of content
    fn tall() -> UIPane {
        let mut pane = UIPane::new(10.0).with_scrollbars(false, true, 10.0);
        pane.set_extents(Vec2::new(90.0, 400.0), BoundingBox::from_size(100.0, 100.0));
        pane
    }

    #[test]
    fn test_scroll_clamped_to_overflow() {
        let mut pane = UIPane::new(10.0);
        pane.set_extents(Vec2::new(100.0, 250.0), BoundingBox::from_size(100.0, 100.0));

        assert!(pane.react(&wheel(-5.0)).consumed);
        assert_relative_eq!(pane.scroll().y, 50.0);

        pane.react(&wheel(-100.0));
        assert_relative_eq!(pane.scroll().y, 150.0);

        // Already at the end: not consumed so an outer pane can scroll
        assert!(!pane.react(&wheel(-1.0)).consumed);
    }

    #[test]
    fn test_no_overflow_never_scrolls() {
        let mut pane = UIPane::default();
        pane.set_extents(Vec2::new(50.0, 50.0), BoundingBox::from_size(100.0, 100.0));
        assert!(!pane.react(&wheel(-3.0)).consumed);
        assert_eq!(pane.scroll(), Vec2::zeros());
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut pane = UIPane::new(1.0);
        pane.set_extents(Vec2::new(0.0, 300.0), BoundingBox::from_size(0.0, 100.0));
        pane.scroll_to(Vec2::new(0.0, 200.0));
        pane.set_extents(Vec2::new(0.0, 150.0), BoundingBox::from_size(0.0, 100.0));
        assert_relative_eq!(pane.scroll().y, 50.0);
    }

    #[test]
    fn test_child_frame_shifted_by_scroll() {
        let mut pane = UIPane::new(1.0);
        pane.set_extents(Vec2::new(0.0, 300.0), BoundingBox::from_size(0.0, 100.0));
        pane.scroll_to(Vec2::new(0.0, 40.0));
        let frame = pane.child_frame(&BoundingBox::new(10.0, 10.0, 100.0, 100.0));
        assert_eq!(frame, BoundingBox::new(10.0, -30.0, 100.0, 100.0));
    }

    #[test]
    fn test_scrollbar_shows_only_on_overflow() {
        let mut pane = UIPane::new(10.0).with_scrollbars(true, true, 10.0);
        let bbox = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert!(!pane.set_extents(Vec2::new(80.0, 80.0), bbox));
        assert!(pane.parts().is_empty());
        assert_eq!(pane.viewport_box(&bbox), bbox);

        // Vertical overflow appears and takes its width from the children
        assert!(pane.set_extents(Vec2::new(80.0, 300.0), bbox));
        assert!(!pane.scrollbar(Orientation::Horizontal).unwrap().visible);
        assert_eq!(pane.viewport_size(), Vec2::new(90.0, 100.0));
        assert_eq!(pane.child_frame(&bbox), BoundingBox::new(0.0, 0.0, 90.0, 100.0));
        assert_eq!(
            pane.scrollbar(Orientation::Vertical).unwrap().track,
            BoundingBox::new(90.0, 0.0, 10.0, 100.0)
        );
        assert!(!pane.set_extents(Vec2::new(80.0, 300.0), bbox));
    }

    #[test]
    fn test_vertical_bar_causes_horizontal_overflow() {
        let mut pane = UIPane::new(10.0).with_scrollbars(true, true, 10.0);
        let bbox = BoundingBox::new(0.0, 0.0, 100.0, 100.0);

        // 95px wide content only overflows once the vertical bar takes 10px
        pane.set_extents(Vec2::new(95.0, 300.0), bbox);
        let horizontal = pane.scrollbar(Orientation::Horizontal).unwrap();
        assert!(horizontal.visible);
        assert_eq!(horizontal.track, BoundingBox::new(0.0, 90.0, 90.0, 10.0));
        assert_eq!(pane.viewport_size(), Vec2::new(90.0, 90.0));
        assert_eq!(pane.max_scroll(), Vec2::new(5.0, 210.0));

        let names: Vec<_> = pane.parts().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["vscroll_track", "vscroll_knob", "hscroll_track", "hscroll_knob"]);
    }

    #[test]
    fn test_knob_tracks_offset() {
        let mut pane = tall();
        // A quarter of the content is visible
        let knob = pane.scrollbar(Orientation::Vertical).unwrap().knob;
        assert_eq!(knob, BoundingBox::new(90.0, 0.0, 10.0, 25.0));

        pane.scroll_to(Vec2::new(0.0, 300.0));
        let knob = pane.scrollbar(Orientation::Vertical).unwrap().knob;
        assert_relative_eq!(knob.y(), 75.0);
    }

    #[test]
    fn test_knob_drag_scrolls() {
        let mut pane = tall();

        // Grab the knob 5px below its top and pull it halfway down the free travel
        assert!(pane.react(&press(95.0, 5.0)).consumed);
        assert_relative_eq!(pane.scroll().y, 0.0);
        assert!(pane.react(&drag(95.0, 42.5)).consumed);
        assert_relative_eq!(pane.scroll().y, 150.0);

        // Past the end clamps
        pane.react(&drag(95.0, 500.0));
        assert_relative_eq!(pane.scroll().y, 300.0);

        // After release, drags belong to someone else
        pane.react(&MouseButtonEvt { button: MouseButton::Left, action: ButtonAction::Release, pos: Vec2::zeros() }.into());
        assert!(!pane.react(&drag(95.0, 0.0)).consumed);
    }

    #[test]
    fn test_track_press_centers_knob() {
        let mut pane = tall();
        // Knob is 25px long; centering it on y=50 puts its start at 37.5 of 75px travel
        assert!(pane.react(&press(95.0, 50.0)).consumed);
        assert_relative_eq!(pane.scroll().y, 150.0);
    }

    #[test]
    fn test_press_in_viewport_is_not_a_grab() {
        let mut pane = tall();
        assert!(!pane.react(&press(40.0, 40.0)).consumed);
        assert!(!pane.react(&drag(40.0, 80.0)).consumed);
        assert_eq!(pane.scroll(), Vec2::zeros());
    }

    #[test]
    fn test_wheel_over_horizontal_bar_scrolls_sideways() {
        let mut pane = UIPane::new(10.0).with_scrollbars(true, false, 10.0);
        pane.set_extents(Vec2::new(300.0, 50.0), BoundingBox::from_size(100.0, 100.0));
        let over_bar = MouseScrollEvt { pos: Vec2::new(50.0, 95.0), offset: Vec2::new(0.0, -2.0) };
        assert!(pane.react(&over_bar.into()).consumed);
        assert_eq!(pane.scroll(), Vec2::new(20.0, 0.0));
    }
}
