//! Split pane widget - children side by side with draggable handles between them

use log::{debug, warn};

use crate::events::UIEvent;
use crate::foundation::math::Vec2;
use crate::layout::BoundingBox;

use super::{Orientation, Reaction};

/// Default handle thickness along the split axis, in pixels
pub const DEFAULT_HANDLE_SIZE: f32 = 10.0;

/// Share of a split pane given to one child
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitSlot {
    /// Fraction of the space left after the handles
    pub fraction: f32,
    /// Smallest extent along the split axis, in pixels
    pub min: f32,
    /// Largest extent along the split axis, in pixels
    pub max: f32,
}

impl SplitSlot {
    /// Unbounded slot
    pub fn new(fraction: f32) -> Self {
        Self { fraction, min: 0.0, max: f32::INFINITY }
    }

    /// Builder: pixel limits enforced while dragging a handle
    pub fn with_limits(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

/// Split pane state
///
/// Child `i` is laid out in slot `i`. Handle `i` sits between slots `i` and `i + 1`;
/// dragging it trades space between those two slots only.
#[derive(Debug, Clone, PartialEq)]
pub struct UISplitPane {
    orientation: Orientation,
    handle_size: f32,
    slots: Vec<SplitSlot>,

    bbox: BoundingBox,
    frames: Vec<BoundingBox>,
    handles: Vec<BoundingBox>,
    dragged: Option<usize>,
}

fn along(v: Vec2, orientation: Orientation) -> f32 {
    match orientation {
        Orientation::Horizontal => v.x,
        Orientation::Vertical => v.y,
    }
}

/// Strip of `bbox` starting at `start` along the split axis
fn cut(bbox: &BoundingBox, orientation: Orientation, start: f32, length: f32) -> BoundingBox {
    match orientation {
        Orientation::Horizontal => BoundingBox::new(start, bbox.y(), length, bbox.height()),
        Orientation::Vertical => BoundingBox::new(bbox.x(), start, bbox.width(), length),
    }
}

impl UISplitPane {
    /// Empty split along `orientation`; horizontal places children left to right
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            handle_size: DEFAULT_HANDLE_SIZE,
            slots: Vec::new(),
            bbox: BoundingBox::zero(),
            frames: Vec::new(),
            handles: Vec::new(),
            dragged: None,
        }
    }

    /// Split into unbounded slots with the given fractions
    ///
    /// Fewer than two fractions is not a split; the result has no slots.
    pub fn with_fractions(orientation: Orientation, fractions: &[f32]) -> Self {
        let mut split = Self::new(orientation);
        if fractions.len() < 2 {
            warn!("Split pane needs at least two fractions, got {}", fractions.len());
            return split;
        }
        split.slots = fractions.iter().copied().map(SplitSlot::new).collect();
        split
    }

    /// Builder: handle thickness
    pub fn with_handle_size(mut self, size: f32) -> Self {
        self.handle_size = size.max(0.0);
        self
    }

    /// Builder: append a slot
    pub fn with_slot(mut self, slot: SplitSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Split axis
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Handle thickness
    pub fn handle_size(&self) -> f32 {
        self.handle_size
    }

    /// Slots in child order
    pub fn slots(&self) -> &[SplitSlot] {
        &self.slots
    }

    /// Slot box of child `index` from the last layout
    pub fn frame(&self, index: usize) -> Option<BoundingBox> {
        self.frames.get(index).copied()
    }

    /// Handle boxes from the last layout
    pub fn handles(&self) -> &[BoundingBox] {
        &self.handles
    }

    /// Handle being dragged
    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    /// Space shared by the slots: the box minus the handles
    fn content_length(&self) -> f32 {
        let handles = self.slots.len().saturating_sub(1) as f32 * self.handle_size;
        (along(self.bbox.size, self.orientation) - handles).max(0.0)
    }

    /// Layout hook: cut the resolved box into slots and handles
    pub fn layout(&mut self, bbox: BoundingBox) {
        self.bbox = bbox;
        let content = self.content_length();
        let (orientation, handle_size) = (self.orientation, self.handle_size);
        let mut frames = Vec::with_capacity(self.slots.len());
        let mut handles = Vec::with_capacity(self.slots.len().saturating_sub(1));

        let mut cursor = along(bbox.pos, orientation);
        for (index, slot) in self.slots.iter().enumerate() {
            let length = (slot.fraction * content).max(0.0);
            frames.push(cut(&bbox, orientation, cursor, length));
            cursor += length;
            if index + 1 < self.slots.len() {
                handles.push(cut(&bbox, orientation, cursor, handle_size));
                cursor += handle_size;
            }
        }
        self.frames = frames;
        self.handles = handles;
    }

    /// Handle under `point`
    pub fn handle_at(&self, point: Vec2) -> Option<usize> {
        self.handles.iter().position(|handle| handle.contains(point))
    }

    /// Drag handle `index` so its center follows `point`
    ///
    /// The neighbouring slots trade space, each kept inside its pixel limits.
    ///
    /// # Returns
    /// `true` if the fractions changed
    pub fn move_handle(&mut self, index: usize, point: Vec2) -> bool {
        let (Some(handle), Some(&left), Some(&right)) =
            (self.handles.get(index), self.slots.get(index), self.slots.get(index + 1))
        else {
            return false;
        };
        let content = self.content_length();
        if content <= 0.0 {
            return false;
        }

        let wanted = along(point - handle.center(), self.orientation) / content;
        let low = (left.min / content - left.fraction).max(right.fraction - right.max / content);
        let high = (left.max / content - left.fraction).min(right.fraction - right.min / content);
        if low > high {
            debug!("Split handle {} limits leave no room to move", index);
            return false;
        }

        let offset = wanted.clamp(low, high);
        if offset.abs() < f32::EPSILON {
            return false;
        }
        self.slots[index].fraction += offset;
        self.slots[index + 1].fraction -= offset;
        self.layout(self.bbox);
        true
    }

    /// Handle boxes handed to the renderer
    pub fn parts(&self) -> Vec<(&'static str, BoundingBox)> {
        self.handles.iter().map(|handle| ("handle", *handle)).collect()
    }

    /// Pressing a handle starts a drag that lasts until the left button is released
    pub fn react(&mut self, event: &UIEvent) -> Reaction {
        match event {
            UIEvent::MouseButton(e) if e.is_left_press() => {
                self.dragged = self.handle_at(e.pos);
                if self.dragged.is_some() {
                    return Reaction::consumed();
                }
            }
            UIEvent::MouseButton(e) if e.is_left_release() => self.dragged = None,
            UIEvent::MouseDrag(e) => {
                if let Some(index) = self.dragged {
                    self.move_handle(index, e.pos);
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
    use crate::events::{MouseButtonEvt, MouseDragEvt};
    use crate::input::{ButtonAction, MouseButton};
    use approx::assert_relative_eq;

    /// 210px wide, two halves of the 200px left after the handle
    fn halves() -> UISplitPane {
        let mut split = UISplitPane::with_fractions(Orientation::Horizontal, &[0.5, 0.5]);
        split.layout(BoundingBox::new(0.0, 0.0, 210.0, 100.0));
        split
    }

    #[test]
    fn test_layout_cuts_slots_and_handles() {
        let split = halves();
        assert_eq!(split.frame(0), Some(BoundingBox::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(split.handles(), [BoundingBox::new(100.0, 0.0, 10.0, 100.0)]);
        assert_eq!(split.frame(1), Some(BoundingBox::new(110.0, 0.0, 100.0, 100.0)));
        assert_eq!(split.frame(2), None);
    }

    #[test]
    fn test_vertical_split_three_ways() {
        let mut split = UISplitPane::with_fractions(Orientation::Vertical, &[0.25, 0.25, 0.5])
            .with_handle_size(4.0);
        split.layout(BoundingBox::new(10.0, 0.0, 50.0, 208.0));
        assert_eq!(split.handles().len(), 2);
        assert_eq!(split.frame(1), Some(BoundingBox::new(10.0, 54.0, 50.0, 50.0)));
        assert_eq!(split.frame(2), Some(BoundingBox::new(10.0, 108.0, 50.0, 100.0)));
    }

    #[test]
    fn test_single_fraction_is_not_a_split() {
        let split = UISplitPane::with_fractions(Orientation::Horizontal, &[1.0]);
        assert!(split.slots().is_empty());
    }

    #[test]
    fn test_move_handle_trades_space() {
        let mut split = halves();
        // Handle center is at 105; move it 40px right
        assert!(split.move_handle(0, Vec2::new(145.0, 50.0)));
        assert_relative_eq!(split.slots()[0].fraction, 0.7, epsilon = 1e-6);
        assert_relative_eq!(split.slots()[1].fraction, 0.3, epsilon = 1e-6);
        assert_relative_eq!(split.frame(1).unwrap().x(), 150.0, epsilon = 1e-4);
    }

    #[test]
    fn test_move_handle_respects_limits() {
        let mut split = UISplitPane::new(Orientation::Horizontal)
            .with_slot(SplitSlot::new(0.5).with_limits(60.0, 150.0))
            .with_slot(SplitSlot::new(0.5).with_limits(80.0, f32::INFINITY));
        split.layout(BoundingBox::new(0.0, 0.0, 210.0, 100.0));

        // Right slot may not drop below 80px
        split.move_handle(0, Vec2::new(200.0, 50.0));
        assert_relative_eq!(split.frame(1).unwrap().width(), 80.0, epsilon = 1e-4);

        // Left slot may not drop below 60px
        split.move_handle(0, Vec2::new(0.0, 50.0));
        assert_relative_eq!(split.frame(0).unwrap().width(), 60.0, epsilon = 1e-4);
        assert!(!split.move_handle(0, Vec2::new(0.0, 50.0)));
    }

    #[test]
    fn test_handle_drag_follows_pointer_until_release() {
        let mut split = halves();
        let press = MouseButtonEvt { button: MouseButton::Left, action: ButtonAction::Press, pos: Vec2::new(104.0, 50.0) };
        assert!(split.react(&press.into()).consumed);
        assert_eq!(split.dragged(), Some(0));

        let drag = MouseDragEvt { pos: Vec2::new(85.0, 50.0), delta: Vec2::zeros(), origin: press.pos };
        assert!(split.react(&drag.into()).consumed);
        assert_relative_eq!(split.frame(0).unwrap().width(), 80.0, epsilon = 1e-4);

        let release = MouseButtonEvt { action: ButtonAction::Release, ..press };
        assert!(!split.react(&release.into()).consumed);
        assert_eq!(split.react(&drag.into()), Reaction::ignored());
    }

    #[test]
    fn test_press_inside_slot_is_ignored() {
        let mut split = halves();
        let press = MouseButtonEvt { button: MouseButton::Left, action: ButtonAction::Press, pos: Vec2::new(50.0, 50.0) };
        assert!(!split.react(&press.into()).consumed);
        assert_eq!(split.dragged(), None);
    }
}
