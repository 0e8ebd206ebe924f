//! Slider widget - maps pointer input on a track to a value in a range

use crate::events::{SliderEvt, UIEvent};
use crate::foundation::math::{remap, Vec2};
use crate::layout::BoundingBox;
use crate::props::{keys, PropsBase};

use super::{Reaction, ReactionContext};

/// Default knob extent along the track, in pixels
pub const DEFAULT_KNOB_LENGTH: f32 = 20.0;

/// Default fraction of the range moved per wheel unit
pub const DEFAULT_SENSITIVITY: f32 = 0.01;

/// Track direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Left (start) to right (end)
    #[default]
    Horizontal,
    /// Bottom (start) to top (end), unless inverted
    Vertical,
}

/// Slider state
#[derive(Debug, Clone, PartialEq)]
pub struct UISlider {
    from: f32,
    to: f32,
    percentage: f32,
    orientation: Orientation,
    invert_vertical: bool,
    sensitivity: f32,
    knob_length: f32,

    /// Cursor offset from the knob center captured on press
    grab_offset: Vec2,
    track: BoundingBox,
    knob: BoundingBox,
}

impl UISlider {
    /// Horizontal slider over `[from, to]` starting at `from`
    pub fn new(from: f32, to: f32) -> Self {
        Self {
            from,
            to,
            percentage: 0.0,
            orientation: Orientation::Horizontal,
            invert_vertical: false,
            sensitivity: DEFAULT_SENSITIVITY,
            knob_length: DEFAULT_KNOB_LENGTH,
            grab_offset: Vec2::zeros(),
            track: BoundingBox::zero(),
            knob: BoundingBox::zero(),
        }
    }

    /// Builder: set orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Builder: for vertical sliders, put the range start at the top
    pub fn with_inverted_vertical(mut self, invert: bool) -> Self {
        self.invert_vertical = invert;
        self
    }

    /// Builder: fraction of the range moved per wheel unit
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Builder: knob extent along the track
    pub fn with_knob_length(mut self, length: f32) -> Self {
        self.knob_length = length;
        self
    }

    /// Range start
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Range end
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Track direction
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Position in `[0, 1]`
    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    /// Current value in `[from, to]`
    pub fn value(&self) -> f32 {
        remap(self.percentage, 0.0, 1.0, self.from, self.to)
    }

    /// Knob box from the last layout or value change
    pub fn knob(&self) -> BoundingBox {
        self.knob
    }

    /// Move to a position in `[0, 1]` (clamped) and mirror the value into `props`
    ///
    /// # Returns
    /// `true` if the position changed
    pub fn set_percentage(&mut self, percentage: f32, props: &mut PropsBase) -> bool {
        if !percentage.is_finite() {
            return false;
        }
        let next = percentage.clamp(0.0, 1.0);
        if next == self.percentage {
            return false;
        }
        self.percentage = next;
        self.update_knob();
        props.set(keys::VALUE, self.value());
        true
    }

    /// Move to a value in the range (clamped)
    pub fn set_value(&mut self, value: f32, props: &mut PropsBase) -> bool {
        self.set_percentage(remap(value, self.from, self.to, 0.0, 1.0), props)
    }

    /// Layout hook: adopt the resolved element box as the track
    pub fn layout(&mut self, track: BoundingBox) {
        self.track = track;
        self.update_knob();
    }

    fn knob_size(&self) -> Vec2 {
        match self.orientation {
            Orientation::Horizontal => Vec2::new(
                self.knob_length.min(self.track.width()).max(0.0),
                self.track.height(),
            ),
            Orientation::Vertical => Vec2::new(
                self.track.width(),
                self.knob_length.min(self.track.height()).max(0.0),
            ),
        }
    }

    fn update_knob(&mut self) {
        let size = self.knob_size();
        let pos = match self.orientation {
            Orientation::Horizontal => Vec2::new(
                remap(self.percentage, 0.0, 1.0, self.track.x(), self.track.right() - size.x),
                self.track.y(),
            ),
            Orientation::Vertical => {
                let along = if self.invert_vertical { self.percentage } else { 1.0 - self.percentage };
                Vec2::new(
                    self.track.x(),
                    remap(along, 0.0, 1.0, self.track.y(), self.track.bottom() - size.y),
                )
            }
        };
        self.knob = BoundingBox { pos, size };
    }

    /// Position the knob center would take at `point`, clamped to `[0, 1]`
    pub fn percentage_at(&self, point: Vec2) -> f32 {
        let half = self.knob_size() / 2.0;
        let raw = match self.orientation {
            Orientation::Horizontal => {
                remap(point.x, self.track.x() + half.x, self.track.right() - half.x, 0.0, 1.0)
            }
            Orientation::Vertical => {
                let remapped =
                    remap(point.y, self.track.y() + half.y, self.track.bottom() - half.y, 0.0, 1.0);
                if self.invert_vertical { remapped } else { 1.0 - remapped }
            }
        };
        raw.clamp(0.0, 1.0)
    }

    /// Press jumps the knob, drag follows the cursor, wheel nudges
    ///
    /// Raises a [`SliderEvt`] whenever the value changes. Wheel input is consumed when it
    /// moved the knob so enclosing panes do not scroll as well.
    pub fn react(&mut self, ctx: &ReactionContext, event: &UIEvent, props: &mut PropsBase) -> Reaction {
        let (changed, consume) = match event {
            UIEvent::MouseButton(e) if e.is_left_press() => {
                let half = self.knob.size / 2.0;
                let offset = e.pos - self.knob.center();
                // Grabbing the knob keeps the grab point under the cursor
                self.grab_offset = Vec2::new(
                    if offset.x.abs() > half.x { 0.0 } else { offset.x },
                    if offset.y.abs() > half.y { 0.0 } else { offset.y },
                );
                (self.set_percentage(self.percentage_at(e.pos - self.grab_offset), props), false)
            }
            UIEvent::MouseDrag(e) => {
                (self.set_percentage(self.percentage_at(e.pos - self.grab_offset), props), false)
            }
            UIEvent::MouseScroll(e) => {
                let direction = if self.invert_vertical { -1.0 } else { 1.0 };
                let next = self.percentage + e.offset.y * self.sensitivity * direction;
                let changed = self.set_percentage(next, props);
                (changed, changed)
            }
            _ => (false, false),
        };

        let mut reaction = if consume { Reaction::consumed() } else { Reaction::ignored() };
        if changed {
            reaction = reaction.raise(SliderEvt {
                value: self.value(),
                percentage: self.percentage,
                source: ctx.element,
            });
        }
        reaction
    }
}
