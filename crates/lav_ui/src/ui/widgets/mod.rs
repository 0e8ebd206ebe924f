//! Element variants
//!
//! Each variant contributes a small operation set to its element: a layout hook, an event
//! reaction that runs before user handlers, and the extra boxes it hands to the renderer.

pub mod button;
pub mod image;
pub mod label;
pub mod pane;
pub mod slider;
pub mod split_pane;
pub mod tree_view;

pub use button::{ButtonState, UIButton};
pub use image::UIImage;
pub use label::UILabel;
pub use pane::{Scrollbar, UIPane};
pub use slider::{Orientation, UISlider};
pub use split_pane::{SplitSlot, UISplitPane};
pub use tree_view::{ItemPath, TreeItem, TreeRow, UITreeView, VisibleItem};

use crate::events::UIEvent;
use crate::layout::BoundingBox;
use crate::ui::element::ElementId;

/// Payload-free variant tag, handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// Window root
    Window,
    /// Plain or scrolling container
    Pane,
    /// Container dividing its box between children
    SplitPane,
    /// Clickable button
    Button,
    /// Image
    Image,
    /// Static text
    Label,
    /// Value slider
    Slider,
    /// Tree view container
    TreeView,
    /// Synthetic tree view row
    TreeRow,
}

/// Variant-specific element data
#[derive(Debug, Clone)]
pub enum UIVariant {
    /// Root element of a window; seeded by window geometry
    Window,
    /// Container with optional scrolling
    Pane(UIPane),
    /// Side-by-side children with draggable handles
    SplitPane(UISplitPane),
    /// Button
    Button(UIButton),
    /// Image
    Image(UIImage),
    /// Label
    Label(UILabel),
    /// Slider
    Slider(UISlider),
    /// Tree view
    TreeView(UITreeView),
    /// Row generated by a tree view
    TreeRow(TreeRow),
}

impl UIVariant {
    /// Tag of this variant
    pub fn kind(&self) -> VariantKind {
        match self {
            UIVariant::Window => VariantKind::Window,
            UIVariant::Pane(_) => VariantKind::Pane,
            UIVariant::SplitPane(_) => VariantKind::SplitPane,
            UIVariant::Button(_) => VariantKind::Button,
            UIVariant::Image(_) => VariantKind::Image,
            UIVariant::Label(_) => VariantKind::Label,
            UIVariant::Slider(_) => VariantKind::Slider,
            UIVariant::TreeView(_) => VariantKind::TreeView,
            UIVariant::TreeRow(_) => VariantKind::TreeRow,
        }
    }

    /// Scrolling state for variants that scroll their children
    pub fn pane(&self) -> Option<&UIPane> {
        match self {
            UIVariant::Pane(pane) => Some(pane),
            UIVariant::TreeView(tree) => Some(&tree.pane),
            _ => None,
        }
    }

    /// Mutable scrolling state
    pub fn pane_mut(&mut self) -> Option<&mut UIPane> {
        match self {
            UIVariant::Pane(pane) => Some(pane),
            UIVariant::TreeView(tree) => Some(&mut tree.pane),
            _ => None,
        }
    }

    /// Frame child `index` resolves against and the area it is clipped to
    pub fn child_slot(&self, index: usize, bbox: &BoundingBox, view: &BoundingBox) -> (BoundingBox, BoundingBox) {
        match self {
            UIVariant::SplitPane(split) => {
                let frame = split.frame(index).unwrap_or(*bbox);
                (frame, frame.intersection(view))
            }
            _ => match self.pane() {
                Some(pane) => (pane.child_frame(bbox), pane.viewport_box(bbox).intersection(view)),
                None => (*bbox, *view),
            },
        }
    }

    /// Elements the pointer passes through; their children are still hit
    pub fn ignores_pointer(&self) -> bool {
        matches!(self, UIVariant::Label(_))
    }

    /// Named sub-boxes drawn in addition to the element box
    pub fn parts(&self) -> Vec<(&'static str, BoundingBox)> {
        match self {
            UIVariant::Slider(slider) => vec![("knob", slider.knob())],
            UIVariant::SplitPane(split) => split.parts(),
            _ => self.pane().map(UIPane::parts).unwrap_or_default(),
        }
    }
}

/// Information about the dispatch a reaction runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionContext {
    /// Element whose reaction is running
    pub element: ElementId,
    /// Element the event was originally routed to
    pub target: ElementId,
}

/// Outcome of a variant reaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    /// Stop propagation; user handlers on this element and its ancestors are skipped
    pub consumed: bool,
    /// Follow-up events, dispatched starting at the reacting element
    pub raised: Vec<UIEvent>,
}

impl Reaction {
    /// Nothing happened
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Consume the event
    pub fn consumed() -> Self {
        Self { consumed: true, raised: Vec::new() }
    }

    /// Add a follow-up event
    pub fn raise(mut self, event: impl Into<UIEvent>) -> Self {
        self.raised.push(event.into());
        self
    }
}
