//! UI element tree
//!
//! Elements, their variants, the window root container and the rendering seam.

pub mod backend;
pub mod element;
pub mod widgets;
pub mod window;

pub use backend::{DrawElement, RecordingBackend, UIRenderBackend};
pub use element::{ElementId, TreeChange, UIBase, UIRef, WeakUIRef};
pub use widgets::{
    ButtonState, ItemPath, Orientation, Reaction, ReactionContext, Scrollbar, SplitSlot, TreeItem,
    TreeRow, UIButton, UIImage, UILabel, UIPane, UISlider, UISplitPane, UITreeView, UIVariant,
    VariantKind, VisibleItem,
};
pub use window::UIWindow;
