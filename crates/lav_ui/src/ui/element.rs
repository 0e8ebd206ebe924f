//! Element tree nodes
//!
//! [`UIBase`] composes a [`LayoutBase`], a [`PropsBase`] and an [`Events`] registry with tree
//! structure and variant data. Elements are shared (`Rc<RefCell<_>>`); children are owned by
//! their parent, parents are referenced weakly.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

use crate::core::config::TreeViewConfig;
use crate::error::TreeError;
use crate::events::{Events, UIEvent};
use crate::foundation::math::{Vec2, Vec4};
use crate::layout::{BoundingBox, LayoutBase};
use crate::props::{keys, PropsBase};

use super::widgets::{
    Reaction, ReactionContext, TreeRow, UIButton, UIImage, UILabel, UIPane, UISlider, UISplitPane,
    UITreeView, UIVariant,
};

/// Shared handle to an element
pub type UIRef = Rc<RefCell<UIBase>>;

/// Non-owning handle to an element
pub type WeakUIRef = Weak<RefCell<UIBase>>;

/// Layout rounds a pane gets when showing or hiding a scrollbar changes its viewport
const MAX_SCROLLBAR_PASSES: usize = 3;

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique element identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a tree mutation happened immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeChange {
    /// The child sequence was updated
    Applied,
    /// The element is being dispatched to; the change runs when that dispatch ends
    Deferred,
}

#[derive(Debug)]
enum PendingOp {
    Add(UIRef),
    Remove(UIRef),
    Clear,
}

/// A UI element
pub struct UIBase {
    id: ElementId,
    self_ref: WeakUIRef,
    parent: WeakUIRef,
    children: Vec<UIRef>,

    /// Geometry specification and resolved boxes
    pub layout: LayoutBase,
    /// Configurable properties
    pub props: PropsBase,
    /// User event handlers
    pub events: Events,

    variant: UIVariant,

    dispatch_lock: u32,
    pending: Vec<PendingOp>,
}

impl UIBase {
    /// Create an element of any variant
    pub fn create(layout: LayoutBase, props: PropsBase, variant: UIVariant) -> UIRef {
        let id = ElementId::next();
        debug!("Created {:?} element {}", variant.kind(), id);
        Rc::new_cyclic(|self_ref| {
            RefCell::new(Self {
                id,
                self_ref: self_ref.clone(),
                parent: Weak::new(),
                children: Vec::new(),
                layout,
                props,
                events: Events::new(),
                variant,
                dispatch_lock: 0,
                pending: Vec::new(),
            })
        })
    }

    /// Root element of a window
    pub fn window_root() -> UIRef {
        Self::create(LayoutBase::fill(), PropsBase::new(), UIVariant::Window)
    }

    /// Container
    pub fn pane(layout: LayoutBase) -> UIRef {
        Self::create(layout, PropsBase::new(), UIVariant::Pane(UIPane::default()))
    }

    /// Container from a configured [`UIPane`], e.g. one with scrollbars
    pub fn pane_with(layout: LayoutBase, pane: UIPane) -> UIRef {
        Self::create(layout, PropsBase::new(), UIVariant::Pane(pane))
    }

    /// Split container with one filling pane child per slot
    pub fn split_pane(layout: LayoutBase, split: UISplitPane) -> UIRef {
        let slots = split.slots().len();
        let element = Self::create(layout, PropsBase::new(), UIVariant::SplitPane(split));
        {
            let mut node = element.borrow_mut();
            for _ in 0..slots {
                node.attach(Self::pane(LayoutBase::fill()));
            }
        }
        element
    }

    /// Static text
    pub fn label(layout: LayoutBase, text: &str) -> UIRef {
        Self::label_with(layout, UILabel::new(text))
    }

    /// Label from a configured [`UILabel`]
    pub fn label_with(layout: LayoutBase, label: UILabel) -> UIRef {
        let mut props = PropsBase::new();
        label.apply(&mut props);
        Self::create(layout, props, UIVariant::Label(label))
    }

    /// Button in its normal state
    pub fn button(layout: LayoutBase) -> UIRef {
        let button = UIButton::default();
        let mut props = PropsBase::new();
        button.apply(&mut props);
        Self::create(layout, props, UIVariant::Button(button))
    }

    /// Labeled button
    pub fn button_with_text(layout: LayoutBase, text: &str) -> UIRef {
        let element = Self::button(layout);
        element.borrow_mut().props.set(keys::TEXT, text);
        element
    }

    /// Image
    pub fn image(layout: LayoutBase, source: &str) -> UIRef {
        let image = UIImage::new(source);
        let mut props = PropsBase::new();
        image.apply(&mut props);
        Self::create(layout, props, UIVariant::Image(image))
    }

    /// Horizontal slider over `[from, to]`
    pub fn slider(layout: LayoutBase, from: f32, to: f32) -> UIRef {
        Self::slider_with(layout, UISlider::new(from, to))
    }

    /// Slider from a configured [`UISlider`]
    pub fn slider_with(layout: LayoutBase, slider: UISlider) -> UIRef {
        let props = PropsBase::new().with(keys::VALUE, slider.value());
        Self::create(layout, props, UIVariant::Slider(slider))
    }

    /// Empty tree view
    pub fn tree_view(layout: LayoutBase, config: &TreeViewConfig) -> UIRef {
        Self::create(layout, PropsBase::new(), UIVariant::TreeView(UITreeView::new(config)))
    }

    fn tree_row(layout: LayoutBase, row: TreeRow, label: &str, color: Vec4) -> UIRef {
        let props = PropsBase::new().with(keys::TEXT, label).with(keys::COLOR, color);
        Self::create(layout, props, UIVariant::TreeRow(row))
    }

    /// Element identifier
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Shared handle to this element
    pub fn handle(&self) -> Option<UIRef> {
        self.self_ref.upgrade()
    }

    /// Variant data
    pub fn variant(&self) -> &UIVariant {
        &self.variant
    }

    /// Mutable variant data
    pub fn variant_mut(&mut self) -> &mut UIVariant {
        &mut self.variant
    }

    /// Button data, if this is a button
    pub fn as_button(&self) -> Option<&UIButton> {
        match &self.variant {
            UIVariant::Button(button) => Some(button),
            _ => None,
        }
    }

    /// Slider data, if this is a slider
    pub fn as_slider(&self) -> Option<&UISlider> {
        match &self.variant {
            UIVariant::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    /// Scroll state, for panes and tree views
    pub fn as_pane(&self) -> Option<&UIPane> {
        self.variant.pane()
    }

    /// Split pane data, if this is a split pane
    pub fn as_split_pane(&self) -> Option<&UISplitPane> {
        match &self.variant {
            UIVariant::SplitPane(split) => Some(split),
            _ => None,
        }
    }

    /// Label data, if this is a label
    pub fn as_label(&self) -> Option<&UILabel> {
        match &self.variant {
            UIVariant::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Image data, if this is an image
    pub fn as_image(&self) -> Option<&UIImage> {
        match &self.variant {
            UIVariant::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Tree view data, if this is a tree view
    pub fn as_tree_view(&self) -> Option<&UITreeView> {
        match &self.variant {
            UIVariant::TreeView(tree) => Some(tree),
            _ => None,
        }
    }

    /// Mutable tree view data
    pub fn as_tree_view_mut(&mut self) -> Option<&mut UITreeView> {
        match &mut self.variant {
            UIVariant::TreeView(tree) => Some(tree),
            _ => None,
        }
    }

    /// Row data, if this is a tree view row
    pub fn as_tree_row(&self) -> Option<&TreeRow> {
        match &self.variant {
            UIVariant::TreeRow(row) => Some(row),
            _ => None,
        }
    }

    /// Move a slider to `value`, mirroring it into the `value` prop
    ///
    /// # Returns
    /// `false` for non-sliders or when the value did not change
    pub fn set_slider_value(&mut self, value: f32) -> bool {
        match &mut self.variant {
            UIVariant::Slider(slider) => slider.set_value(value, &mut self.props),
            _ => false,
        }
    }

    /// Point an image at a new source
    ///
    /// # Returns
    /// `false` for non-images
    pub fn set_image_source(&mut self, source: &str) -> bool {
        match &mut self.variant {
            UIVariant::Image(image) => {
                image.set_source(source, &mut self.props);
                true
            }
            _ => false,
        }
    }

    /// Replace a label's text
    ///
    /// # Returns
    /// `false` for non-labels
    pub fn set_label_text(&mut self, text: &str) -> bool {
        match &mut self.variant {
            UIVariant::Label(label) => {
                label.set_text(text, &mut self.props);
                true
            }
            _ => false,
        }
    }

    /// Enable or disable a button
    pub fn set_button_enabled(&mut self, enabled: bool) -> bool {
        match &mut self.variant {
            UIVariant::Button(button) => {
                button.set_enabled(enabled, &mut self.props);
                true
            }
            _ => false,
        }
    }

    /// False when the `visible` prop is set to false
    pub fn is_visible(&self) -> bool {
        self.props.get_or(keys::VISIBLE, true)
    }

    /// Show or hide this element and its subtree
    pub fn set_visible(&mut self, visible: bool) -> bool {
        self.props.set(keys::VISIBLE, visible)
    }

    /// Parent element, if attached and still alive
    pub fn parent(&self) -> Option<UIRef> {
        self.parent.upgrade()
    }

    /// True when the element has a live parent
    pub fn is_parented(&self) -> bool {
        self.parent.strong_count() > 0
    }

    /// Children in insertion order
    pub fn children(&self) -> &[UIRef] {
        &self.children
    }

    /// True while a dispatch is running through this element
    pub fn is_dispatch_locked(&self) -> bool {
        self.dispatch_lock > 0
    }

    fn is_self(&self, other: &UIRef) -> bool {
        std::ptr::eq(other.as_ptr(), self)
    }

    fn id_of(&self, other: &UIRef) -> ElementId {
        if self.is_self(other) {
            self.id
        } else {
            other.borrow().id
        }
    }

    /// Membership once the queued ops have run
    fn will_contain(&self, child: &UIRef) -> bool {
        let present = self.children.iter().any(|c| Rc::ptr_eq(c, child));
        self.pending.iter().fold(present, |present, op| match op {
            PendingOp::Add(c) if Rc::ptr_eq(c, child) => true,
            PendingOp::Remove(c) if Rc::ptr_eq(c, child) => false,
            PendingOp::Clear => false,
            _ => present,
        })
    }

    fn validate_add(&self, child: &UIRef) -> Result<(), TreeError> {
        if self.is_self(child) {
            return Err(TreeError::SelfParent(self.id));
        }

        let child_id = child.borrow().id;
        let locked = self.is_dispatch_locked();
        if locked && self.will_contain(child) {
            return Err(TreeError::AlreadyParented { child: child_id, parent: self.id });
        }

        if let Some(current) = child.borrow().parent() {
            // A queued removal from this element frees the child for a re-add
            let leaving = locked && self.is_self(&current);
            if !leaving {
                return Err(TreeError::AlreadyParented {
                    child: child_id,
                    parent: self.id_of(&current),
                });
            }
        }

        let mut ancestor = self.parent();
        while let Some(node) = ancestor {
            if Rc::ptr_eq(&node, child) {
                return Err(TreeError::Cycle { child: child_id, parent: self.id });
            }
            ancestor = node.borrow().parent();
        }
        Ok(())
    }

    /// Append a child
    ///
    /// The child must not have a parent and must not be an ancestor of this element.
    pub fn add_child(&mut self, child: UIRef) -> Result<TreeChange, TreeError> {
        if let Err(err) = self.validate_add(&child) {
            warn!("Rejected add on {}: {}", self.id, err);
            return Err(err);
        }

        if self.is_dispatch_locked() {
            debug!("Deferring add on {} until dispatch ends", self.id);
            self.pending.push(PendingOp::Add(child));
            return Ok(TreeChange::Deferred);
        }

        self.attach(child);
        Ok(TreeChange::Applied)
    }

    fn attach(&mut self, child: UIRef) {
        {
            let mut node = child.borrow_mut();
            node.parent = self.self_ref.clone();
            node.layout.mark_dirty();
        }
        self.children.push(child);
    }

    /// Remove a direct child; it stays alive while other handles exist
    ///
    /// While dispatch-locked, a child whose add is still queued counts as a child.
    pub fn remove_child(&mut self, child: &UIRef) -> Result<TreeChange, TreeError> {
        if self.is_dispatch_locked() {
            if !self.will_contain(child) {
                return Err(self.reject_remove(child));
            }
            debug!("Deferring remove on {} until dispatch ends", self.id);
            self.pending.push(PendingOp::Remove(Rc::clone(child)));
            return Ok(TreeChange::Deferred);
        }

        let Some(index) = self.children.iter().position(|c| Rc::ptr_eq(c, child)) else {
            return Err(self.reject_remove(child));
        };
        let removed = self.children.remove(index);
        removed.borrow_mut().parent = Weak::new();
        Ok(TreeChange::Applied)
    }

    fn reject_remove(&self, child: &UIRef) -> TreeError {
        let err = TreeError::NotAChild { child: self.id_of(child), parent: self.id };
        warn!("Rejected remove on {}: {}", self.id, err);
        err
    }

    /// Remove every child matching `predicate`
    ///
    /// # Returns
    /// The number of matching children (removed now, or queued while dispatch-locked)
    pub fn remove_children_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&UIBase) -> bool,
    {
        let matching: Vec<UIRef> = self
            .children
            .iter()
            .filter(|child| predicate(&*child.borrow()))
            .cloned()
            .collect();

        for child in &matching {
            if let Err(err) = self.remove_child(child) {
                warn!("Failed to remove matching child: {}", err);
            }
        }
        matching.len()
    }

    /// Remove all children
    pub fn clear_children(&mut self) -> TreeChange {
        if self.is_dispatch_locked() {
            self.pending.push(PendingOp::Clear);
            return TreeChange::Deferred;
        }
        self.detach_all();
        TreeChange::Applied
    }

    fn detach_all(&mut self) {
        for child in self.children.drain(..) {
            child.borrow_mut().parent = Weak::new();
        }
    }

    pub(crate) fn lock_dispatch(&mut self) {
        self.dispatch_lock += 1;
    }

    pub(crate) fn unlock_dispatch(&mut self) {
        self.dispatch_lock = self.dispatch_lock.saturating_sub(1);
        if self.dispatch_lock == 0 && !self.pending.is_empty() {
            self.flush_pending();
        }
    }

    fn flush_pending(&mut self) {
        let ops = std::mem::take(&mut self.pending);
        debug!("Applying {} deferred tree changes on {}", ops.len(), self.id);
        for op in ops {
            let result = match op {
                PendingOp::Add(child) => self.add_child(child).map(|_| ()),
                PendingOp::Remove(child) => self.remove_child(&child).map(|_| ()),
                PendingOp::Clear => {
                    self.detach_all();
                    Ok(())
                }
            };
            if let Err(err) = result {
                warn!("Deferred tree change on {} dropped: {}", self.id, err);
            }
        }
    }

    /// Variant reaction hook, run before user handlers
    pub(crate) fn react(&mut self, ctx: &ReactionContext, event: &UIEvent) -> Reaction {
        match &mut self.variant {
            UIVariant::Pane(pane) => pane.react(event),
            UIVariant::SplitPane(split) => split.react(event),
            UIVariant::Button(button) => button.react(event, &mut self.props),
            UIVariant::Slider(slider) => slider.react(ctx, event, &mut self.props),
            UIVariant::TreeView(tree) => tree.react(ctx, event),
            UIVariant::Window | UIVariant::Image(_) | UIVariant::Label(_) | UIVariant::TreeRow(_) => {
                Reaction::ignored()
            }
        }
    }

    /// Variant layout hook, run after this element resolved and before its children
    fn on_layout(&mut self) {
        let bbox = self.layout.bbox();
        match &mut self.variant {
            UIVariant::Slider(slider) => slider.layout(bbox),
            UIVariant::SplitPane(split) => split.layout(bbox),
            _ => {}
        }

        let needs_rows = self
            .as_tree_view()
            .is_some_and(UITreeView::rows_dirty);
        if needs_rows {
            if self.is_dispatch_locked() {
                debug!("Tree view {} locked, rows rebuilt next pass", self.id);
            } else {
                self.rebuild_tree_rows();
            }
        }
    }

    fn rebuild_tree_rows(&mut self) {
        let Some(specs) = self.as_tree_view().map(UITreeView::row_specs) else {
            return;
        };

        self.detach_all();
        let mut rows = Vec::with_capacity(specs.len());
        for spec in specs {
            let path = spec.row.path.clone();
            let row = Self::tree_row(spec.layout, spec.row, &spec.label, spec.color);
            rows.push((row.borrow().id, path));
            self.attach(row);
        }
        debug!("Tree view {} rebuilt {} rows", self.id, rows.len());

        if let Some(tree) = self.as_tree_view_mut() {
            tree.set_rows(rows);
        }
    }

    /// Resolve this element and its subtree
    ///
    /// Children are resolved in insertion order against the frame their parent's variant
    /// gives them (a split slot, or a pane viewport shifted by the scroll offset) and clipped
    /// to it. A pane whose scrollbars appear or disappear lays its children out again.
    pub fn layout_pass(this: &UIRef, parent_box: &BoundingBox, parent_view: &BoundingBox) {
        let (children, bbox, view) = {
            let mut element = this.borrow_mut();
            let bbox = element.layout.resolve(parent_box);
            let view = element.layout.compute_view_box(parent_view);
            element.on_layout();
            (element.children.clone(), bbox, view)
        };

        for _ in 0..MAX_SCROLLBAR_PASSES {
            let slots: Vec<(BoundingBox, BoundingBox)> = {
                let element = this.borrow();
                (0..children.len())
                    .map(|index| element.variant.child_slot(index, &bbox, &view))
                    .collect()
            };
            for (child, (frame, clip)) in children.iter().zip(&slots) {
                Self::layout_pass(child, frame, clip);
            }

            let mut element = this.borrow_mut();
            let id = element.id;
            let Some(pane) = element.variant.pane_mut() else {
                return;
            };
            let frame = pane.child_frame(&bbox);
            let content = children.iter().fold(Vec2::zeros(), |extent, child| {
                let child_box = child.borrow().layout.bbox();
                Vec2::new(
                    extent.x.max(child_box.right() - frame.x()),
                    extent.y.max(child_box.bottom() - frame.y()),
                )
            });
            if !pane.set_extents(content, bbox) {
                return;
            }
            debug!("Pane {} scrollbars changed, laying children out again", id);
        }
    }
}

impl fmt::Debug for UIBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UIBase")
            .field("id", &self.id)
            .field("variant", &self.variant.kind())
            .field("bbox", &self.layout.bbox())
            .field("children", &self.children.len())
            .field("events", &self.events)
            .finish()
    }
}
