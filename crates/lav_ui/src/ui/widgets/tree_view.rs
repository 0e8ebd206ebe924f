//! Tree view widget
//!
//! Owns a recursive item list and mirrors the currently visible items as synthetic row
//! elements. Item visibility depends only on ancestor `open` flags and is recomputed on
//! every expand change; collapsing hides descendants without touching their data.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::core::config::TreeViewConfig;
use crate::events::UIEvent;
use crate::foundation::math::Vec4;
use crate::layout::{LayoutBase, PositionXY, Scale, ScaleXY, TBLR};
use crate::ui::element::ElementId;

use super::pane::UIPane;
use super::{Reaction, ReactionContext};

/// One node of the tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem {
    /// Row text
    pub label: String,
    /// Row color
    pub color: Vec4,
    /// Whether children are shown
    pub open: bool,
    /// Nested items
    pub children: Vec<TreeItem>,
}

impl TreeItem {
    /// Open item with no children
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: Vec4::new(0.8, 0.8, 0.8, 1.0),
            open: true,
            children: Vec::new(),
        }
    }

    /// Builder: set color
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Builder: set the expand flag
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Builder: append a child
    pub fn with_child(mut self, child: TreeItem) -> Self {
        self.children.push(child);
        self
    }

    /// True when the item has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of items in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeItem::subtree_len).sum::<usize>()
    }
}

/// Index path from the top-level list down to an item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ItemPath(Vec<usize>);

impl ItemPath {
    /// Path of a top-level item
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path from explicit indices
    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    /// Path of this item's `index`-th child
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Indices from the top level down
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Nesting depth; top-level items are at depth 0
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// True when `self` lies strictly below `other`
    pub fn is_descendant_of(&self, other: &ItemPath) -> bool {
        self.0.len() > other.0.len() && self.0.starts_with(&other.0)
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// Entry of the flattened visible list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleItem {
    /// Where the item lives
    pub path: ItemPath,
    /// Nesting depth
    pub depth: usize,
}

/// Variant data of a synthetic row element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Item the row shows
    pub path: ItemPath,
    /// Nesting depth, drives the indentation
    pub depth: usize,
}

/// Everything needed to build one row element
#[derive(Debug, Clone)]
pub struct RowSpec {
    /// Row variant data
    pub row: TreeRow,
    /// Text
    pub label: String,
    /// Color
    pub color: Vec4,
    /// Geometry inside the tree view
    pub layout: LayoutBase,
}

/// Tree view state; scrolls like a pane
#[derive(Debug, Clone)]
pub struct UITreeView {
    /// Scroll state
    pub pane: UIPane,
    items: Vec<TreeItem>,
    visible: Vec<VisibleItem>,
    rows_dirty: bool,
    row_size: f32,
    indent: f32,
    row_paths: HashMap<ElementId, ItemPath>,
}

impl UITreeView {
    /// Empty tree view
    pub fn new(config: &TreeViewConfig) -> Self {
        Self {
            pane: UIPane::default(),
            items: Vec::new(),
            visible: Vec::new(),
            rows_dirty: true,
            row_size: config.row_size,
            indent: config.indent,
            row_paths: HashMap::new(),
        }
    }

    /// Row height in pixels
    pub fn row_size(&self) -> f32 {
        self.row_size
    }

    /// Change the row height
    pub fn set_row_size(&mut self, row_size: f32) {
        self.row_size = row_size;
        self.rows_dirty = true;
    }

    /// Indentation per depth level in pixels
    pub fn indent(&self) -> f32 {
        self.indent
    }

    /// Top-level items
    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    /// Append a top-level item
    pub fn add_item(&mut self, item: TreeItem) -> ItemPath {
        self.items.push(item);
        self.refresh();
        ItemPath::root(self.items.len() - 1)
    }

    /// Append a child under `parent`
    ///
    /// # Returns
    /// Path of the new item, or `None` if `parent` does not exist
    pub fn add_child_item(&mut self, parent: &ItemPath, item: TreeItem) -> Option<ItemPath> {
        let node = self.item_slot(parent)?;
        node.children.push(item);
        let index = node.children.len() - 1;
        self.refresh();
        Some(parent.child(index))
    }

    /// Look up an item
    pub fn item(&self, path: &ItemPath) -> Option<&TreeItem> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.items.get(*first)?;
        for index in rest {
            node = node.children.get(*index)?;
        }
        Some(node)
    }

    fn item_slot(&mut self, path: &ItemPath) -> Option<&mut TreeItem> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.items.get_mut(*first)?;
        for index in rest {
            node = node.children.get_mut(*index)?;
        }
        Some(node)
    }

    /// Edit an item in place; visibility is recomputed afterwards
    pub fn edit_item<F: FnOnce(&mut TreeItem)>(&mut self, path: &ItemPath, edit: F) -> bool {
        let Some(node) = self.item_slot(path) else {
            return false;
        };
        edit(node);
        self.refresh();
        true
    }

    /// Remove an item and its subtree
    pub fn remove_item(&mut self, path: &ItemPath) -> Option<TreeItem> {
        let (last, parent) = path.indices().split_last()?;
        let siblings = if parent.is_empty() {
            &mut self.items
        } else {
            &mut self.item_slot(&ItemPath::from_indices(parent))?.children
        };
        if *last >= siblings.len() {
            return None;
        }
        let removed = siblings.remove(*last);
        self.refresh();
        Some(removed)
    }

    /// Expand or collapse an item
    ///
    /// # Returns
    /// `true` if the flag changed
    pub fn set_open(&mut self, path: &ItemPath, open: bool) -> bool {
        let changed = match self.item_slot(path) {
            Some(node) if node.open != open => {
                node.open = open;
                true
            }
            _ => false,
        };
        if changed {
            self.refresh();
        }
        changed
    }

    /// Flip an item's expand flag
    ///
    /// # Returns
    /// The new flag, or `None` if the item does not exist
    pub fn toggle(&mut self, path: &ItemPath) -> Option<bool> {
        let open = !self.item(path)?.open;
        self.set_open(path, open);
        Some(open)
    }

    /// Pre-order list of items whose ancestors are all open
    pub fn visible_items(&self) -> &[VisibleItem] {
        &self.visible
    }

    /// True when the item is currently shown
    pub fn is_visible(&self, path: &ItemPath) -> bool {
        self.visible.iter().any(|v| &v.path == path)
    }

    /// Item shown by a row element
    pub fn row_path(&self, row: ElementId) -> Option<&ItemPath> {
        self.row_paths.get(&row)
    }

    /// True when row elements no longer match the visible list
    pub fn rows_dirty(&self) -> bool {
        self.rows_dirty
    }

    fn refresh(&mut self) {
        fn flatten(items: &[TreeItem], prefix: &ItemPath, out: &mut Vec<VisibleItem>) {
            for (index, item) in items.iter().enumerate() {
                let path = if prefix.indices().is_empty() { ItemPath::root(index) } else { prefix.child(index) };
                let depth = path.depth();
                let open = item.open;
                out.push(VisibleItem { path: path.clone(), depth });
                if open {
                    flatten(&item.children, &path, out);
                }
            }
        }

        let mut visible = Vec::new();
        flatten(&self.items, &ItemPath::default(), &mut visible);
        debug!("Tree view: {} visible items", visible.len());
        self.visible = visible;
        self.rows_dirty = true;
    }

    /// Row descriptions for the current visible list
    pub fn row_specs(&self) -> Vec<RowSpec> {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(index, visible)| {
                let item = self.item(&visible.path)?;
                let layout = LayoutBase::new()
                    .with_position(PositionXY::px(0.0, index as f32 * self.row_size))
                    .with_scale(ScaleXY::new(Scale::rel(1.0), Scale::px(self.row_size)))
                    .with_tblr(TBLR {
                        left: Scale::px(visible.depth as f32 * self.indent),
                        ..TBLR::zero()
                    });
                Some(RowSpec {
                    row: TreeRow { path: visible.path.clone(), depth: visible.depth },
                    label: item.label.clone(),
                    color: item.color,
                    layout,
                })
            })
            .collect()
    }

    /// Record the row elements built from [`Self::row_specs`]
    pub fn set_rows(&mut self, rows: impl IntoIterator<Item = (ElementId, ItemPath)>) {
        self.row_paths = rows.into_iter().collect();
        self.rows_dirty = false;
    }

    /// Scroll on wheel input; releasing the left button on a row toggles its item
    pub fn react(&mut self, ctx: &ReactionContext, event: &UIEvent) -> Reaction {
        let reaction = self.pane.react(event);
        if reaction.consumed {
            return reaction;
        }

        if let UIEvent::MouseButton(e) = event {
            if e.is_left_release() {
                if let Some(path) = self.row_paths.get(&ctx.target).cloned() {
                    let open = self.toggle(&path);
                    debug!("Tree item {} toggled to {:?}", path, open);
                }
            }
        }
        reaction
    }
}
