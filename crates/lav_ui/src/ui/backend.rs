//! UI Render Backend Trait
//!
//! Defines the interface between the element tree and rendering backends.
//! Keeps the UI system independent of any graphics API.

use std::collections::HashSet;

use crate::layout::BoundingBox;
use crate::props::PropsBase;

use super::element::ElementId;
use super::widgets::VariantKind;

/// Everything a backend needs to draw one element
#[derive(Debug)]
pub struct DrawElement<'a> {
    /// Element identifier, stable across frames
    pub id: ElementId,
    /// Variant tag
    pub kind: VariantKind,
    /// Nesting depth; the window root is 0
    pub depth: usize,
    /// Resolved box
    pub bbox: BoundingBox,
    /// Visible part of the box
    pub view: BoundingBox,
    /// Current properties
    pub props: &'a PropsBase,
    /// Keys changed since this element was last drawn
    pub changed: &'a HashSet<String>,
    /// Variant sub-boxes such as a slider knob
    pub parts: &'a [(&'static str, BoundingBox)],
}

/// Backend-agnostic UI rendering interface
///
/// Elements arrive parents first, siblings in insertion order, so later calls draw on top.
pub trait UIRenderBackend {
    /// Begin UI rendering pass
    fn begin_ui_pass(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Draw one visible element
    fn draw_element(&mut self, element: &DrawElement<'_>) -> Result<(), Box<dyn std::error::Error>>;

    /// End UI rendering pass
    fn end_ui_pass(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}

/// Backend that only records what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Completed passes
    pub passes: usize,
    /// Elements of the most recent pass: id, kind, depth, bbox, changed keys (sorted)
    pub drawn: Vec<(ElementId, VariantKind, usize, BoundingBox, Vec<String>)>,
}

impl UIRenderBackend for RecordingBackend {
    fn begin_ui_pass(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.drawn.clear();
        Ok(())
    }

    fn draw_element(&mut self, element: &DrawElement<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let mut changed: Vec<String> = element.changed.iter().cloned().collect();
        changed.sort();
        self.drawn.push((element.id, element.kind, element.depth, element.bbox, changed));
        Ok(())
    }

    fn end_ui_pass(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.passes += 1;
        Ok(())
    }
}
