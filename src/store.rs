use log::debug;

use crate::error::{DrawingError, DrawingResult};
use crate::geometry::Point;
use crate::shape::{Shape, ShapeId, ShapeKind};

/// Ordered shape collection; later shapes are drawn on top.
///
/// Holds at most one preview shape, and it is always the last entry.
/// Committed shapes are never mutated.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    preview: Option<ShapeId>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `shape` as the in-progress preview.
    pub fn add_preview(&mut self, mut shape: Shape) -> DrawingResult<ShapeId> {
        if self.preview.is_some() {
            return Err(DrawingError::InvalidState("a preview shape already exists"));
        }

        shape.mark_preview();
        let id = shape.id();
        self.shapes.push(shape);
        self.preview = Some(id);
        debug!("Added preview shape {}", id);
        Ok(id)
    }

    /// Recompute the preview geometry for a drag from `anchor` to `current`.
    pub fn update_preview(&mut self, anchor: Point, current: Point) -> DrawingResult<()> {
        let preview = self.preview_mut()?;
        let kind = ShapeKind::from_drag(preview.kind().tool(), anchor, current);
        preview.set_kind(kind);
        Ok(())
    }

    /// Promote the preview to a committed shape.
    ///
    /// Returns `None` when the preview is degenerate; it is removed instead.
    pub fn commit_preview(&mut self) -> DrawingResult<Option<ShapeId>> {
        let preview = self.preview_mut()?;
        if preview.kind().is_degenerate() {
            let removed = self.discard_preview()?;
            debug!("Discarded degenerate preview {}", removed.id());
            return Ok(None);
        }

        preview.mark_committed();
        let id = preview.id();
        self.preview = None;
        Ok(Some(id))
    }

    /// Remove the preview shape regardless of its geometry.
    pub fn discard_preview(&mut self) -> DrawingResult<Shape> {
        self.preview_mut()?;
        self.preview = None;
        self.shapes.pop().ok_or(DrawingError::NoActivePreview)
    }

    /// Turn the preview's dashed outline solid without committing it.
    pub fn solidify_preview(&mut self) -> DrawingResult<()> {
        self.preview_mut()?.set_dashed(false);
        Ok(())
    }

    /// Number of committed shapes, excluding any preview.
    pub fn count(&self) -> usize {
        self.shapes.len() - usize::from(self.preview.is_some())
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.preview = None;
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// All shapes in z-order, including the preview if present.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Committed shapes in z-order.
    pub fn committed(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|shape| !shape.is_preview())
    }

    pub fn preview(&self) -> Option<&Shape> {
        self.preview.and_then(|_| self.shapes.last())
    }

    pub fn preview_id(&self) -> Option<ShapeId> {
        self.preview
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    fn preview_mut(&mut self) -> DrawingResult<&mut Shape> {
        let id = self.preview.ok_or(DrawingError::NoActivePreview)?;
        match self.shapes.last_mut() {
            Some(shape) if shape.id() == id => Ok(shape),
            _ => Err(DrawingError::NoActivePreview),
        }
    }
}
