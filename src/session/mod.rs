mod state;

pub use state::SessionState;

use log::{debug, info, warn};

use crate::document::Document;
use crate::error::{DrawingError, DrawingResult};
use crate::geometry::Point;
use crate::input::InputEvent;
use crate::shape::{ShapeId, factory};
use crate::style::{Style, ToolKind};

pub const POINTER_LABEL: &str = "Mouse Position: ";

/// What a pointer event did to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Nothing changed
    Ignored,
    /// A preview was created or changed
    PreviewChanged,
    /// The gesture ended with a new committed shape
    Committed(ShapeId),
    /// The gesture ended without moving and left no shape behind
    Discarded,
}

/// Pointer-driven state machine that rubber-bands a preview shape and
/// commits it on release.
///
/// Events must arrive in the order they happened; each one is handled to
/// completion against the document it is given.
#[derive(Debug, Clone, Default)]
pub struct DrawingSession {
    state: SessionState,
    tool: ToolKind,
    style: Style,
    pointer: Option<Point>,
}

impl DrawingSession {
    pub fn new(tool: ToolKind, style: Style) -> Self {
        Self {
            state: SessionState::Idle,
            tool,
            style,
            pointer: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Style changes only affect shapes started afterwards.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn can_change_tool(&self) -> bool {
        self.state.is_idle()
    }

    pub fn set_tool(&mut self, tool: ToolKind) -> DrawingResult<()> {
        if tool == self.tool {
            return Ok(());
        }
        if !self.can_change_tool() {
            warn!("Rejected switch to {} while dragging", tool.name());
            return Err(DrawingError::InvalidState("cannot change tool while dragging"));
        }
        debug!("Tool changed from {} to {}", self.tool.name(), tool.name());
        self.tool = tool;
        Ok(())
    }

    /// Last pointer position seen while dragging with the button held.
    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    /// Status-line text for the pointer readout.
    pub fn pointer_label(&self) -> String {
        match self.pointer {
            Some(p) => format!("{POINTER_LABEL}{:.0}, {:.0}px", p.x, p.y),
            None => POINTER_LABEL.to_owned(),
        }
    }

    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        doc: &mut Document,
    ) -> DrawingResult<SessionOutcome> {
        match *event {
            InputEvent::PointerDown { position } => {
                self.pointer_down(position, doc)?;
                Ok(SessionOutcome::PreviewChanged)
            }
            InputEvent::PointerMove {
                position,
                primary_held,
            } => self.pointer_move(position, primary_held, doc),
            InputEvent::PointerUp { position } => self.finish_drag(position, doc),
            InputEvent::PointerLeave => self.pointer_leave(doc),
        }
    }

    /// Start a drag at `point` with a zero-size preview of the active tool.
    pub fn pointer_down(&mut self, point: Point, doc: &mut Document) -> DrawingResult<ShapeId> {
        if self.state.is_dragging() {
            return Err(DrawingError::InvalidState("a drag is already in progress"));
        }

        let shape = factory::make_shape(self.tool, point, point, self.style);
        let preview = doc.shapes_mut().add_preview(shape)?;
        self.state = SessionState::Dragging {
            anchor: point,
            preview,
        };
        debug!("Started {} drag at {:?}", self.tool.name(), point);
        Ok(preview)
    }

    pub fn pointer_move(
        &mut self,
        point: Point,
        primary_held: bool,
        doc: &mut Document,
    ) -> DrawingResult<SessionOutcome> {
        let Some(anchor) = self.state.anchor() else {
            return Ok(SessionOutcome::Ignored);
        };
        // The release happened somewhere we were not told about
        if !primary_held {
            return Ok(SessionOutcome::Ignored);
        }

        self.pointer = Some(point);
        doc.shapes_mut().update_preview(anchor, point)?;
        Ok(SessionOutcome::PreviewChanged)
    }

    /// Finish the drag at `point`.
    ///
    /// Returns the committed shape, or `None` when the pointer never moved
    /// from its anchor (or no drag was in progress).
    pub fn pointer_up(
        &mut self,
        point: Point,
        doc: &mut Document,
    ) -> DrawingResult<Option<ShapeId>> {
        match self.finish_drag(point, doc)? {
            SessionOutcome::Committed(id) => Ok(Some(id)),
            _ => Ok(None),
        }
    }

    fn finish_drag(&mut self, point: Point, doc: &mut Document) -> DrawingResult<SessionOutcome> {
        let SessionState::Dragging { anchor, .. } = std::mem::take(&mut self.state) else {
            return Ok(SessionOutcome::Ignored);
        };
        self.pointer = None;

        let store = doc.shapes_mut();
        store.update_preview(anchor, point)?;
        match store.commit_preview()? {
            Some(id) => {
                doc.record_commit();
                info!(
                    "Committed {} {} ({} shapes, dirty: {})",
                    self.tool.name(),
                    id,
                    doc.shapes().count(),
                    doc.is_dirty()
                );
                Ok(SessionOutcome::Committed(id))
            }
            None => {
                warn!("Discarded zero-size {} at {:?}", self.tool.name(), anchor);
                Ok(SessionOutcome::Discarded)
            }
        }
    }

    /// The pointer left the canvas; the preview stops looking provisional
    /// but the drag keeps going.
    pub fn pointer_leave(&mut self, doc: &mut Document) -> DrawingResult<SessionOutcome> {
        if self.state.is_idle() {
            return Ok(SessionOutcome::Ignored);
        }
        doc.shapes_mut().solidify_preview()?;
        Ok(SessionOutcome::PreviewChanged)
    }

    /// Abandon any gesture, removing its preview from `doc` if still there.
    pub fn cancel(&mut self, doc: &mut Document) {
        if let SessionState::Dragging { preview, .. } = std::mem::take(&mut self.state) {
            // After an erase the store no longer holds this preview
            if doc.shapes().preview_id() != Some(preview) {
                debug!("Cancelled drag of {}, preview already gone", preview);
            } else if let Ok(shape) = doc.shapes_mut().discard_preview() {
                debug!("Cancelled {} drag of {}", shape.kind().tool().name(), shape.id());
            }
        }
        self.pointer = None;
    }

    /// Forget the current gesture without touching any document.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn session(tool: ToolKind) -> DrawingSession {
        DrawingSession::new(tool, Style::default())
    }

    #[test]
    fn test_drag_rubber_bands_preview() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Rectangle);

        session.pointer_down(Point::new(10.0, 10.0), &mut doc).unwrap();
        session
            .pointer_move(Point::new(4.0, 30.0), true, &mut doc)
            .unwrap();

        let preview = doc.shapes().preview().unwrap();
        let bounds = preview.kind().bounds();
        assert_eq!(bounds.origin, Point::new(4.0, 10.0));
        assert_eq!(bounds.width, 6.0);
        assert_eq!(bounds.height, 20.0);
        assert_eq!(session.pointer_label(), "Mouse Position: 4, 30px");
    }

    #[test]
    fn test_move_without_button_is_ignored() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Line);

        session.pointer_down(Point::new(1.0, 1.0), &mut doc).unwrap();
        let outcome = session
            .pointer_move(Point::new(50.0, 50.0), false, &mut doc)
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Ignored);
        assert!(doc.shapes().preview().unwrap().kind().is_degenerate());
        assert!(session.state().is_dragging());
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Line);
        let outcome = session
            .pointer_move(Point::new(5.0, 5.0), true, &mut doc)
            .unwrap();
        assert_eq!(outcome, SessionOutcome::Ignored);
        assert_eq!(session.pointer_position(), None);
    }

    #[test]
    fn test_double_pointer_down_is_rejected() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Ellipse);
        session.pointer_down(Point::ORIGIN, &mut doc).unwrap();
        assert!(matches!(
            session.pointer_down(Point::new(1.0, 1.0), &mut doc),
            Err(DrawingError::InvalidState(_))
        ));
        assert_eq!(doc.shapes().shapes().len(), 1);
    }

    #[test]
    fn test_pointer_up_commits_line_endpoints() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Line);

        session.pointer_down(Point::new(20.0, 20.0), &mut doc).unwrap();
        let id = session
            .pointer_up(Point::new(5.0, 2.0), &mut doc)
            .unwrap()
            .unwrap();

        let shape = doc.shapes().get(id).unwrap();
        assert_eq!(
            shape.kind(),
            &ShapeKind::Line {
                p1: Point::new(20.0, 20.0),
                p2: Point::new(5.0, 2.0),
            }
        );
        assert!(session.state().is_idle());
        assert_eq!(session.pointer_label(), POINTER_LABEL);
    }

    #[test]
    fn test_leave_solidifies_without_cancelling() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Rectangle);

        session.pointer_down(Point::ORIGIN, &mut doc).unwrap();
        session.pointer_leave(&mut doc).unwrap();

        let preview = doc.shapes().preview().unwrap();
        assert!(preview.is_preview());
        assert!(!preview.is_dashed());
        assert!(session.state().is_dragging());

        session
            .pointer_move(Point::new(900.0, -20.0), true, &mut doc)
            .unwrap();
        assert!(session.pointer_up(Point::new(900.0, -20.0), &mut doc).unwrap().is_some());
        assert_eq!(doc.shapes().count(), 1);
    }

    #[test]
    fn test_leave_while_idle_is_noop() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Line);
        assert_eq!(session.pointer_leave(&mut doc).unwrap(), SessionOutcome::Ignored);
    }

    #[test]
    fn test_tool_change_rejected_while_dragging() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Line);

        session.pointer_down(Point::ORIGIN, &mut doc).unwrap();
        assert!(!session.can_change_tool());
        assert!(session.set_tool(ToolKind::Ellipse).is_err());
        assert_eq!(session.tool(), ToolKind::Line);

        session.pointer_up(Point::new(3.0, 3.0), &mut doc).unwrap();
        assert!(session.can_change_tool());
        session.set_tool(ToolKind::Ellipse).unwrap();
        assert_eq!(session.tool(), ToolKind::Ellipse);
    }

    #[test]
    fn test_cleared_store_surfaces_no_active_preview() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Rectangle);

        session.pointer_down(Point::ORIGIN, &mut doc).unwrap();
        doc.erase();

        assert_eq!(
            session.pointer_move(Point::new(2.0, 2.0), true, &mut doc),
            Err(DrawingError::NoActivePreview)
        );
        assert_eq!(
            session.pointer_up(Point::new(2.0, 2.0), &mut doc),
            Err(DrawingError::NoActivePreview)
        );
        assert!(session.state().is_idle());
    }

    #[test]
    fn test_cancel_removes_preview() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Ellipse);
        session.pointer_down(Point::ORIGIN, &mut doc).unwrap();
        session.cancel(&mut doc);
        assert!(doc.shapes().is_empty());
        assert!(session.state().is_idle());
    }

    #[test]
    fn test_cancel_after_erase_keeps_committed_shapes() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Line);
        session.pointer_down(Point::ORIGIN, &mut doc).unwrap();
        doc.erase();

        let mut other = DrawingSession::new(ToolKind::Line, Style::default());
        other.pointer_down(Point::ORIGIN, &mut doc).unwrap();
        other.pointer_up(Point::new(4.0, 4.0), &mut doc).unwrap();

        session.cancel(&mut doc);
        assert_eq!(doc.shapes().count(), 1);
        assert!(session.state().is_idle());
    }

    #[test]
    fn test_handle_event_reports_outcomes() {
        let mut doc = Document::default();
        let mut session = session(ToolKind::Rectangle);
        let p = Point::new(8.0, 8.0);

        let down = session
            .handle_event(&InputEvent::PointerDown { position: p }, &mut doc)
            .unwrap();
        assert_eq!(down, SessionOutcome::PreviewChanged);
        let up = session
            .handle_event(&InputEvent::PointerUp { position: p }, &mut doc)
            .unwrap();
        assert_eq!(up, SessionOutcome::Discarded);

        let stray = session
            .handle_event(&InputEvent::PointerUp { position: p }, &mut doc)
            .unwrap();
        assert_eq!(stray, SessionOutcome::Ignored);
    }
}
