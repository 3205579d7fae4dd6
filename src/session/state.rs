use crate::geometry::Point;
use crate::shape::ShapeId;

/// The two states of a drawing gesture.
///
/// ```text
///            pointer down
///   ┌──────┐ ───────────► ┌──────────┐ ─┐ pointer move / leave
///   │ Idle │              │ Dragging │  │
///   └──────┘ ◄─────────── └──────────┘ ◄┘
///             pointer up
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Dragging {
        /// Where the pointer went down
        anchor: Point,
        /// The preview shape being rubber-banded
        preview: ShapeId,
    },
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn anchor(&self) -> Option<Point> {
        match self {
            Self::Dragging { anchor, .. } => Some(*anchor),
            Self::Idle => None,
        }
    }
}
