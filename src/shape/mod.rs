use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::geometry::{self, BoundingBox, Point};
use crate::style::{Style, ToolKind};

/// Opaque handle identifying a shape inside a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometry of a drawable shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Endpoints are kept exactly as dragged
    Line { p1: Point, p2: Point },
    Rectangle(BoundingBox),
    /// Ellipse inscribed in its bounding box
    Ellipse(BoundingBox),
}

impl ShapeKind {
    /// Geometry for a drag from `anchor` to `current` with the given tool.
    pub fn from_drag(tool: ToolKind, anchor: Point, current: Point) -> Self {
        match tool {
            ToolKind::Line => Self::Line {
                p1: anchor,
                p2: current,
            },
            ToolKind::Rectangle => Self::Rectangle(geometry::normalize(anchor, current)),
            ToolKind::Ellipse => Self::Ellipse(geometry::normalize(anchor, current)),
        }
    }

    pub fn tool(&self) -> ToolKind {
        match self {
            Self::Line { .. } => ToolKind::Line,
            Self::Rectangle(_) => ToolKind::Rectangle,
            Self::Ellipse(_) => ToolKind::Ellipse,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            Self::Line { p1, p2 } => geometry::normalize(*p1, *p2),
            Self::Rectangle(bounds) | Self::Ellipse(bounds) => *bounds,
        }
    }

    /// True when the drag that produced this geometry never moved.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Line { p1, p2 } => p1 == p2,
            Self::Rectangle(bounds) | Self::Ellipse(bounds) => bounds.is_empty(),
        }
    }
}

/// A shape on the canvas together with the style it was drawn with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    style: Style,
    is_preview: bool,
    dashed: bool,
}

impl Shape {
    pub(crate) fn new(kind: ShapeKind, style: Style) -> Self {
        Self {
            id: ShapeId::new(),
            kind,
            style,
            is_preview: false,
            dashed: false,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn is_preview(&self) -> bool {
        self.is_preview
    }

    /// Rendering hint: draw the outline with the dash pattern
    pub fn is_dashed(&self) -> bool {
        self.dashed
    }

    pub(crate) fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
    }

    pub(crate) fn mark_preview(&mut self) {
        self.is_preview = true;
        self.dashed = true;
    }

    pub(crate) fn set_dashed(&mut self, dashed: bool) {
        self.dashed = dashed;
    }

    pub(crate) fn mark_committed(&mut self) {
        self.is_preview = false;
        self.dashed = false;
    }
}

/// Factory functions for creating shapes
pub mod factory {
    use super::*;

    pub fn make_line(p1: Point, p2: Point, style: Style) -> Shape {
        Shape::new(ShapeKind::Line { p1, p2 }, style)
    }

    pub fn make_rectangle(p1: Point, p2: Point, style: Style) -> Shape {
        Shape::new(ShapeKind::Rectangle(geometry::normalize(p1, p2)), style)
    }

    pub fn make_ellipse(p1: Point, p2: Point, style: Style) -> Shape {
        Shape::new(ShapeKind::Ellipse(geometry::normalize(p1, p2)), style)
    }

    /// Create the shape the given tool draws between two points
    pub fn make_shape(tool: ToolKind, p1: Point, p2: Point, style: Style) -> Shape {
        match tool {
            ToolKind::Line => make_line(p1, p2, style),
            ToolKind::Rectangle => make_rectangle(p1, p2, style),
            ToolKind::Ellipse => make_ellipse(p1, p2, style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::factory::*;
    use super::*;
    use crate::style::{Color, FillMode, StrokeThickness};

    fn style() -> Style {
        Style {
            stroke_color: Color::BLACK,
            thickness: StrokeThickness::Px4,
            fill: FillMode::Filled(Color::WHITE),
        }
    }

    #[test]
    fn test_line_keeps_endpoints_verbatim() {
        let line = make_line(Point::new(30.0, 5.0), Point::new(2.0, 40.0), style());
        assert_eq!(
            line.kind(),
            &ShapeKind::Line {
                p1: Point::new(30.0, 5.0),
                p2: Point::new(2.0, 40.0),
            }
        );
        assert_eq!(line.style(), &style());
        assert!(!line.is_preview());
    }

    #[test]
    fn test_backward_rectangle_is_normalized() {
        let rect = make_rectangle(Point::new(50.0, 50.0), Point::new(20.0, 10.0), style());
        match rect.kind() {
            ShapeKind::Rectangle(bounds) => {
                assert_eq!(bounds.origin, Point::new(20.0, 10.0));
                assert_eq!(bounds.width, 30.0);
                assert_eq!(bounds.height, 40.0);
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn test_make_shape_dispatches_on_tool() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 3.0);
        for tool in ToolKind::ALL {
            assert_eq!(make_shape(tool, a, b, style()).kind().tool(), tool);
        }
        assert!(matches!(make_ellipse(a, b, style()).kind(), ShapeKind::Ellipse(_)));
    }

    #[test]
    fn test_degenerate_detection() {
        let p = Point::new(7.0, 7.0);
        for tool in ToolKind::ALL {
            assert!(ShapeKind::from_drag(tool, p, p).is_degenerate());
            assert!(!ShapeKind::from_drag(tool, p, Point::new(7.0, 8.0)).is_degenerate());
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let a = make_line(Point::ORIGIN, Point::ORIGIN, style());
        let b = make_line(Point::ORIGIN, Point::ORIGIN, style());
        assert_ne!(a.id(), b.id());
    }
}
