use serde::{Deserialize, Serialize};

use super::Point;

/// Axis-aligned box described by its top-left corner and its extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn max(&self) -> Point {
        Point::new(self.origin.x + self.width, self.origin.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Box spanned by two arbitrary corners, independent of drag direction.
///
/// Equal coordinates on an axis give a zero extent on that axis.
pub fn normalize(p1: Point, p2: Point) -> BoundingBox {
    BoundingBox {
        origin: Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
        width: (p2.x - p1.x).abs(),
        height: (p2.y - p1.y).abs(),
    }
}

/// Closed polyline approximating the ellipse inscribed in `bounds`.
///
/// The first point is repeated at the end so dashed strokes close the loop.
pub fn ellipse_outline(bounds: &BoundingBox, segments: usize) -> Vec<Point> {
    let segments = segments.max(3);
    let center = bounds.center();
    let rx = bounds.width / 2.0;
    let ry = bounds.height / 2.0;

    (0..=segments)
        .map(|i| {
            let theta = std::f64::consts::TAU * (i % segments) as f64 / segments as f64;
            Point::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
        })
        .collect()
}
