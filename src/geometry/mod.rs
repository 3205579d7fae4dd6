mod bounds;

pub use bounds::{BoundingBox, ellipse_outline, normalize};

use serde::{Deserialize, Serialize};

/// A position in canvas-local coordinates.
///
/// The origin is the top-left corner of the canvas and `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x as f32, self.y as f32)
    }

    pub fn from_pos2(value: egui::Pos2) -> Self {
        Self {
            x: f64::from(value.x),
            y: f64::from(value.y),
        }
    }
}

impl From<egui::Pos2> for Point {
    fn from(value: egui::Pos2) -> Self {
        Self::from_pos2(value)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
