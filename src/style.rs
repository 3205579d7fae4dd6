use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 8-bit-per-channel colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const BLUE: Self = Self::from_rgb(0, 0, 255);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    pub fn from_color32(value: egui::Color32) -> Self {
        let [r, g, b, a] = value.to_srgba_unmultiplied();
        Self::from_argb(a, r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// How the interior of rectangles and ellipses is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillMode {
    #[default]
    Transparent,
    Filled(Color),
}

impl FillMode {
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Transparent => None,
            Self::Filled(color) => Some(color),
        }
    }
}

/// The fixed set of stroke widths offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeThickness {
    #[default]
    Px1,
    Px2,
    Px4,
    Px6,
    Px8,
    Px10,
}

impl StrokeThickness {
    pub const ALL: [Self; 6] = [
        Self::Px1,
        Self::Px2,
        Self::Px4,
        Self::Px6,
        Self::Px8,
        Self::Px10,
    ];

    pub fn px(self) -> f64 {
        match self {
            Self::Px1 => 1.0,
            Self::Px2 => 2.0,
            Self::Px4 => 4.0,
            Self::Px6 => 6.0,
            Self::Px8 => 8.0,
            Self::Px10 => 10.0,
        }
    }

    pub fn from_px(px: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.px() == px)
    }
}

impl fmt::Display for StrokeThickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.px())
    }
}

/// Error returned when a thickness label is not one of the offered sizes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stroke thickness: {0:?}")]
pub struct ParseThicknessError(String);

impl FromStr for StrokeThickness {
    type Err = ParseThicknessError;

    /// Accepts labels such as `"4px"` or a bare `"4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        digits
            .parse::<u32>()
            .ok()
            .and_then(|n| Self::from_px(f64::from(n)))
            .ok_or_else(|| ParseThicknessError(s.to_owned()))
    }
}

/// The kind of shape the next drag creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Line,
    Rectangle,
    Ellipse,
}

impl ToolKind {
    pub const ALL: [Self; 3] = [Self::Line, Self::Rectangle, Self::Ellipse];

    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
        }
    }
}

/// Visual attributes captured by a shape when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke_color: Color,
    pub thickness: StrokeThickness,
    pub fill: FillMode,
}

impl Style {
    pub fn stroke_width(&self) -> f64 {
        self.thickness.px()
    }

    /// `None` means a transparent interior. Lines ignore it.
    pub fn fill_color(&self) -> Option<Color> {
        self.fill.color()
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLUE,
            thickness: StrokeThickness::Px1,
            fill: FillMode::Transparent,
        }
    }
}
