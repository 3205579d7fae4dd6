//! Persisted drawing settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::style::{Color, FillMode, StrokeThickness, Style, ToolKind};

/// User-selected tool and style, plus the default canvas size.
///
/// Missing fields fall back to their defaults when deserializing, so older
/// settings keep loading as fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    pub tool: ToolKind,
    pub stroke_color: Color,
    pub fill: FillMode,
    pub thickness: StrokeThickness,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        let style = Style::default();
        Self {
            tool: ToolKind::Line,
            stroke_color: style.stroke_color,
            fill: style.fill,
            thickness: style.thickness,
            canvas_width: 800,
            canvas_height: 600,
        }
    }
}

impl DrawingSettings {
    pub fn style(&self) -> Style {
        Style {
            stroke_color: self.stroke_color,
            thickness: self.thickness,
            fill: self.fill,
        }
    }

    pub fn set_style(&mut self, style: Style) {
        self.stroke_color = style.stroke_color;
        self.thickness = style.thickness;
        self.fill = style.fill;
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
