//! The editor owns exactly one document and the drawing session that
//! mutates it, and is the single entry point for hosts.
//!
//! File operations cancel any gesture in progress before they touch the
//! document, so the session never points at a preview that no longer exists.
//!
//! # Example
//!
//! ```rust
//! use set_paint::{Editor, InputEvent, Point, ToolKind};
//!
//! let mut editor = Editor::default();
//! editor.set_tool(ToolKind::Rectangle).unwrap();
//! editor.handle_input(&InputEvent::PointerDown { position: Point::new(0.0, 0.0) }).unwrap();
//! editor.handle_input(&InputEvent::PointerUp { position: Point::new(10.0, 10.0) }).unwrap();
//! assert_eq!(editor.document().shapes().count(), 1);
//! assert!(editor.needs_save());
//! ```
use std::path::Path;

use log::info;

use crate::config::DrawingSettings;
use crate::document::Document;
use crate::error::{DrawingResult, ExportError, ImportError};
use crate::file_handler;
use crate::input::InputEvent;
use crate::raster::Rasterizer;
use crate::session::{DrawingSession, SessionOutcome};
use crate::style::{Color, FillMode, StrokeThickness, Style, ToolKind};

#[derive(Debug, Clone, Default)]
pub struct Editor {
    document: Document,
    session: DrawingSession,
}

impl Editor {
    pub fn new(settings: &DrawingSettings) -> Self {
        Self {
            document: Document::new(settings.canvas_width, settings.canvas_height),
            session: DrawingSession::new(settings.tool, settings.style()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> DrawingResult<SessionOutcome> {
        self.session.handle_event(event, &mut self.document)
    }

    pub fn needs_save(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn tool(&self) -> ToolKind {
        self.session.tool()
    }

    pub fn can_change_tool(&self) -> bool {
        self.session.can_change_tool()
    }

    pub fn set_tool(&mut self, tool: ToolKind) -> DrawingResult<()> {
        self.session.set_tool(tool)
    }

    pub fn style(&self) -> &Style {
        self.session.style()
    }

    pub fn set_style(&mut self, style: Style) {
        self.session.set_style(style);
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.set_style(Style {
            stroke_color: color,
            ..*self.style()
        });
    }

    pub fn set_fill(&mut self, fill: FillMode) {
        self.set_style(Style {
            fill,
            ..*self.style()
        });
    }

    pub fn set_thickness(&mut self, thickness: StrokeThickness) {
        self.set_style(Style {
            thickness,
            ..*self.style()
        });
    }

    /// Current tool and style, for persisting
    pub fn settings(&self) -> DrawingSettings {
        let [canvas_width, canvas_height] = self.document.canvas_size();
        let mut settings = DrawingSettings {
            tool: self.tool(),
            canvas_width,
            canvas_height,
            ..DrawingSettings::default()
        };
        settings.set_style(*self.style());
        settings
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.document.set_canvas_size(width, height);
    }

    /// Drop the in-progress gesture, if any.
    pub fn cancel_gesture(&mut self) {
        self.session.cancel(&mut self.document);
    }

    /// Start over with an empty untitled canvas.
    pub fn new_document(&mut self) {
        self.session.reset();
        self.document.reset();
        info!("Started a new document");
    }

    /// Remove every shape from the canvas, keeping the background.
    pub fn erase(&mut self) {
        self.session.reset();
        self.document.erase();
        info!("Erased canvas");
    }

    /// Replace the drawing with the image at `path`.
    ///
    /// The gesture in progress survives a failed load.
    pub fn open_background(&mut self, path: &Path) -> Result<(), ImportError> {
        let image = file_handler::load_image(path)?;
        self.cancel_gesture();
        file_handler::apply_background(&mut self.document, path, image);
        Ok(())
    }

    pub fn save_png(&mut self, path: &Path, rasterizer: &dyn Rasterizer) -> Result<(), ExportError> {
        self.cancel_gesture();
        file_handler::save_png(&mut self.document, path, rasterizer)
    }
}
