#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod session;
pub mod shape;
pub mod store;
pub mod style;

pub use app::PaintApp;
pub use config::DrawingSettings;
pub use document::{Background, Document, RasterImage};
pub use editor::Editor;
pub use error::{DrawingError, ExportError, ImportError};
pub use geometry::{BoundingBox, Point, normalize};
pub use input::{InputEvent, InputHandler};
pub use raster::{Rasterizer, SkiaRasterizer};
pub use renderer::Renderer;
pub use session::{DrawingSession, SessionOutcome, SessionState};
pub use shape::{Shape, ShapeId, ShapeKind};
pub use store::ShapeStore;
pub use style::{Color, FillMode, StrokeThickness, Style, ToolKind};
