use std::fmt;
use std::sync::Arc;

use log::info;

use crate::shape::Shape;
use crate::store::ShapeStore;
use crate::style::Color;

pub const UNTITLED: &str = "Untitled";
pub const APP_NAME: &str = "SetPaint";

/// Decoded RGBA8 pixels shared between the document and the renderers
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

pub type RasterImageRef = Arc<RasterImage>;

impl RasterImage {
    /// `pixels` must hold `width * height * 4` bytes of straight-alpha RGBA.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        (pixels.len() == expected).then(|| Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

// Pixel data is too large to be useful in debug output
impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Color),
    /// Stretched to fill the canvas
    Image(RasterImageRef),
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid(Color::WHITE)
    }
}

/// Top-level drawing: background, shapes and save bookkeeping.
#[derive(Debug, Clone)]
pub struct Document {
    shapes: ShapeStore,
    background: Background,
    dirty: bool,
    display_name: String,
    save_baseline: usize,
    canvas_size: [u32; 2],
}

impl Default for Document {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Document {
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            shapes: ShapeStore::new(),
            background: Background::default(),
            dirty: false,
            display_name: UNTITLED.to_owned(),
            save_baseline: 0,
            canvas_size: [canvas_width, canvas_height],
        }
    }

    pub fn shapes(&self) -> &ShapeStore {
        &self.shapes
    }

    pub(crate) fn shapes_mut(&mut self) -> &mut ShapeStore {
        &mut self.shapes
    }

    /// Committed shapes in z-order; this is what gets exported.
    pub fn committed_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.committed()
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Whether committed work exists beyond the last save or open.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn window_title(&self) -> String {
        format!("{} - {}", self.display_name, APP_NAME)
    }

    pub fn save_baseline(&self) -> usize {
        self.save_baseline
    }

    pub fn canvas_size(&self) -> [u32; 2] {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = [width, height];
    }

    /// Re-evaluate the dirty flag after a shape was committed.
    pub(crate) fn record_commit(&mut self) {
        if self.shapes.count() > self.save_baseline {
            self.dirty = true;
        }
    }

    /// The canvas was written out successfully under `name`.
    pub fn mark_saved(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
        self.dirty = false;
        self.save_baseline = self.shapes.count();
        info!(
            "Saved {} with {} shapes",
            self.display_name, self.save_baseline
        );
    }

    /// Replace the background with an opened image, discarding all shapes.
    pub fn replace_background(&mut self, image: RasterImageRef, name: impl Into<String>) {
        self.shapes.clear();
        self.background = Background::Image(image);
        self.display_name = name.into();
        self.dirty = false;
        self.save_baseline = 0;
    }

    /// Remove every shape but keep the background and the dirty flag.
    pub fn erase(&mut self) {
        self.shapes.clear();
        self.save_baseline = 0;
    }

    /// Back to an empty, untitled, white canvas of the same size.
    pub fn reset(&mut self) {
        let [width, height] = self.canvas_size;
        *self = Self::new(width, height);
    }
}
