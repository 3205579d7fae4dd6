use std::sync::Arc;

use eframe::egui::{self, Color32, Painter, Pos2, Rect, Stroke, TextureHandle, TextureId};

use crate::document::{Background, Document, RasterImageRef};
use crate::geometry::{self, Point};
use crate::shape::{Shape, ShapeKind};

pub const DASH_LENGTH: f32 = 5.0;
pub const DASH_GAP: f32 = 5.0;
const ELLIPSE_SEGMENTS: usize = 64;

/// Paints a document onto the screen.
///
/// Keeps the GPU texture of the current background image so it is only
/// uploaded when the document's background changes.
#[derive(Default)]
pub struct Renderer {
    background: Option<(RasterImageRef, TextureHandle)>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_background_texture", &self.background.is_some())
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the background and every shape, preview included, into `rect`.
    pub fn render(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect, doc: &Document) {
        let painter = painter.with_clip_rect(rect);

        match doc.background() {
            Background::Solid(color) => {
                self.background = None;
                painter.rect_filled(rect, 0.0, color.to_color32());
            }
            Background::Image(image) => {
                let texture = self.background_texture(ctx, image);
                let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture, rect, uv, Color32::WHITE);
            }
        }

        for shape in doc.shapes().shapes() {
            paint_shape(&painter, rect.min, shape);
        }
    }

    fn background_texture(&mut self, ctx: &egui::Context, image: &RasterImageRef) -> TextureId {
        if let Some((cached, texture)) = &self.background {
            if Arc::ptr_eq(cached, image) {
                return texture.id();
            }
        }

        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [image.width() as usize, image.height() as usize],
            image.pixels(),
        );
        let texture = ctx.load_texture("background", color_image, egui::TextureOptions::default());
        let id = texture.id();
        self.background = Some((Arc::clone(image), texture));
        id
    }
}

fn to_screen(origin: Pos2, point: Point) -> Pos2 {
    origin + point.to_pos2().to_vec2()
}

fn outline(origin: Pos2, shape: &Shape) -> Vec<Pos2> {
    match shape.kind() {
        ShapeKind::Line { p1, p2 } => vec![to_screen(origin, *p1), to_screen(origin, *p2)],
        ShapeKind::Rectangle(bounds) => {
            let min = bounds.origin;
            let max = bounds.max();
            [
                min,
                Point::new(max.x, min.y),
                max,
                Point::new(min.x, max.y),
                min,
            ]
            .into_iter()
            .map(|p| to_screen(origin, p))
            .collect()
        }
        ShapeKind::Ellipse(bounds) => geometry::ellipse_outline(bounds, ELLIPSE_SEGMENTS)
            .into_iter()
            .map(|p| to_screen(origin, p))
            .collect(),
    }
}

/// Paint one shape; `origin` is the screen position of the canvas top-left.
pub fn paint_shape(painter: &Painter, origin: Pos2, shape: &Shape) {
    let style = shape.style();
    let stroke = Stroke::new(style.stroke_width() as f32, style.stroke_color.to_color32());
    let points = outline(origin, shape);

    if let (ShapeKind::Rectangle(_) | ShapeKind::Ellipse(_), Some(fill)) =
        (shape.kind(), style.fill_color())
    {
        // Drop the closing point; the polygon closes itself
        let ring = points[..points.len() - 1].to_vec();
        painter.add(egui::Shape::convex_polygon(ring, fill.to_color32(), Stroke::NONE));
    }

    if shape.is_dashed() {
        painter.extend(egui::Shape::dashed_line(&points, stroke, DASH_LENGTH, DASH_GAP));
    } else {
        painter.add(egui::Shape::line(points, stroke));
    }
}
