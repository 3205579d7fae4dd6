use image::RgbaImage;
use log::debug;
use tiny_skia::{
    ColorU8, FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

use crate::document::{Background, Document, RasterImage};
use crate::error::ExportError;
use crate::geometry::BoundingBox;
use crate::shape::{Shape, ShapeKind};
use crate::style::Color;

/// Turns a document into pixels for export.
///
/// Only committed shapes are drawn; an in-progress preview never reaches
/// the output.
pub trait Rasterizer {
    fn rasterize(&self, doc: &Document) -> Result<RgbaImage, ExportError>;
}

/// Anti-aliased CPU rasterizer backed by tiny-skia
#[derive(Debug, Clone, Copy, Default)]
pub struct SkiaRasterizer;

impl Rasterizer for SkiaRasterizer {
    fn rasterize(&self, doc: &Document) -> Result<RgbaImage, ExportError> {
        let [width, height] = doc.canvas_size();
        let mut pixmap =
            Pixmap::new(width, height).ok_or(ExportError::EmptyCanvas { width, height })?;

        match doc.background() {
            Background::Solid(color) => pixmap.fill(skia_color(*color)),
            Background::Image(image) => draw_background_image(&mut pixmap, image)?,
        }

        let mut drawn = 0;
        for shape in doc.committed_shapes() {
            draw_shape(&mut pixmap, shape)?;
            drawn += 1;
        }
        debug!("Rasterized {} shapes at {}x{}", drawn, width, height);

        let pixels = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| ExportError::Render("pixel buffer size mismatch".to_owned()))
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn draw_background_image(pixmap: &mut Pixmap, image: &RasterImage) -> Result<(), ExportError> {
    let size = IntSize::from_wh(image.width(), image.height())
        .ok_or_else(|| ExportError::Render("background image has no pixels".to_owned()))?;
    let premultiplied = image
        .pixels()
        .chunks_exact(4)
        .flat_map(|px| {
            let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let source = Pixmap::from_vec(premultiplied, size)
        .ok_or_else(|| ExportError::Render("invalid background image".to_owned()))?;

    // Stretch to fill the canvas
    let sx = pixmap.width() as f32 / image.width() as f32;
    let sy = pixmap.height() as f32 / image.height() as f32;
    pixmap.fill(tiny_skia::Color::WHITE);
    pixmap.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &PixmapPaint::default(),
        Transform::from_scale(sx, sy),
        None,
    );
    Ok(())
}

fn skia_rect(bounds: &BoundingBox) -> Option<Rect> {
    Rect::from_xywh(
        bounds.origin.x as f32,
        bounds.origin.y as f32,
        bounds.width as f32,
        bounds.height as f32,
    )
}

fn draw_shape(pixmap: &mut Pixmap, shape: &Shape) -> Result<(), ExportError> {
    let style = shape.style();
    let stroke = Stroke {
        width: style.stroke_width() as f32,
        ..Default::default()
    };
    let stroke_paint = paint_for(style.stroke_color);

    let path = match shape.kind() {
        ShapeKind::Line { p1, p2 } => {
            let mut pb = PathBuilder::new();
            pb.move_to(p1.x as f32, p1.y as f32);
            pb.line_to(p2.x as f32, p2.y as f32);
            pb.finish()
        }
        ShapeKind::Rectangle(bounds) => skia_rect(bounds).map(PathBuilder::from_rect),
        ShapeKind::Ellipse(bounds) => skia_rect(bounds).and_then(PathBuilder::from_oval),
    };

    // A zero-extent axis yields no path; there is nothing visible to draw
    let Some(path) = path else {
        debug!("Skipping shape {} with empty outline", shape.id());
        return Ok(());
    };

    if !matches!(shape.kind(), ShapeKind::Line { .. }) {
        if let Some(fill) = style.fill_color() {
            pixmap.fill_path(
                &path,
                &paint_for(fill),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
    pixmap.stroke_path(&path, &stroke_paint, &stroke, Transform::identity(), None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::session::DrawingSession;
    use crate::style::{FillMode, Style, StrokeThickness, ToolKind};
    use std::sync::Arc;

    fn draw(doc: &mut Document, tool: ToolKind, style: Style, from: Point, to: Point) {
        let mut session = DrawingSession::new(tool, style);
        session.pointer_down(from, doc).unwrap();
        session.pointer_up(to, doc).unwrap();
    }

    #[test]
    fn test_blank_canvas_is_white() {
        let doc = Document::new(4, 3);
        let image = SkiaRasterizer.rasterize(&doc).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_filled_rectangle_is_painted() {
        let mut doc = Document::new(20, 20);
        let style = Style {
            stroke_color: Color::BLACK,
            thickness: StrokeThickness::Px1,
            fill: FillMode::Filled(Color::from_rgb(255, 0, 0)),
        };
        draw(&mut doc, ToolKind::Rectangle, style, Point::new(2.0, 2.0), Point::new(18.0, 18.0));

        let image = SkiaRasterizer.rasterize(&doc).unwrap();
        assert_eq!(image.get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_preview_is_not_exported() {
        let mut doc = Document::new(10, 10);
        let style = Style {
            fill: FillMode::Filled(Color::BLACK),
            ..Style::default()
        };
        let mut session = DrawingSession::new(ToolKind::Rectangle, style);
        session.pointer_down(Point::new(0.0, 0.0), &mut doc).unwrap();
        session
            .pointer_move(Point::new(10.0, 10.0), true, &mut doc)
            .unwrap();

        let image = SkiaRasterizer.rasterize(&doc).unwrap();
        assert_eq!(image.get_pixel(5, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_background_image_is_stretched() {
        let mut doc = Document::new(4, 4);
        let pixels = [0u8, 128, 0, 255].repeat(4);
        let image = RasterImage::new(2, 2, pixels).unwrap();
        doc.replace_background(Arc::new(image), "green.png");

        let out = SkiaRasterizer.rasterize(&doc).unwrap();
        assert_eq!(out.get_pixel(3, 3).0, [0, 128, 0, 255]);
    }

    #[test]
    fn test_zero_sized_canvas_fails() {
        let doc = Document::new(0, 10);
        assert!(matches!(
            SkiaRasterizer.rasterize(&doc),
            Err(ExportError::EmptyCanvas { width: 0, height: 10 })
        ));
    }
}
