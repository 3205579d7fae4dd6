use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;
use log::{error, info};

use crate::document::{Document, RasterImage};
use crate::error::{ExportError, ImportError};
use crate::raster::Rasterizer;

/// Name shown for a file in the window title
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Rasterize and encode the document as PNG bytes.
pub fn encode_png(doc: &Document, rasterizer: &dyn Rasterizer) -> Result<Vec<u8>, ExportError> {
    let image = rasterizer.rasterize(doc)?;
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Export the canvas to `path` as a PNG.
///
/// On success the document takes the file's name and its current shape
/// count becomes the save baseline. On failure the document is untouched.
pub fn save_png(
    doc: &mut Document,
    path: &Path,
    rasterizer: &dyn Rasterizer,
) -> Result<(), ExportError> {
    let bytes = encode_png(doc, rasterizer).inspect_err(|err| {
        error!("Could not encode {}: {}", path.display(), err);
    })?;
    write_file(path, &bytes).inspect_err(|err| {
        error!("Could not save {}: {}", path.display(), err);
    })?;

    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    doc.mark_saved(display_name(path));
    Ok(())
}

// The writer is dropped, and the handle released, on every return path
fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()
}

/// Decode the image at `path`.
pub fn load_image(path: &Path) -> Result<RasterImage, ImportError> {
    let decoded = image::open(path).map_err(|source| ImportError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    // An RgbaImage always holds width * height * 4 bytes
    RasterImage::new(width, height, rgba.into_raw()).ok_or_else(|| ImportError::Load {
        path: path.to_path_buf(),
        source: image::ImageError::Limits(image::error::LimitError::from_kind(
            image::error::LimitErrorKind::DimensionError,
        )),
    })
}

/// Install an image decoded from `path` as the new flattened background.
///
/// Existing shapes are discarded and the document becomes clean.
pub fn apply_background(doc: &mut Document, path: &Path, image: RasterImage) {
    info!(
        "Opened {} ({}x{}) as background",
        path.display(),
        image.width(),
        image.height()
    );
    doc.replace_background(Arc::new(image), display_name(path));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::SkiaRasterizer;

    #[test]
    fn test_display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("/tmp/pictures/cat.png")), "cat.png");
        assert_eq!(display_name(Path::new("drawing.png")), "drawing.png");
    }

    #[test]
    fn test_encode_png_has_signature() {
        let doc = Document::new(8, 8);
        let bytes = encode_png(&doc, &SkiaRasterizer).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(err.to_string().contains("here.png"));
    }
}
