//! Image file output.
//!
//! Encodes a rendered buffer to png, jpg, or bmp, chosen by file extension.
//! The buffer is flipped vertically first: the renderer's row 0 is the
//! bottom of the picture, image files want it at the top.

use crate::renderer::{color_to_rgb8, ImageBuffer};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing the output file.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("unsupported output format `{0}`, use png, jpg or bmp")]
    UnsupportedFormat(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Save the rendered buffer to `path`.
///
/// The format follows the file extension (png, jpg/jpeg, bmp); anything
/// else is a recoverable `UnsupportedFormat` error. `jpeg_quality` is the
/// 0-100 quality used for jpg output and ignored otherwise.
pub fn save(image: &ImageBuffer, path: &Path, jpeg_quality: u8) -> Result<(), OutputError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rgb = to_flipped_rgb8(image);

    match extension.as_str() {
        "png" => rgb.save_with_format(path, ImageFormat::Png)?,
        "bmp" => rgb.save_with_format(path, ImageFormat::Bmp)?,
        "jpg" | "jpeg" => {
            let file = File::create(path)?;
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality);
            encoder.encode_image(&rgb)?;
        }
        _ => return Err(OutputError::UnsupportedFormat(extension)),
    }

    log::info!("image saved as {}", path.display());
    Ok(())
}

/// Gamma-correct, clamp, and flip to top-left origin.
fn to_flipped_rgb8(image: &ImageBuffer) -> RgbImage {
    RgbImage::from_fn(image.width, image.height, |x, y| {
        Rgb(color_to_rgb8(image.get(x, image.height - 1 - y)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_unsupported_extension_is_recoverable() {
        let image = ImageBuffer::new(2, 2);

        let err = save(&image, Path::new("render.tiff"), 100).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(ext) if ext == "tiff"));

        let err = save(&image, Path::new("render"), 100).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(ext) if ext.is_empty()));
    }

    #[test]
    fn test_flip_puts_row_zero_at_bottom() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 0, Color::new(1.0, 1.0, 1.0));
        image.set(0, 1, Color::ZERO);

        let rgb = to_flipped_rgb8(&image);
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(0, 1).0, [255, 255, 255]);
    }
}
