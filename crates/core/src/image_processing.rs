//! Image payload conversions.
//!
//! The generation endpoint returns raw base64. The form stores it as a
//! `data:image/jpeg;base64,..` URI, which is also what gets published. For
//! the preview this module turns the URI back into pixels.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use eframe::egui;
use image::DynamicImage;
use std::path::Path;

/// Prefix placed in front of every generated photo.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Wraps a base64 payload from the generation endpoint into a displayable data URI.
pub fn photo_data_uri(base64_photo: &str) -> String {
    format!("{}{}", JPEG_DATA_URI_PREFIX, base64_photo)
}

/// Extracts the base64 payload from a `data:<mime>;base64,` URI.
pub fn data_uri_payload(uri: &str) -> Result<&str> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| AppError::image("not a data URI"))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::image("data URI has no payload"))?;

    if !header.ends_with(";base64") {
        return Err(AppError::image("data URI is not base64 encoded"));
    }

    Ok(payload)
}

/// Decodes a data URI into an image. The format is sniffed from the bytes,
/// so PNG payloads labelled as JPEG still load.
pub fn decode_data_uri(uri: &str) -> Result<DynamicImage> {
    let payload = data_uri_payload(uri)?;
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| AppError::image(format!("Invalid base64 payload: {}", e)))?;

    image::load_from_memory(&bytes)
        .map_err(|e| AppError::image(format!("Failed to decode image: {}", e)))
}

/// Converts a decoded image into an egui texture source.
pub fn to_color_image(image: &DynamicImage) -> egui::ColorImage {
    let image_buffer = image.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let pixels = image_buffer.as_flat_samples();
    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice())
}

/// Decodes a data URI and writes it to `path`. The output format follows the
/// file extension.
pub fn save_photo(uri: &str, path: &Path) -> Result<()> {
    let image = decode_data_uri(uri)?;
    image
        .save(path)
        .map_err(|e| AppError::image(format!("Failed to save {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn tiny_png_base64() -> String {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 3, image::Rgb([200, 10, 10])));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        BASE64.encode(buffer)
    }

    #[test]
    fn test_photo_data_uri() {
        assert_eq!(photo_data_uri("Zm9v"), "data:image/jpeg;base64,Zm9v");
    }

    #[test]
    fn test_payload_extraction() {
        assert_eq!(data_uri_payload("data:image/png;base64,AAAA").unwrap(), "AAAA");
        assert!(data_uri_payload("https://example.com/a.jpg").is_err());
        assert!(data_uri_payload("data:image/png;base64").is_err());
        assert!(data_uri_payload("data:text/plain,hello").is_err());
    }

    #[test]
    fn test_decode_round_trip_dimensions() {
        let uri = photo_data_uri(&tiny_png_base64());
        let image = decode_data_uri(&uri).unwrap();
        assert_eq!((image.width(), image.height()), (2, 3));

        let color = to_color_image(&image);
        assert_eq!(color.size, [2, 3]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_data_uri("data:image/jpeg;base64,Zm9v"),
            Err(AppError::ImageProcessing(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/jpeg;base64,***"),
            Err(AppError::ImageProcessing(_))
        ));
    }
}
