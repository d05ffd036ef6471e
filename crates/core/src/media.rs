//! Inline images exchanged with the generative service.
//!
//! Images travel as base64 payloads tagged with a MIME type, both when they
//! are attached to a request (photo to edit, faces to swap) and when they come
//! back in a reply. This module handles loading them from disk or data URLs,
//! sniffing their format, decoding them back to bytes, and shrinking oversized
//! inputs before upload.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// A base64-encoded image plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub mime_type: String,
    /// Standard base64, no data-URL prefix.
    pub data: String,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encodes raw image bytes, detecting the format from their magic number.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Image`] if the bytes are not PNG, JPEG or WebP.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes)
            .map_err(|e| AppError::image(format!("Unrecognised image data: {}", e)))?;
        match format {
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP => {
                Ok(Self::new(format.to_mime_type(), BASE64.encode(bytes)))
            }
            other => Err(AppError::image(format!(
                "Unsupported image format {:?}; use PNG, JPEG or WebP",
                other
            ))),
        }
    }

    /// Reads and encodes an image file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Parses a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| AppError::image("Data URL must start with 'data:'"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AppError::image("Data URL has no payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::image("Only base64 data URLs are supported"))?;
        if !mime_type.starts_with("image/") {
            return Err(AppError::image(format!("Not an image MIME type: {}", mime_type)));
        }
        Ok(Self::new(mime_type, payload))
    }

    /// Renders the image as a data URL, suitable for embedding in HTML.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decodes the base64 payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.data.as_bytes())
            .map_err(|e| AppError::image(format!("Invalid base64 image payload: {}", e)))
    }

    /// File extension matching the MIME type, without the dot.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }

    /// Decodes and writes the image to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.decode()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Image manipulation applied to inputs before they are uploaded.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Downscales an image so that its longest side is at most `max_side` pixels.
    ///
    /// Aspect ratio is preserved. JPEG inputs are re-encoded as JPEG, anything
    /// else as PNG. Images that already fit are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Image`] if the payload cannot be decoded or re-encoded.
    pub fn fit_within(image: &InlineImage, max_side: u32) -> Result<InlineImage> {
        if max_side == 0 {
            return Err(AppError::image("Maximum side length must be positive"));
        }

        let bytes = image.decode()?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| AppError::image(format!("Failed to decode image: {}", e)))?;

        if decoded.width() <= max_side && decoded.height() <= max_side {
            return Ok(image.clone());
        }

        // resize() keeps the aspect ratio and fits inside the given box
        let resized = decoded.resize(max_side, max_side, image::imageops::FilterType::Triangle);

        let format = if image.mime_type == "image/jpeg" {
            ImageFormat::Jpeg
        } else {
            ImageFormat::Png
        };
        Self::encode(&resized, format)
    }

    fn encode(image: &DynamicImage, format: ImageFormat) -> Result<InlineImage> {
        let mut buffer: Vec<u8> = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        // JPEG has no alpha channel
        let image = if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(image.to_rgb8())
        } else {
            image.clone()
        };

        image
            .write_to(&mut cursor, format)
            .map_err(|e| AppError::image(format!("Failed to encode image: {}", e)))?;

        Ok(InlineImage::new(format.to_mime_type(), BASE64.encode(buffer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn dimensions(image: &InlineImage) -> (u32, u32) {
        let decoded = image::load_from_memory(&image.decode().unwrap()).unwrap();
        (decoded.width(), decoded.height())
    }

    #[test]
    fn sniffs_png_from_bytes() {
        let image = InlineImage::from_bytes(&png(4, 4)).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.extension(), "png");
        assert_eq!(image.decode().unwrap(), png(4, 4));
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(matches!(
            InlineImage::from_bytes(b"definitely not an image"),
            Err(AppError::Image(_))
        ));
    }

    #[test]
    fn rejects_formats_outside_png_jpeg_webp() {
        let mut bmp = b"BM".to_vec();
        bmp.extend([0u8; 64]);
        let mut gif = b"GIF89a".to_vec();
        gif.extend([0u8; 32]);

        for bytes in [bmp, gif] {
            match InlineImage::from_bytes(&bytes) {
                Err(AppError::Image(message)) => assert!(message.contains("Unsupported"), "{message}"),
                other => panic!("expected unsupported format, got {other:?}"),
            }
        }
    }

    #[test]
    fn data_url_parsing() {
        let image = InlineImage::from_data_url("data:image/jpeg;base64,AAAA").unwrap();
        assert_eq!(image, InlineImage::new("image/jpeg", "AAAA"));
        assert_eq!(image.data_url(), "data:image/jpeg;base64,AAAA");
        assert_eq!(image.extension(), "jpg");

        assert!(InlineImage::from_data_url("image/png;base64,AAAA").is_err());
        assert!(InlineImage::from_data_url("data:image/png,AAAA").is_err());
        assert!(InlineImage::from_data_url("data:text/plain;base64,AAAA").is_err());
    }

    #[test]
    fn fit_within_downscales_large_images() {
        let image = InlineImage::from_bytes(&png(400, 200)).unwrap();
        let fitted = ImageProcessor::fit_within(&image, 100).unwrap();
        assert_eq!(dimensions(&fitted), (100, 50));
        assert_eq!(fitted.mime_type, "image/png");
    }

    #[test]
    fn fit_within_leaves_small_images_alone() {
        let image = InlineImage::from_bytes(&png(20, 10)).unwrap();
        let fitted = ImageProcessor::fit_within(&image, 100).unwrap();
        assert_eq!(fitted, image);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = InlineImage::from_bytes(&png(3, 3)).unwrap();
        image.save(&path).unwrap();
        assert_eq!(InlineImage::from_path(&path).unwrap(), image);
    }
}
