//! Decoding downloaded bytes and encoding finished memes.
//!
//! Only formats that can round-trip through the `image` crate and that the
//! deduplication check knows about are accepted: JPEG, PNG and GIF. A
//! candidate in any other format is treated as undecodable and skipped.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported image format: {0:?}")]
    UnsupportedFormat(ImageFormat),
}

/// Formats we decode and write, with the extension used in output filenames.
const FORMATS: &[(&str, ImageFormat)] = &[
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
];

/// Every extension an existing output may carry, including the `jpg` alias.
pub const KNOWN_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// A decoded image together with the format it arrived in.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

impl SourceImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// Lower-case filename extension for a supported format.
pub fn format_extension(format: ImageFormat) -> Option<&'static str> {
    FORMATS
        .iter()
        .find(|(_, fmt)| *fmt == format)
        .map(|(ext, _)| *ext)
}

/// Sniff the format from the bytes and decode.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, RasterError> {
    let format = image::guess_format(bytes)?;
    if format_extension(format).is_none() {
        return Err(RasterError::UnsupportedFormat(format));
    }
    let image = image::load_from_memory_with_format(bytes, format)?;
    Ok(SourceImage { image, format })
}

/// Encode into memory in the given format.
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn encode_image(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, RasterError> {
    if format_extension(format).is_none() {
        return Err(RasterError::UnsupportedFormat(format));
    }
    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut buf, format)?,
        _ => image.write_to(&mut buf, format)?,
    }
    Ok(buf.into_inner())
}
