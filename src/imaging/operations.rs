//! High-level caption operation.
//!
//! Combines the fit calculation, the drawing passes and the optional canvas
//! into one call per caption.

use super::calculations::{TextFit, fit_text, needs_canvas};
use super::compose::{draw_caption, pad_to_canvas};
use super::font::CaptionFont;
use super::params::RenderParams;
use super::raster::SourceImage;
use image::{DynamicImage, ImageFormat};

/// A finished meme, ready to be encoded.
#[derive(Debug, Clone)]
pub struct Meme {
    pub image: DynamicImage,
    /// Output format: the source format, or JPEG when padded.
    pub format: ImageFormat,
    pub fit: TextFit,
    pub padded: bool,
}

/// Draw `text` onto `source` and apply canvas padding if configured.
pub fn caption_image(
    source: SourceImage,
    text: &str,
    font: &CaptionFont,
    params: &RenderParams,
) -> Meme {
    let dims = source.dimensions();
    let fit = fit_text(font, text, dims, &params.fit);
    if fit.overflows {
        tracing::warn!(
            font_size = fit.font_size,
            text_width = fit.text_width,
            image_width = dims.0,
            "caption is wider than the image at the smallest font size"
        );
    }

    let mut canvas = source.image.into_rgba8();
    draw_caption(&mut canvas, font, text, &fit, &params.style);

    match params.canvas {
        Some(ref background) if needs_canvas(dims, (background.width, background.height)) => {
            Meme {
                image: DynamicImage::ImageRgba8(pad_to_canvas(&canvas, background)),
                format: ImageFormat::Jpeg,
                fit,
                padded: true,
            }
        }
        _ => Meme {
            image: DynamicImage::ImageRgba8(canvas),
            format: source.format,
            fit,
            padded: false,
        },
    }
}
