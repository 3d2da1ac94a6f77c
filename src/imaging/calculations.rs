//! Pure calculation functions for caption layout.
//!
//! Nothing here touches pixels or fonts directly: text size comes from a
//! [`TextMeasure`] implementation, so the fitting search and the placement
//! math are unit testable with a synthetic measure.

use super::params::FitParams;

/// Measures rendered text.
pub trait TextMeasure {
    /// Rendered `(width, height)` of `text` at `size` pixels.
    fn measure(&self, text: &str, size: u32) -> (u32, u32);
}

/// Result of fitting a caption to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFit {
    pub font_size: u32,
    pub text_width: u32,
    pub text_height: u32,
    /// Top-left corner of the text box. Negative when the text overflows.
    pub origin_x: i32,
    pub origin_y: i32,
    /// True when even the smallest size is wider than the image.
    pub overflows: bool,
}

/// Find the largest font size whose text fits the image width.
///
/// Linear search downward from `max_size` in steps of `step`. A size fits
/// when `text_width + margin <= image_width`. The search stops at
/// `min_size`; a caption that is still too wide there is returned at
/// `min_size` with `overflows` set.
///
/// # Examples
/// ```
/// # use cf_meme::imaging::{FitParams, TextMeasure, fit_text};
/// struct Mono;
/// impl TextMeasure for Mono {
///     fn measure(&self, text: &str, size: u32) -> (u32, u32) {
///         (text.chars().count() as u32 * size / 2, size)
///     }
/// }
/// // 5 chars at 200px = 500px wide, fits 800px on the first try
/// let fit = fit_text(&Mono, "hello", (800, 600), &FitParams::default());
/// assert_eq!(fit.font_size, 200);
/// ```
pub fn fit_text(
    measure: &impl TextMeasure,
    text: &str,
    image: (u32, u32),
    params: &FitParams,
) -> TextFit {
    let (image_w, image_h) = image;
    let mut size = params.max_size;
    let (mut text_w, mut text_h) = measure.measure(text, size);

    while text_w + params.margin > image_w && size > params.min_size {
        size = size.saturating_sub(params.step).max(params.min_size);
        (text_w, text_h) = measure.measure(text, size);
    }

    let (origin_x, origin_y) = text_origin(image, (text_w, text_h));
    TextFit {
        font_size: size,
        text_width: text_w,
        text_height: text_h,
        origin_x,
        origin_y,
        overflows: text_w + params.margin > image_w,
    }
}

/// Top-left corner for a text box of `text` size inside `image`.
///
/// Horizontally centered; vertically at five sixths of the free space, so
/// the caption sits near the bottom edge. Both axes are computed in floating
/// point and rounded to the nearest pixel.
pub fn text_origin(image: (u32, u32), text: (u32, u32)) -> (i32, i32) {
    let (image_w, image_h) = (image.0 as f64, image.1 as f64);
    let (text_w, text_h) = (text.0 as f64, text.1 as f64);

    let x = ((image_w - text_w) / 2.0).round() as i32;
    let y = ((image_h - text_h) / 6.0 * 5.0).round() as i32;
    (x, y)
}

/// Whether an image is small enough to be placed on the padding canvas.
///
/// Both edges must be strictly smaller than the canvas.
pub fn needs_canvas(image: (u32, u32), canvas: (u32, u32)) -> bool {
    image.0 < canvas.0 && image.1 < canvas.1
}

/// Offset that centers `image` on `canvas` (floor division).
pub fn canvas_offset(canvas: (u32, u32), image: (u32, u32)) -> (u32, u32) {
    (
        canvas.0.saturating_sub(image.0) / 2,
        canvas.1.saturating_sub(image.1) / 2,
    )
}
