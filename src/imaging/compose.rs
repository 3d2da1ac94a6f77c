//! Pixel work: outlined caption drawing and canvas padding.

use super::calculations::{TextFit, canvas_offset};
use super::font::CaptionFont;
use super::params::{CanvasParams, CaptionStyle};
use image::{Rgb, Rgba, RgbaImage};

/// The four diagonal outline offsets, in drawing order.
pub fn outline_offsets(offset: i32) -> [(i32, i32); 4] {
    [
        (-offset, -offset),
        (offset, -offset),
        (-offset, offset),
        (offset, offset),
    ]
}

/// Draw `text` with an outline: four outline passes, then the fill on top.
pub fn draw_caption(
    image: &mut RgbaImage,
    font: &CaptionFont,
    text: &str,
    fit: &TextFit,
    style: &CaptionStyle,
) {
    for (dx, dy) in outline_offsets(style.outline_offset) {
        let origin = (fit.origin_x + dx, fit.origin_y + dy);
        draw_text(image, font, text, fit.font_size, origin, style.outline);
    }
    draw_text(
        image,
        font,
        text,
        fit.font_size,
        (fit.origin_x, fit.origin_y),
        style.fill,
    );
}

/// Draw one pass of `text` in a solid colour, clipped to the image.
pub fn draw_text(
    image: &mut RgbaImage,
    font: &CaptionFont,
    text: &str,
    size: u32,
    origin: (i32, i32),
    color: Rgb<u8>,
) {
    let (width, height) = image.dimensions();
    font.rasterize(text, size, origin, |x, y, coverage| {
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            return;
        }
        blend(image.get_pixel_mut(x as u32, y as u32), color, coverage);
    });
}

/// Source-over blend of a solid colour at `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Rgb<u8>, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let inv = 1.0 - a;
    for c in 0..3 {
        dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv).round() as u8;
    }
    let dst_a = dst.0[3] as f32 / 255.0;
    dst.0[3] = ((a + dst_a * inv) * 255.0).round() as u8;
}

/// Paste `image` centered on a solid canvas.
///
/// Pixels are copied, not blended, so transparent areas keep their colour
/// channels. The caller decides whether the image qualifies.
pub fn pad_to_canvas(image: &RgbaImage, canvas: &CanvasParams) -> RgbaImage {
    let Rgb([r, g, b]) = canvas.background;
    let mut background = RgbaImage::from_pixel(canvas.width, canvas.height, Rgba([r, g, b, 255]));
    let (x, y) = canvas_offset((canvas.width, canvas.height), image.dimensions());
    image::imageops::replace(&mut background, image, x as i64, y as i64);
    background
}
