//! Parameter types for caption rendering.
//!
//! These structs describe *what* to draw, not *how*. They are built once
//! from the loaded configuration and handed to the
//! [`operations`](super::operations) layer for every caption.
//!
//! ## Types
//!
//! - [`FitParams`]: Font size search bounds: ceiling, floor, step, margin.
//! - [`CaptionStyle`]: Outline offset plus outline and fill colours.
//! - [`CanvasParams`]: Size and colour of the padding canvas for small images.
//! - [`RenderParams`]: Everything above; `canvas: None` disables padding.

use crate::config::MemeConfig;
use image::Rgb;

/// Bounds for the font size search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitParams {
    pub max_size: u32,
    pub min_size: u32,
    pub step: u32,
    /// Horizontal slack the text must leave inside the image.
    pub margin: u32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            max_size: 200,
            min_size: 10,
            step: 10,
            margin: 10,
        }
    }
}

/// How the caption is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionStyle {
    /// Pixel distance of the four diagonal outline passes.
    pub outline_offset: i32,
    pub outline: Rgb<u8>,
    pub fill: Rgb<u8>,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            outline_offset: 2,
            outline: Rgb([0, 0, 0]),
            fill: Rgb([255, 255, 255]),
        }
    }
}

/// Background canvas for images smaller than `width` × `height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasParams {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
}

impl Default for CanvasParams {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 900,
            background: Rgb([68, 68, 68]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderParams {
    pub fit: FitParams,
    pub style: CaptionStyle,
    pub canvas: Option<CanvasParams>,
}

impl RenderParams {
    /// Build render parameters from the `[text]` and `[canvas]` config sections.
    pub fn from_config(config: &MemeConfig) -> Self {
        let text = &config.text;
        let canvas = &config.canvas;
        Self {
            fit: FitParams {
                max_size: text.max_size,
                min_size: text.min_size,
                step: text.step,
                margin: text.margin,
            },
            style: CaptionStyle {
                outline_offset: text.outline_offset,
                outline: Rgb(text.outline_color),
                fill: Rgb(text.fill_color),
            },
            canvas: canvas.enabled.then(|| CanvasParams {
                width: canvas.width,
                height: canvas.height,
                background: Rgb(canvas.background),
            }),
        }
    }
}
