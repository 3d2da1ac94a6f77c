//! Caption rendering in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` (JPEG, PNG, GIF) |
//! | **Measure / rasterize text** | `rusttype` |
//! | **Canvas paste** | `image::imageops::replace` |
//!
//! The module is split into:
//! - **Calculations**: font size search and placement math (unit testable)
//! - **Parameters**: data structures describing how a caption is drawn
//! - **Font**: [`CaptionFont`], the TrueType face used for every caption
//! - **Compose**: outline + fill drawing and canvas padding
//! - **Raster**: decoding downloads and encoding results
//! - **Operations**: one call that turns a source image into a [`Meme`]

mod calculations;
pub mod compose;
pub mod font;
pub mod operations;
mod params;
pub mod raster;

pub use calculations::{
    TextFit, TextMeasure, canvas_offset, fit_text, needs_canvas, text_origin,
};
pub use font::{CaptionFont, FontError};
pub use operations::{Meme, caption_image};
pub use params::{CanvasParams, CaptionStyle, FitParams, RenderParams};
pub use raster::{
    KNOWN_EXTENSIONS, RasterError, SourceImage, decode_image, encode_image, format_extension,
};
