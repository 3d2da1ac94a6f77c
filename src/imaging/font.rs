//! TrueType font loading, measurement and glyph rasterization.
//!
//! Backed by `rusttype`. A [`CaptionFont`] is loaded once at startup; a
//! missing or unparsable font file is fatal because no caption can be drawn
//! without it.

use super::calculations::TextMeasure;
use rusttype::{Font, Scale, point};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Cannot read font {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not a usable TrueType font: {}", .0.display())]
    Parse(PathBuf),
}

pub struct CaptionFont {
    font: Font<'static>,
    path: PathBuf,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl CaptionFont {
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font =
            Font::try_from_vec(bytes).ok_or_else(|| FontError::Parse(path.to_path_buf()))?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rasterize `text` with its top-left corner at `origin`.
    ///
    /// Calls `plot(x, y, coverage)` for every covered pixel, where coverage is
    /// in `0.0..=1.0`. Coordinates may be negative or beyond the image; the
    /// caller clips.
    pub fn rasterize(
        &self,
        text: &str,
        size: u32,
        origin: (i32, i32),
        mut plot: impl FnMut(i32, i32, f32),
    ) {
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.font.v_metrics(scale);
        let start = point(origin.0 as f32, origin.1 as f32 + v_metrics.ascent);

        for glyph in self.font.layout(text, scale, start) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    plot(bb.min.x + gx as i32, bb.min.y + gy as i32, coverage);
                });
            }
        }
    }
}

impl TextMeasure for CaptionFont {
    /// Width runs to the advance of the last glyph (kerning included);
    /// height is ascent to descent of the font at this size.
    fn measure(&self, text: &str, size: u32) -> (u32, u32) {
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.font.v_metrics(scale);
        let width = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let height = v_metrics.ascent - v_metrics.descent;
        (width.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
    }
}
