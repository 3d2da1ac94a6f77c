//! Output files and the existence check that makes reruns cheap.
//!
//! A meme lives at `<output_dir>/<uid>.<ext>`. Before any network work the
//! pipeline asks [`exists`], which probes every known extension, so a
//! caption whose meme was saved as PNG is not redone even though the next
//! search might return a JPEG.

use crate::imaging::{KNOWN_EXTENSIONS, Meme, RasterError, encode_image, format_extension};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding failed: {0}")]
    Encode(#[from] RasterError),
}

/// The existing output for `uid`, if any, checking each known extension.
///
/// Unreadable directories count as "not found".
pub fn existing_output(output_dir: &Path, uid: &str) -> Option<PathBuf> {
    KNOWN_EXTENSIONS
        .iter()
        .map(|ext| output_dir.join(format!("{uid}.{ext}")))
        .find(|path| path.is_file())
}

/// Whether a meme for `uid` is already on disk.
pub fn exists(output_dir: &Path, uid: &str) -> bool {
    existing_output(output_dir, uid).is_some()
}

/// Encode `meme` and write it as `<uid>.<format>`.
///
/// Encoding happens in memory first, so a failure leaves no file behind.
/// The output directory is created if needed.
pub fn save(output_dir: &Path, uid: &str, meme: &Meme) -> Result<PathBuf, StoreError> {
    let ext = format_extension(meme.format).ok_or(RasterError::UnsupportedFormat(meme.format))?;
    let bytes = encode_image(&meme.image, meme.format)?;

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{uid}.{ext}"));
    std::fs::write(&path, bytes)?;
    Ok(path)
}
