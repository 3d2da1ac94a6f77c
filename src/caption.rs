//! Captions and their content-derived identifiers.
//!
//! Every caption gets a short identifier: the first 8 hex digits of the MD5
//! digest of its UTF-8 text. The identifier is both the output filename stem
//! and the deduplication key, so identical text always maps to the same file
//! and a second run over the same captions does no work.
//!
//! ```text
//! "hello world"  →  5eb63bbb  →  5eb63bbb.jpeg
//! ```
//!
//! Eight hex digits is 32 bits of the digest. Collisions are possible across
//! very large caption sets; changing the length would rename every existing
//! output, so it stays fixed.

use md5::{Digest, Md5};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of hex digits kept from the digest.
pub const UID_LEN: usize = 8;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("Error opening {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An immutable caption and its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    text: String,
    uid: String,
}

impl Caption {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let uid = caption_uid(&text);
        Self { text, uid }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 8 lowercase hex characters, stable across runs.
    pub fn uid(&self) -> &str {
        &self.uid
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.uid)
    }
}

/// Derive the identifier for a caption text.
pub fn caption_uid(text: &str) -> String {
    let digest = Md5::digest(text.as_bytes());
    let hex = format!("{:x}", digest);
    hex[..UID_LEN].to_string()
}

/// Split file contents into captions, one per line.
///
/// Surrounding whitespace is trimmed. Blank lines are kept as empty captions
/// so line numbers in the input still line up with the batch output.
pub fn parse_captions(content: &str) -> Vec<Caption> {
    content.lines().map(|line| Caption::new(line.trim())).collect()
}

/// Read a caption file.
pub fn read_captions(path: &Path) -> Result<Vec<Caption>, CaptionError> {
    let content = std::fs::read_to_string(path).map_err(|source| CaptionError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_captions(&content))
}
