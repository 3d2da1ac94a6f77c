//! Shared test utilities for the cf-meme test suite.
//!
//! Provides the fixture font, synthetic images in every supported format,
//! and [`MockSource`], an in-memory [`ImageSource`] that records calls.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = MockSource::new()
//!     .with_failure("http://a/404")
//!     .with_image("http://a/cat.png", encoded_image(800, 600, ImageFormat::Png));
//!
//! let image = acquire(&source, &Caption::new("cat")).unwrap();
//! assert_eq!(source.fetch_count(), 2);
//! ```

use crate::imaging::{CaptionFont, SourceImage, encode_image};
use crate::search::{ImageSource, SearchError};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::cell::RefCell;
use std::path::PathBuf;

// =========================================================================
// Fixtures
// =========================================================================

/// Path of the TrueType font shipped under `fixtures/fonts/`.
pub fn fixture_font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/fonts/DejaVuSans.ttf")
}

/// Load the fixture font. Panics if it is missing.
pub fn fixture_font() -> CaptionFont {
    CaptionFont::load(&fixture_font_path()).unwrap()
}

// =========================================================================
// Synthetic images
// =========================================================================

/// An RGB gradient, different in every pixel so drawing is detectable.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// A gradient encoded as `format`, as a download would deliver it.
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    encode_image(&gradient_image(width, height), format).unwrap()
}

/// A decoded gradient tagged with `format`.
pub fn source_image(width: u32, height: u32, format: ImageFormat) -> SourceImage {
    SourceImage {
        image: gradient_image(width, height),
        format,
    }
}

// =========================================================================
// Mock image source
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Search(String),
    Fetch(String),
}

/// Image source serving fixed candidates from memory.
///
/// Every query gets the same candidate list. A candidate registered with
/// [`with_failure`](Self::with_failure) fails to download.
#[derive(Default)]
pub struct MockSource {
    candidates: Vec<(String, Option<Vec<u8>>)>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.candidates.push((url.to_string(), Some(bytes)));
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.candidates.push((url.to_string(), None));
        self
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn search_count(&self) -> usize {
        self.count(|c| matches!(c, RecordedCall::Search(_)))
    }

    pub fn fetch_count(&self) -> usize {
        self.count(|c| matches!(c, RecordedCall::Fetch(_)))
    }

    fn count(&self, pred: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }
}

impl ImageSource for MockSource {
    fn candidate_urls(&self, query: &str) -> Vec<String> {
        self.calls
            .borrow_mut()
            .push(RecordedCall::Search(query.to_string()));
        self.candidates.iter().map(|(url, _)| url.clone()).collect()
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, SearchError> {
        self.calls
            .borrow_mut()
            .push(RecordedCall::Fetch(url.to_string()));
        self.candidates
            .iter()
            .find(|(u, _)| u == url)
            .and_then(|(_, bytes)| bytes.clone())
            .ok_or_else(|| SearchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
