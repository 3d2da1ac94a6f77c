//! Turning a caption into a decoded source image.
//!
//! Candidates are tried in ranked order. A candidate that fails to download
//! or decode is logged and skipped; the first one that decodes wins. No
//! candidate at all is not an error, just `None`.

use crate::caption::Caption;
use crate::imaging::{SourceImage, decode_image};
use crate::search::ImageSource;

/// Find the first usable image for `caption`.
pub fn acquire(source: &impl ImageSource, caption: &Caption) -> Option<SourceImage> {
    let urls = source.candidate_urls(caption.text());
    if urls.is_empty() {
        tracing::debug!(uid = caption.uid(), "no candidates");
        return None;
    }

    for url in &urls {
        let bytes = match source.fetch(url) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(uid = caption.uid(), %url, error = %e, "download failed");
                continue;
            }
        };
        match decode_image(&bytes) {
            Ok(image) => {
                tracing::debug!(
                    uid = caption.uid(),
                    %url,
                    width = image.image.width(),
                    height = image.image.height(),
                    "candidate decoded"
                );
                return Some(image);
            }
            Err(e) => {
                tracing::warn!(uid = caption.uid(), %url, error = %e, "not a usable image");
            }
        }
    }
    None
}
