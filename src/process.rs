//! The caption pipeline.
//!
//! Every caption goes through the same linear steps, one caption at a time:
//!
//! ```text
//! caption ─▶ exists? ──yes──▶ Skipped
//!               │no
//!               ▼
//!           acquire ──none──▶ NotFound
//!               │image
//!               ▼
//!     fit text ─▶ draw ─▶ pad (optional) ─▶ save ──err──▶ Failed
//!                                             │ok
//!                                             ▼
//!                                          Created
//! ```
//!
//! Nothing is retried. A caption that ends in `NotFound` or `Failed` leaves
//! no file behind and the batch moves on. Only setup problems (the font, the
//! HTTP client) abort a run, and they surface before the first caption.
//!
//! Progress is reported as [`MemeEvent`]s over an optional channel so the
//! CLI can print while the batch runs.

use crate::acquire::acquire;
use crate::caption::Caption;
use crate::config::MemeConfig;
use crate::imaging::{CaptionFont, FontError, RenderParams, caption_image};
use crate::search::{HttpImageSource, ImageSource, SearchError};
use crate::store;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Font error: {0}")]
    Font(#[from] FontError),
    #[error("Image search setup failed: {0}")]
    Search(#[from] SearchError),
}

/// What happened to one caption.
#[derive(Debug, Clone, PartialEq)]
pub enum MemeEvent {
    /// An output for this caption was already on disk.
    Skipped {
        index: usize,
        caption: String,
        existing: PathBuf,
    },
    /// No candidate image could be downloaded and decoded.
    NotFound { index: usize, caption: String },
    Created {
        index: usize,
        caption: String,
        path: PathBuf,
        font_size: u32,
        padded: bool,
        /// The caption was wider than the image even at the smallest size.
        overflows: bool,
    },
    /// The image was found but could not be written.
    Failed {
        index: usize,
        caption: String,
        error: String,
    },
}

/// Tally of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub created: u32,
    pub skipped: u32,
    pub not_found: u32,
    pub failed: u32,
}

impl BatchSummary {
    pub fn record(&mut self, event: &MemeEvent) {
        match event {
            MemeEvent::Skipped { .. } => self.skipped += 1,
            MemeEvent::NotFound { .. } => self.not_found += 1,
            MemeEvent::Created { .. } => self.created += 1,
            MemeEvent::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.created + self.skipped + self.not_found + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} skipped, {} not found",
            self.created, self.skipped, self.not_found
        )?;
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        write!(f, " ({} total)", self.total())
    }
}

/// Everything needed to turn captions into memes.
pub struct Pipeline<S> {
    source: S,
    font: CaptionFont,
    params: RenderParams,
    output_dir: PathBuf,
}

impl Pipeline<HttpImageSource> {
    /// Production pipeline: HTTP search plus the configured font.
    ///
    /// The font is loaded here, so a missing font fails the whole run before
    /// any caption is looked at.
    pub fn from_config(config: &MemeConfig) -> Result<Self, ProcessError> {
        let font = CaptionFont::load(&config.text.font)?;
        let source = HttpImageSource::new(&config.search)?;
        Ok(Self::new(
            source,
            font,
            RenderParams::from_config(config),
            config.output_dir.clone(),
        ))
    }
}

impl<S: ImageSource> Pipeline<S> {
    pub fn new(source: S, font: CaptionFont, params: RenderParams, output_dir: PathBuf) -> Self {
        Self {
            source,
            font,
            params,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one caption through the pipeline. `index` is its 1-based position.
    pub fn process_caption(&self, index: usize, caption: &Caption) -> MemeEvent {
        let text = caption.text().to_string();

        if let Some(existing) = store::existing_output(&self.output_dir, caption.uid()) {
            tracing::debug!(uid = caption.uid(), path = %existing.display(), "already done");
            return MemeEvent::Skipped {
                index,
                caption: text,
                existing,
            };
        }

        let Some(source) = acquire(&self.source, caption) else {
            tracing::warn!(uid = caption.uid(), caption = %text, "no image found");
            return MemeEvent::NotFound {
                index,
                caption: text,
            };
        };

        let meme = caption_image(source, caption.text(), &self.font, &self.params);
        match store::save(&self.output_dir, caption.uid(), &meme) {
            Ok(path) => {
                tracing::info!(
                    uid = caption.uid(),
                    path = %path.display(),
                    font_size = meme.fit.font_size,
                    "meme created"
                );
                MemeEvent::Created {
                    index,
                    caption: text,
                    path,
                    font_size: meme.fit.font_size,
                    padded: meme.padded,
                    overflows: meme.fit.overflows,
                }
            }
            Err(e) => {
                tracing::warn!(uid = caption.uid(), error = %e, "saving failed");
                MemeEvent::Failed {
                    index,
                    caption: text,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Process `captions` in order, one at a time.
    ///
    /// Each event is sent on `events` (if given) as soon as its caption is
    /// done. A dropped receiver does not stop the batch.
    pub fn run(&self, captions: &[Caption], events: Option<Sender<MemeEvent>>) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for (i, caption) in captions.iter().enumerate() {
            let event = self.process_caption(i + 1, caption);
            summary.record(&event);
            if let Some(tx) = &events {
                tx.send(event).ok();
            }
        }
        tracing::debug!(%summary, "batch finished");
        summary
    }
}
