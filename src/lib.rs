//! # cf-meme
//!
//! Context free memes: give it a caption, it finds a picture for it on the
//! web, writes the caption across the bottom of the picture in outlined
//! type, and saves the result under a name derived from the caption.
//!
//! # Architecture: One Caption at a Time
//!
//! ```text
//! caption → exists? → search + download → fit text → draw → pad? → save
//! ```
//!
//! Captions are processed strictly in sequence. Each one either produces a
//! file, is skipped because its file already exists, or is reported as not
//! found or failed; none of those stop the batch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`caption`] | Caption text, the MD5-derived 8-character identifier, caption files |
//! | [`search`] | [`ImageSource`](search::ImageSource) trait and the HTTP search provider |
//! | [`acquire`] | Walks candidates until one downloads and decodes |
//! | [`imaging`] | Font size search, placement, outlined drawing, canvas padding, codecs |
//! | [`store`] | `<uid>.<ext>` output files and the existence check |
//! | [`process`] | The per-caption pipeline and the batch loop |
//! | [`config`] | `cf-meme.toml` loading, merging over defaults, validation |
//! | [`output`] | CLI progress formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Content-Derived Filenames
//!
//! The output name is the first 8 hex digits of the MD5 of the caption. The
//! same caption always lands on the same file, which is what lets a rerun
//! over a long caption list skip everything already done without keeping
//! any state besides the images themselves. The existence check looks at
//! every extension a meme may have been written with.
//!
//! ## Linear Font Size Search
//!
//! Font sizes are tried from 200 down in steps of 10 until the caption fits
//! the image width with a 10 pixel margin. The step is coarse on purpose:
//! every meme made with the same font and image gets the same size, run
//! after run.
//!
//! ## Pluggable Search
//!
//! Image search sits behind a trait. The HTTP provider's endpoint is
//! configuration, and tests run the whole pipeline against an in-memory
//! source.

pub mod acquire;
pub mod caption;
pub mod config;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod process;
pub mod search;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
