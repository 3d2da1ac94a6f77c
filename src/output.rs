//! CLI output formatting.
//!
//! Each caption is shown by its position in the batch and its text, then
//! what became of it. Details (font size, canvas, warnings) follow on
//! indented lines.
//!
//! ```text
//! 001 "hello world" → memes/5eb63bbb.jpeg
//!     Font: 140px
//! 002 "one does not simply" → exists: memes/0c3ab2f1.png
//! 003 "asdfghjkl" → no image found
//!
//! 1 created, 1 skipped, 1 not found (3 total)
//! ```
//!
//! Format functions are pure and return lines; the `print_*` wrappers write
//! them to stdout.

use crate::process::{BatchSummary, MemeEvent};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn caption_header(index: usize, caption: &str) -> String {
    format!("{} \"{}\"", format_index(index), caption)
}

/// Lines describing one processed caption.
pub fn format_event(event: &MemeEvent) -> Vec<String> {
    match event {
        MemeEvent::Skipped {
            index,
            caption,
            existing,
        } => vec![format!(
            "{} \u{2192} exists: {}",
            caption_header(*index, caption),
            existing.display()
        )],
        MemeEvent::NotFound { index, caption } => {
            vec![format!(
                "{} \u{2192} no image found",
                caption_header(*index, caption)
            )]
        }
        MemeEvent::Created {
            index,
            caption,
            path,
            font_size,
            padded,
            overflows,
        } => {
            let mut lines = vec![
                format!("{} \u{2192} {}", caption_header(*index, caption), path.display()),
                format!("{}Font: {}px", indent(1), font_size),
            ];
            if *padded {
                lines.push(format!("{}Padded onto canvas", indent(1)));
            }
            if *overflows {
                lines.push(format!(
                    "{}Warning: caption is wider than the image",
                    indent(1)
                ));
            }
            lines
        }
        MemeEvent::Failed {
            index,
            caption,
            error,
        } => vec![format!(
            "{} \u{2192} failed: {}",
            caption_header(*index, caption),
            error
        )],
    }
}

pub fn print_event(event: &MemeEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}

/// Closing lines after a batch.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    vec![String::new(), summary.to_string()]
}

pub fn print_summary(summary: &BatchSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
