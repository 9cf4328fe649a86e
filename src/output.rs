//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Progress
//!
//! One header line per batch, then each item leads with its positional index
//! and source filename. The outcome is shown as indented context:
//!
//! ```text
//! Resizing 3 image(s) to 50% → resized_images
//! 001 dawn.jpg (800x600) → (400x300)
//!     Saved: resized_images/resized_dawn.jpg
//! 002 notes.jpg
//!     Failed: read failed: Failed to decode images/notes.jpg: ...
//! 003 tiny.png (3x3) → (1x1)
//!     Saved: resized_images/resized_tiny.png
//! ```
//!
//! ## Summary
//!
//! ```text
//! Resized 2 image(s), failed: 1.
//! Failed images:
//!     images/notes.jpg: read failed: ...
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::batch::BatchEvent;
use crate::types::{BatchItemResult, BatchSummary};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Discovery
// ============================================================================

/// Format the list of images found by a directory scan.
///
/// ```text
/// Found 2 image(s) in images
/// 001 a.jpg
/// 002 c.png
/// ```
pub fn format_discovered(input_dir: &Path, images: &[impl AsRef<Path>]) -> Vec<String> {
    if images.is_empty() {
        return vec!["No supported image files found. Nothing to do.".to_string()];
    }
    let mut lines = vec![format!(
        "Found {} image(s) in {}",
        images.len(),
        input_dir.display()
    )];
    for (i, image) in images.iter().enumerate() {
        let image = image.as_ref();
        let shown = image.strip_prefix(input_dir).unwrap_or(image);
        lines.push(format!("{} {}", format_index(i + 1), shown.display()));
    }
    lines
}

/// Print the scan listing to stdout.
pub fn print_discovered(input_dir: &Path, images: &[impl AsRef<Path>]) {
    for line in format_discovered(input_dir, images) {
        println!("{}", line);
    }
}

// ============================================================================
// Batch progress
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Started {
            total,
            output_dir,
            scale,
        } => vec![format!(
            "Resizing {} image(s) to {} → {}",
            total,
            scale,
            output_dir.display()
        )],
        BatchEvent::ItemFinished { index, result, .. } => {
            let name = file_name(result.source());
            match result {
                BatchItemResult::Success {
                    output,
                    original,
                    resized,
                    ..
                } => vec![
                    format!(
                        "{} {} ({}) → ({})",
                        format_index(*index),
                        name,
                        original,
                        resized
                    ),
                    format!("{}Saved: {}", indent(1), output.display()),
                ],
                BatchItemResult::Failure { error, .. } => vec![
                    format!("{} {}", format_index(*index), name),
                    format!("{}Failed: {}", indent(1), error),
                ],
            }
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Format the end-of-batch summary: counts, then each failure.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Resized {} image(s), failed: {}.",
        summary.succeeded(),
        summary.failed()
    )];
    if summary.was_cancelled() {
        lines.push("Batch was cancelled before all images were processed.".to_string());
    }
    let mut failures = summary.failures().peekable();
    if failures.peek().is_some() {
        lines.push("Failed images:".to_string());
        for (source, error) in failures {
            lines.push(format!("{}{}: {}", indent(1), source.display(), error));
        }
    }
    lines
}

/// Print the summary to stdout.
pub fn print_summary(summary: &BatchSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
