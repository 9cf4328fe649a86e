//! Shared types passed between the runner, the front end and the output
//! formatter.
//!
//! Everything here is plain data. Per-item failures are values of
//! [`ItemError`], not propagated errors, so a finished batch can be inspected,
//! printed or serialized as a whole.

use crate::imaging::Dimensions;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A source image named by the caller.
///
/// Only the path is known up front; pixel dimensions are read when the item
/// is processed and reported on its [`BatchItemResult`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageRef {
    pub path: PathBuf,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl From<PathBuf> for ImageRef {
    fn from(path: PathBuf) -> Self {
        Self { path }
    }
}

impl From<&Path> for ImageRef {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for ImageRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Why a single item failed. Recorded, never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ItemError {
    /// Could not open or decode the source.
    #[error("read failed: {0}")]
    Read(String),
    /// Decoded, but the resample step failed.
    #[error("resample failed: {0}")]
    Resample(String),
    /// Could not name, encode or write the output.
    #[error("write failed: {0}")]
    Write(String),
    /// The batch was cancelled before this item started.
    #[error("cancelled before processing")]
    Cancelled,
}

/// Outcome of one batch item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItemResult {
    Success {
        source: PathBuf,
        output: PathBuf,
        original: Dimensions,
        resized: Dimensions,
    },
    Failure {
        source: PathBuf,
        error: ItemError,
    },
}

impl BatchItemResult {
    pub fn source(&self) -> &Path {
        match self {
            BatchItemResult::Success { source, .. } | BatchItemResult::Failure { source, .. } => {
                source
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchItemResult::Success { .. })
    }
}

/// Aggregate result of one batch run.
///
/// Built once from the ordered per-item results; the counts are derived at
/// construction and the summary is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    succeeded: usize,
    failed: usize,
    cancelled: bool,
    results: Vec<BatchItemResult>,
}

impl BatchSummary {
    pub fn new(results: Vec<BatchItemResult>, cancelled: bool) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
            cancelled,
            results,
        }
    }

    pub fn results(&self) -> &[BatchItemResult] {
        &self.results
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &ItemError)> {
        self.results.iter().filter_map(|r| match r {
            BatchItemResult::Failure { source, error } => Some((source.as_path(), error)),
            BatchItemResult::Success { .. } => None,
        })
    }

    pub fn into_results(self) -> Vec<BatchItemResult> {
        self.results
    }
}
