//! Batch resizing.
//!
//! Takes an ordered list of source images, a scale factor and an output
//! directory, and resizes each image in turn.
//!
//! ## Algorithm
//!
//! ```text
//! inputs empty?            → Err(EmptyBatch), nothing touched on disk
//! create_dir_all(output)   → idempotent; failure aborts the run
//! for each input, in order:
//!     cancelled?           → Failure(Cancelled) for this and every later item
//!     name                 → Failure(Write) if none, or if it is the source
//!     open + dimensions    → Failure(Read) on error
//!     target = floor(dim * scale / 100), min 1
//!     resample             → Failure(Resample) on error
//!     save                 → Failure(Write) on error
//!     Success
//! return BatchSummary
//! ```
//!
//! Per-item failures never abort the batch. Each input produces exactly one
//! [`BatchItemResult`], in input order. Sources are never written: an output
//! name that resolves to its own source is refused before the file is opened.
//!
//! The output directory is created before any item is looked at, so a batch
//! in which every item fails still leaves an (empty) output directory behind.
//!
//! ## Progress
//!
//! Callers may pass a channel in [`RunOptions::events`]. The runner sends a
//! [`BatchEvent::Started`] and then one [`BatchEvent::ItemFinished`] per item.
//! A disconnected receiver is ignored.
//!
//! ## Cancellation
//!
//! [`CancelFlag`] is checked before each item starts. An item that has
//! started always runs to completion.

use crate::imaging::{Filter, ImageBackend, RustBackend, resize_image};
use crate::naming::OutputNamer;
use crate::scale::ScaleFactor;
use crate::types::{BatchItemResult, BatchSummary, ImageRef, ItemError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("No images to resize")]
    EmptyBatch,
    #[error("Cannot create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything a batch run needs. Not modified once the run starts.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub inputs: Vec<ImageRef>,
    pub output_dir: PathBuf,
    pub scale: ScaleFactor,
    pub namer: OutputNamer,
    pub filter: Filter,
}

impl BatchRequest {
    pub fn new<I, T>(inputs: I, output_dir: impl Into<PathBuf>, scale: ScaleFactor) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageRef>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output_dir: output_dir.into(),
            scale,
            namer: OutputNamer::default(),
            filter: Filter::default(),
        }
    }

    pub fn with_namer(mut self, namer: OutputNamer) -> Self {
        self.namer = namer;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}

/// Cooperative cancellation shared between the runner and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress event emitted during a run.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started {
        total: usize,
        output_dir: PathBuf,
        scale: ScaleFactor,
    },
    ItemFinished {
        /// 1-based position in the batch.
        index: usize,
        total: usize,
        result: BatchItemResult,
    },
}

/// Optional hooks for a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub events: Option<Sender<BatchEvent>>,
    pub cancel: Option<CancelFlag>,
}

impl RunOptions {
    fn emit(&self, event: BatchEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

/// Run a batch with the production backend.
pub fn run(request: &BatchRequest, options: RunOptions) -> Result<BatchSummary, BatchError> {
    run_with_backend(&RustBackend::new(), request, options)
}

/// Run a batch using a specific backend (allows testing with mock).
pub fn run_with_backend<B: ImageBackend>(
    backend: &B,
    request: &BatchRequest,
    options: RunOptions,
) -> Result<BatchSummary, BatchError> {
    if request.inputs.is_empty() {
        return Err(BatchError::EmptyBatch);
    }

    ensure_output_dir(&request.output_dir)?;

    let total = request.inputs.len();
    tracing::info!(
        total,
        scale = %request.scale,
        output = %request.output_dir.display(),
        "starting batch"
    );
    options.emit(BatchEvent::Started {
        total,
        output_dir: request.output_dir.clone(),
        scale: request.scale,
    });

    let mut names = request.namer.session();
    let mut results = Vec::with_capacity(total);
    let mut cancelled = false;

    for (i, input) in request.inputs.iter().enumerate() {
        if !cancelled && options.cancelled() {
            tracing::info!(remaining = total - i, "batch cancelled");
            cancelled = true;
        }

        let source = input.path();
        let result = if cancelled {
            failure(source, ItemError::Cancelled)
        } else {
            match names.propose(&request.output_dir, source) {
                None => failure(
                    source,
                    ItemError::Write(format!("{} has no file name", source.display())),
                ),
                Some(output) if is_same_file(source, &output) => failure(
                    source,
                    ItemError::Write(format!(
                        "output {} would overwrite the source",
                        output.display()
                    )),
                ),
                Some(output) => {
                    let result = process_item(backend, request, source, output);
                    if let BatchItemResult::Success { output, .. } = &result {
                        names.commit(output);
                    }
                    result
                }
            }
        };

        if let BatchItemResult::Failure { error, .. } = &result {
            if *error != ItemError::Cancelled {
                tracing::warn!(source = %source.display(), %error, "item failed");
            }
        }

        options.emit(BatchEvent::ItemFinished {
            index: i + 1,
            total,
            result: result.clone(),
        });
        results.push(result);
    }

    let summary = BatchSummary::new(results, cancelled);
    tracing::info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        cancelled,
        "batch finished"
    );
    Ok(summary)
}

/// Create the output directory and any missing parents. Existing is fine.
pub fn ensure_output_dir(path: &Path) -> Result<(), BatchError> {
    std::fs::create_dir_all(path).map_err(|source| BatchError::OutputDirectory {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether writing `output` would replace `source`.
///
/// Resolved paths are compared when both exist; otherwise the paths as given.
fn is_same_file(source: &Path, output: &Path) -> bool {
    match (source.canonicalize(), output.canonicalize()) {
        (Ok(source), Ok(output)) => source == output,
        _ => source == output,
    }
}

fn process_item<B: ImageBackend>(
    backend: &B,
    request: &BatchRequest,
    source: &Path,
    output: PathBuf,
) -> BatchItemResult {
    tracing::debug!(source = %source.display(), output = %output.display(), "resizing");
    match resize_image(backend, source, &output, request.scale, request.filter) {
        Ok(sizes) => BatchItemResult::Success {
            source: source.to_path_buf(),
            output,
            original: sizes.original,
            resized: sizes.resized,
        },
        Err(error) => failure(source, error),
    }
}

fn failure(source: &Path, error: ItemError) -> BatchItemResult {
    BatchItemResult::Failure {
        source: source.to_path_buf(),
        error,
    }
}
