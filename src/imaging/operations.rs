//! High-level image operations.
//!
//! These functions combine the dimension calculation with backend calls and
//! classify backend errors into per-item [`ItemError`]s.

use super::backend::{Dimensions, ImageBackend};
use super::calculations::compute_target_size;
use super::params::Filter;
use crate::scale::ScaleFactor;
use crate::types::ItemError;
use std::path::Path;

/// Original and output size of one resized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resized {
    pub original: Dimensions,
    pub resized: Dimensions,
}

/// Open an image and report its size.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions, ItemError> {
    let image = backend
        .open(path)
        .map_err(|e| ItemError::Read(e.to_string()))?;
    Ok(backend.dimensions(&image))
}

/// Resize one image by `scale` and write it to `output`.
///
/// The source is opened once; open/decode errors are [`ItemError::Read`],
/// resample errors [`ItemError::Resample`], encode/write errors
/// [`ItemError::Write`].
pub fn resize_image<B: ImageBackend>(
    backend: &B,
    source: &Path,
    output: &Path,
    scale: ScaleFactor,
    filter: Filter,
) -> Result<Resized, ItemError> {
    let image = backend
        .open(source)
        .map_err(|e| ItemError::Read(e.to_string()))?;
    let original = backend.dimensions(&image);
    let target = compute_target_size(original, scale);

    let resized = backend
        .resample(&image, target, filter)
        .map_err(|e| ItemError::Resample(e.to_string()))?;
    drop(image);

    backend
        .save(&resized, output)
        .map_err(|e| ItemError::Write(e.to_string()))?;

    Ok(Resized {
        original,
        resized: target,
    })
}
