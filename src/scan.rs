//! Input discovery for directory mode.
//!
//! When no explicit file list is given, the input directory is listed and
//! narrowed to eligible images:
//!
//! ```text
//! images/
//! ├── a.jpg        ✓
//! ├── b.txt        ✗ extension not in the allow-list
//! ├── C.PNG        ✓ extension match is case-insensitive
//! ├── notes.jpg/   ✗ directories are never images
//! └── 2024/        descended into only with `recursive`
//!     └── d.webp
//! ```
//!
//! Eligibility is decided by extension alone; file contents are not sniffed.
//! Explicitly selected files bypass this filter entirely.
//!
//! A missing input directory is an error ([`ScanError::InputDirectoryNotFound`]).
//! An existing directory with nothing eligible is not: it yields an empty list.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Input directory not found: {0}")]
    InputDirectoryNotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Extensions accepted by the format filter, lower-case, without the dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Whether `path` has a supported image extension (case-insensitive).
pub fn is_eligible(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Discovery options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
}

/// List eligible images in `input_dir`, sorted by path.
pub fn discover(input_dir: &Path, options: ScanOptions) -> Result<Vec<PathBuf>, ScanError> {
    if !input_dir.is_dir() {
        return Err(ScanError::InputDirectoryNotFound(input_dir.to_path_buf()));
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();

    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|e| ScanError::Walk {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.to_path_buf()),
            source: e,
        })?;
        if entry.file_type().is_file() && is_eligible(entry.path()) {
            images.push(entry.into_path());
        }
    }

    images.sort();
    tracing::debug!(
        dir = %input_dir.display(),
        found = images.len(),
        recursive = options.recursive,
        "scanned input directory"
    );
    Ok(images)
}
