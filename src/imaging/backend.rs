//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the black-box image capability the batch
//! runner drives: open a file, read its pixel size, resample, save. Format
//! support, colour handling and encoder settings are the backend's business.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording [`MockBackend`](tests::MockBackend).

use super::params::Filter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// `Image` is the backend's decoded handle. It is opened once per batch item
/// and dropped when the item completes.
pub trait ImageBackend {
    type Image;

    /// Open and decode an image.
    fn open(&self, path: &Path) -> Result<Self::Image, BackendError>;

    /// Pixel size of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Produce a copy resampled to exactly `target`.
    fn resample(
        &self,
        image: &Self::Image,
        target: Dimensions,
        filter: Filter,
    ) -> Result<Self::Image, BackendError>;

    /// Encode and write, format inferred from the path.
    fn save(&self, image: &Self::Image, path: &Path) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-memory image handle for the mock.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MockImage {
        pub source: PathBuf,
        pub dims: Dimensions,
    }

    /// Mock backend that records operations without touching pixels.
    ///
    /// Paths registered with [`with_image`](Self::with_image) open
    /// successfully; anything else fails like an unreadable file. Resample and
    /// save can be made to fail per source / output path.
    #[derive(Default)]
    pub struct MockBackend {
        pub images: HashMap<PathBuf, Dimensions>,
        pub fail_resample: HashSet<PathBuf>,
        pub fail_save: HashSet<PathBuf>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Open(String),
        Resample {
            source: String,
            width: u32,
            height: u32,
            filter: Filter,
        },
        Save {
            source: String,
            output: String,
            width: u32,
            height: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_image(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
            self.images
                .insert(path.into(), Dimensions::new(width, height));
            self
        }

        pub fn failing_resample(mut self, source: impl Into<PathBuf>) -> Self {
            self.fail_resample.insert(source.into());
            self
        }

        pub fn failing_save(mut self, output: impl Into<PathBuf>) -> Self {
            self.fail_save.insert(output.into());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl ImageBackend for MockBackend {
        type Image = MockImage;

        fn open(&self, path: &Path) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Open(path.to_string_lossy().to_string()));
            self.images
                .get(path)
                .map(|&dims| MockImage {
                    source: path.to_path_buf(),
                    dims,
                })
                .ok_or_else(|| BackendError::Decode {
                    path: path.display().to_string(),
                    reason: "not a recognised image".to_string(),
                })
        }

        fn dimensions(&self, image: &MockImage) -> Dimensions {
            image.dims
        }

        fn resample(
            &self,
            image: &MockImage,
            target: Dimensions,
            filter: Filter,
        ) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Resample {
                source: image.source.to_string_lossy().to_string(),
                width: target.width,
                height: target.height,
                filter,
            });
            if self.fail_resample.contains(&image.source) {
                return Err(BackendError::ProcessingFailed(
                    "mock resample failure".to_string(),
                ));
            }
            Ok(MockImage {
                source: image.source.clone(),
                dims: target,
            })
        }

        fn save(&self, image: &MockImage, path: &Path) -> Result<(), BackendError> {
            self.record(RecordedOp::Save {
                source: image.source.to_string_lossy().to_string(),
                output: path.to_string_lossy().to_string(),
                width: image.dims.width,
                height: image.dims.height,
            });
            if self.fail_save.contains(path) {
                return Err(BackendError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "mock save failure",
                )));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_open() {
        let backend = MockBackend::new().with_image("/test/image.jpg", 800, 600);

        let image = backend.open(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(backend.dimensions(&image), Dimensions::new(800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Open(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_unknown_path_fails_to_open() {
        let backend = MockBackend::new();
        let err = backend.open(Path::new("/missing.png")).unwrap_err();
        assert!(err.to_string().contains("/missing.png"));
    }

    #[test]
    fn mock_records_resample_and_save() {
        let backend = MockBackend::new().with_image("/source.jpg", 400, 300);
        let image = backend.open(Path::new("/source.jpg")).unwrap();

        let resized = backend
            .resample(&image, Dimensions::new(200, 150), Filter::Triangle)
            .unwrap();
        backend.save(&resized, Path::new("/out/source.jpg")).unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 3);
        assert!(matches!(
            &ops[1],
            RecordedOp::Resample {
                width: 200,
                height: 150,
                filter: Filter::Triangle,
                ..
            }
        ));
        assert!(matches!(
            &ops[2],
            RecordedOp::Save { output, width: 200, height: 150, .. } if output == "/out/source.jpg"
        ));
    }

    #[test]
    fn mock_scripted_failures() {
        let backend = MockBackend::new()
            .with_image("/a.jpg", 10, 10)
            .failing_resample("/a.jpg")
            .failing_save("/out/b.jpg");
        let image = backend.open(Path::new("/a.jpg")).unwrap();
        assert!(
            backend
                .resample(&image, Dimensions::new(5, 5), Filter::default())
                .is_err()
        );
        assert!(matches!(
            backend.save(&image, Path::new("/out/b.jpg")),
            Err(BackendError::Io(_))
        ));
    }

    #[test]
    fn dimensions_display() {
        assert_eq!(Dimensions::new(800, 600).to_string(), "800x600");
    }
}
