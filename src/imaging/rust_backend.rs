//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, WebP) | `image::ImageReader` with content-based format guessing |
//! | Resample | `image::DynamicImage::resize_exact` |
//! | Encode | `image::DynamicImage::save`, format from the output extension |
//!
//! Decoding guesses the format from the file's leading bytes, so a PNG saved
//! with a `.jpg` extension still opens. Encoding follows the output
//! extension, which the namer copies from the source.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::Filter;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::path::Path;

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn filter_type(filter: Filter) -> FilterType {
    match filter {
        Filter::Nearest => FilterType::Nearest,
        Filter::Triangle => FilterType::Triangle,
        Filter::CatmullRom => FilterType::CatmullRom,
        Filter::Gaussian => FilterType::Gaussian,
        Filter::Lanczos3 => FilterType::Lanczos3,
    }
}

/// Convert to a pixel layout the target encoder accepts.
///
/// PNG stores anything `image` decodes. JPEG takes 8-bit gray or RGB only,
/// so alpha is dropped. GIF, BMP and WebP take 8-bit RGB(A).
fn encodable(image: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    match (format, image.color()) {
        (ImageFormat::Png, _) => Cow::Borrowed(image),
        (ImageFormat::Jpeg, ColorType::L8 | ColorType::Rgb8) => Cow::Borrowed(image),
        (ImageFormat::Jpeg, _) => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        (_, ColorType::Rgb8 | ColorType::Rgba8) => Cow::Borrowed(image),
        (_, color) if color.has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn open(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions::new(image.width(), image.height())
    }

    fn resample(
        &self,
        image: &DynamicImage,
        target: Dimensions,
        filter: Filter,
    ) -> Result<DynamicImage, BackendError> {
        if target.width == 0 || target.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Cannot resample to {target}"
            )));
        }
        Ok(image.resize_exact(target.width, target.height, filter_type(filter)))
    }

    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError> {
        let format = ImageFormat::from_path(path).map_err(|e| BackendError::Encode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        encodable(image, format)
            .save_with_format(path, format)
            .map_err(|e| match e {
                image::ImageError::IoError(io) => BackendError::Io(io),
                other => BackendError::Encode {
                    path: path.display().to_string(),
                    reason: other.to_string(),
                },
            })
    }
}
