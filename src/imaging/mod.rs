//! Image processing behind a swappable backend.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Open** | `image::ImageReader` (format guessed from content) |
//! | **Target size** | [`compute_target_size`], pure integer math |
//! | **Resample** | `resize_exact`, Lanczos3 by default |
//! | **Save** | `save_with_format`, format from the output extension |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Resampling filter choice
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Per-image resize combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::compute_target_size;
pub use operations::{Resized, get_dimensions, resize_image};
pub use params::Filter;
pub use rust_backend::RustBackend;
