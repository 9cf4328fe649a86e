//! # Batch Resizer
//!
//! Resize a set of images by one percentage and write the results into a
//! single output directory. Each image keeps its aspect ratio, and each image
//! succeeds or fails on its own: one unreadable file never stops the batch.
//!
//! # Architecture
//!
//! ```text
//! explicit files ─┐
//!                 ├─→ BatchRequest ─→ batch::run ─→ BatchSummary
//! scan::discover ─┘        │               │
//!                          │               └─→ BatchEvent (progress channel)
//!                  ScalePolicy / config
//! ```
//!
//! The engine ([`batch`], [`imaging`], [`naming`]) does no terminal output and
//! reads no global settings. Everything it needs is in the [`BatchRequest`]
//! it is handed, and everything it reports comes back as data.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`batch`] | Sequential batch runner: output directory, per-item isolation, progress, cancellation |
//! | [`imaging`] | Target-size math, the [`ImageBackend`](imaging::ImageBackend) trait and its `image`-crate implementation |
//! | [`naming`] | Output filename policy: prefix + basename, collision handling |
//! | [`scale`] | Validated [`ScaleFactor`](scale::ScaleFactor), presets and the session [`ScalePolicy`](scale::ScalePolicy) |
//! | [`scan`] | Directory discovery and the supported-extension filter |
//! | [`config`] | `resizer.toml` loading, merging and validation |
//! | [`types`] | Shared data: [`ImageRef`](types::ImageRef), item results, [`BatchSummary`](types::BatchSummary) |
//! | [`output`] | CLI output formatting for progress and summaries |
//!
//! # Design Decisions
//!
//! ## Sequential, In Order
//!
//! Items are processed one at a time in input order, and results are reported
//! in that order. Each decoded image is dropped before the next is opened,
//! so memory use is bounded by the largest single image.
//!
//! ## Failures Are Data
//!
//! A per-item problem (unreadable source, failed write) becomes an
//! [`ItemError`](types::ItemError) on that item's result. Only two things fail
//! the whole run: an empty input list, and an output directory that cannot be
//! created.
//!
//! ## Flat Output
//!
//! Outputs are named `<prefix><source file name>` directly under the output
//! directory, whatever directory the source came from. Sources sharing a file
//! name overwrite each other unless the `suffix` collision policy is chosen.
//! An output name that resolves to its own source is a per-item failure, so
//! originals are never overwritten.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling (Lanczos3 by default) and encoding use the `image`
//! crate with its pure-Rust codecs. The output format follows the output file
//! extension, which is the source's extension.
//!
//! [`BatchRequest`]: batch::BatchRequest

pub mod batch;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod scale;
pub mod scan;
pub mod types;
