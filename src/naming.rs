//! Output filename policy.
//!
//! Every output lands flat in the output directory under the source's base
//! filename with an optional prefix:
//!
//! ```text
//! photos/2024/dawn.jpg  →  resized_images/resized_dawn.jpg
//! scans/IMG_0001.PNG    →  resized_images/resized_IMG_0001.PNG
//! ```
//!
//! ## Collisions
//!
//! Two sources with the same basename (`a/x.jpg`, `b/x.jpg`) map to the same
//! output. [`CollisionPolicy::Overwrite`] keeps that mapping and the later
//! item wins. [`CollisionPolicy::Suffix`] tracks the names written within one
//! batch and gives later duplicates a numbered stem (`resized_x-1.jpg`).
//! A name is only taken once its item has been saved: an unreadable `a/x.jpg`
//! leaves `resized_x.jpg` free for `b/x.jpg`.
//! Files left on disk by earlier runs never count as collisions, so running
//! the same batch twice writes the same names.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_PREFIX: &str = "resized_";

/// What to do when two items in one batch produce the same output name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Later items overwrite earlier ones.
    #[default]
    Overwrite,
    /// Later items get `-1`, `-2`, … appended to the stem.
    Suffix,
}

/// Build the output path for a source image.
///
/// Returns `None` if `source` has no file name component (e.g. `..` or `/`).
///
/// - `("out", "a/b/photo.jpg", "resized_")` → `out/resized_photo.jpg`
/// - `("out", "photo.jpg", "")` → `out/photo.jpg`
pub fn build_output_path(output_dir: &Path, source: &Path, prefix: &str) -> Option<PathBuf> {
    let file_name = source.file_name()?;
    let mut name = OsString::from(prefix);
    name.push(file_name);
    Some(output_dir.join(name))
}

/// Output naming configuration for a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNamer {
    pub prefix: String,
    pub collisions: CollisionPolicy,
}

impl Default for OutputNamer {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            collisions: CollisionPolicy::default(),
        }
    }
}

impl OutputNamer {
    /// Start naming a new batch. Claimed names are forgotten between batches.
    pub fn session(&self) -> NamingSession<'_> {
        NamingSession {
            namer: self,
            claimed: HashSet::new(),
        }
    }
}

/// Per-batch naming state.
pub struct NamingSession<'a> {
    namer: &'a OutputNamer,
    claimed: HashSet<PathBuf>,
}

impl NamingSession<'_> {
    /// Name the output for `source`, skipping names already committed.
    ///
    /// Nothing is reserved until [`commit`](Self::commit) is called.
    pub fn propose(&self, output_dir: &Path, source: &Path) -> Option<PathBuf> {
        let base = build_output_path(output_dir, source, &self.namer.prefix)?;
        Some(match self.namer.collisions {
            CollisionPolicy::Overwrite => base,
            CollisionPolicy::Suffix => self.first_unclaimed(base),
        })
    }

    /// Record `path` as written so later duplicates avoid it.
    pub fn commit(&mut self, path: &Path) {
        self.claimed.insert(path.to_path_buf());
    }

    fn first_unclaimed(&self, base: PathBuf) -> PathBuf {
        if !self.claimed.contains(&base) {
            return base;
        }
        (1u32..)
            .map(|n| with_stem_suffix(&base, n))
            .find(|candidate| !self.claimed.contains(candidate))
            .unwrap_or(base)
    }
}

/// `dir/name.ext` → `dir/name-N.ext`; `dir/name` → `dir/name-N`.
fn with_stem_suffix(path: &Path, n: u32) -> PathBuf {
    let mut name = path.file_stem().map(OsString::from).unwrap_or_default();
    name.push(format!("-{n}"));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
