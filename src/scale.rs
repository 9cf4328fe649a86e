//! Scale factor validation and the per-session scale policy.
//!
//! A [`ScaleFactor`] is an integer percentage in `(0, 100]` applied to both
//! image axes. Values outside that range are rejected at construction, so
//! every `ScaleFactor` that exists is valid and the batch runner never has to
//! re-check it.
//!
//! [`ScalePolicy`] is the caller-owned "current scale" setting. Front ends
//! mutate it (presets, `--scale`, config) and copy its value into each
//! [`BatchRequest`](crate::batch::BatchRequest); the engine never reads it.
//!
//! ```text
//! ScalePolicy::default()      → 50%
//! set_preset(Preset::Small)   → 30%
//! set_scale(85)               → 85%
//! set_scale(101)              → Err(InvalidScale(101)), still 85%
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest accepted percentage. Upscaling is out of scope.
pub const MAX_PERCENT: i64 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    #[error("Invalid scale {0}%: must be between 1 and 100")]
    InvalidScale(i64),
    #[error("Invalid scale '{0}': expected an integer percentage such as 50 or 50%")]
    Unparseable(String),
}

/// A validated scale percentage in `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct ScaleFactor(u32);

impl ScaleFactor {
    pub fn new(percent: i64) -> Result<Self, ScaleError> {
        if percent <= 0 || percent > MAX_PERCENT {
            return Err(ScaleError::InvalidScale(percent));
        }
        Ok(Self(percent as u32))
    }

    pub fn percent(self) -> u32 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<i64> for ScaleFactor {
    type Error = ScaleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScaleFactor> for u32 {
    fn from(scale: ScaleFactor) -> Self {
        scale.0
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Accepts `"50"` and `"50%"`, with surrounding whitespace.
impl FromStr for ScaleFactor {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        let value: i64 = digits
            .parse()
            .map_err(|_| ScaleError::Unparseable(s.to_string()))?;
        Self::new(value)
    }
}

/// Convenience presets offered by interactive front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// 30%
    Small,
    /// 50%
    Medium,
    /// 75%
    Large,
}

impl Preset {
    pub fn percent(self) -> i64 {
        match self {
            Preset::Small => 30,
            Preset::Medium => 50,
            Preset::Large => 75,
        }
    }
}

/// The current scale setting for a session.
///
/// Starts at 50% and changes only through [`set_scale`](Self::set_scale)
/// (or a preset, which goes through the same path). A rejected value leaves
/// the previous setting in place.
#[derive(Debug, Clone, Default)]
pub struct ScalePolicy {
    current: ScaleFactor,
}

impl ScalePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scale(&mut self, percent: i64) -> Result<ScaleFactor, ScaleError> {
        let scale = ScaleFactor::new(percent)?;
        self.current = scale;
        Ok(scale)
    }

    pub fn set_preset(&mut self, preset: Preset) -> ScaleFactor {
        // Preset percentages are always in range.
        self.set_scale(preset.percent()).unwrap_or(self.current)
    }

    pub fn scale(&self) -> ScaleFactor {
        self.current
    }
}
