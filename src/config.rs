//! Resizer configuration.
//!
//! Handles loading, validating and merging `resizer.toml`. Stock defaults are
//! overridden by the user file, which in turn is overridden by command-line
//! flags (applied by the front end, not here).
//!
//! ## Config File Location
//!
//! `resizer.toml` is looked up in the working directory. A different file can
//! be named with `--config <file>`; a named file must exist.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input_dir = "images"          # Scanned when no files are given
//! output_dir = "resized_images" # Created if missing
//! scale = 50                    # Percent, 1-100
//!
//! [naming]
//! prefix = "resized_"           # Prepended to each output filename
//! collisions = "overwrite"      # or "suffix"
//!
//! [resample]
//! filter = "lanczos3"           # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [scan]
//! recursive = false             # Descend into subdirectories of input_dir
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! scale = 30
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Filter;
use crate::naming::{CollisionPolicy, DEFAULT_PREFIX, OutputNamer};
use crate::scale::ScaleFactor;
use crate::scan::ScanOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "resizer.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resizer configuration loaded from `resizer.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizerConfig {
    /// Directory scanned for images when no explicit files are given.
    pub input_dir: PathBuf,
    /// Directory the resized images are written to.
    pub output_dir: PathBuf,
    /// Percentage applied to both dimensions.
    pub scale: ScaleFactor,
    /// Output filename settings.
    pub naming: NamingConfig,
    /// Resampling settings.
    pub resample: ResampleConfig,
    /// Directory scan settings.
    pub scan: ScanConfig,
}

impl Default for ResizerConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images"),
            output_dir: PathBuf::from("resized_images"),
            scale: ScaleFactor::default(),
            naming: NamingConfig::default(),
            resample: ResampleConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl ResizerConfig {
    /// Validate values the types alone do not constrain.
    ///
    /// `scale` is range-checked when it is parsed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "input_dir must not be empty".into(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self.naming.prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "naming.prefix must not contain path separators".into(),
            ));
        }
        Ok(())
    }

    /// Output namer for a batch built from this config.
    pub fn namer(&self) -> OutputNamer {
        OutputNamer {
            prefix: self.naming.prefix.clone(),
            collisions: self.naming.collisions,
        }
    }

    /// Directory scan options from this config.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.scan.recursive,
        }
    }
}

/// Output filename settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Prepended to each output filename. May be empty.
    pub prefix: String,
    /// What to do when two inputs share a basename.
    pub collisions: CollisionPolicy,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            collisions: CollisionPolicy::default(),
        }
    }
}

/// Resampling settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResampleConfig {
    pub filter: Filter,
}

/// Directory scan settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub recursive: bool,
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ResizerConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ResizerConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ResizerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `resizer.toml` from `dir`, falling back to stock defaults if absent.
pub fn load_config(dir: &Path) -> Result<ResizerConfig, ConfigError> {
    let overlay = load_raw_config(&dir.join(CONFIG_FILE_NAME))?;
    tracing::debug!(dir = %dir.display(), found = overlay.is_some(), "loading config");
    resolve_config(stock_defaults_value()?, overlay)
}

/// Load an explicitly named config file. The file must exist.
pub fn load_config_file(path: &Path) -> Result<ResizerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loading config");
    resolve_config(stock_defaults_value()?, Some(overlay))
}

/// Returns a fully-commented stock `resizer.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Batch Resizer Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Directory scanned for images when no files are named on the command line.
input_dir = "images"

# Directory the resized copies are written to. Created if missing.
output_dir = "resized_images"

# Percentage applied to both width and height (1-100).
# Presets: small = 30, medium = 50, large = 75.
scale = 50

# ---------------------------------------------------------------------------
# Output names
# ---------------------------------------------------------------------------
[naming]
# Prepended to each source filename. Use "" to keep names unchanged.
prefix = "resized_"

# Two inputs with the same filename map to the same output.
#   "overwrite" - the later one replaces the earlier one
#   "suffix"    - later ones are written as name-1.ext, name-2.ext, ...
collisions = "overwrite"

# ---------------------------------------------------------------------------
# Resampling
# ---------------------------------------------------------------------------
[resample]
# nearest | triangle | catmull-rom | gaussian | lanczos3
filter = "lanczos3"

# ---------------------------------------------------------------------------
# Directory scan
# ---------------------------------------------------------------------------
[scan]
# Also pick up images in subdirectories of input_dir.
# Outputs are still written flat into output_dir.
recursive = false
"##
}
