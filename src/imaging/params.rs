//! Parameter types for image operations.
//!
//! These describe *what* to do, not *how*. The backend maps them onto its
//! own resampling primitives, which keeps the batch runner backend-agnostic.
//!
//! - [`Filter`]: resampling kernel, default Lanczos3.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resampling filter used when producing the resized pixel grid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    /// Nearest neighbour. Fastest, blocky.
    Nearest,
    /// Linear (tent) filter.
    Triangle,
    /// Cubic filter.
    CatmullRom,
    Gaussian,
    /// Windowed sinc with a=3. Sharpest.
    #[default]
    Lanczos3,
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::Nearest => "nearest",
            Filter::Triangle => "triangle",
            Filter::CatmullRom => "catmull-rom",
            Filter::Gaussian => "gaussian",
            Filter::Lanczos3 => "lanczos3",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lanczos3() {
        assert_eq!(Filter::default(), Filter::Lanczos3);
    }

    #[test]
    fn config_names_are_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            filter: Filter,
        }
        let w: Wrapper = toml::from_str(r#"filter = "catmull-rom""#).unwrap();
        assert_eq!(w.filter, Filter::CatmullRom);
        assert!(toml::from_str::<Wrapper>(r#"filter = "bicubic""#).is_err());
    }

    #[test]
    fn display_matches_config_name() {
        for filter in [
            Filter::Nearest,
            Filter::Triangle,
            Filter::CatmullRom,
            Filter::Gaussian,
            Filter::Lanczos3,
        ] {
            let toml_value = toml::Value::try_from(filter).unwrap();
            assert_eq!(toml_value.as_str(), Some(filter.to_string().as_str()));
        }
    }
}
