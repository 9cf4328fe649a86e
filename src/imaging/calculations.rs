//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use crate::scale::ScaleFactor;

/// Calculate the output dimensions for a percentage scale.
///
/// Each axis is multiplied by the same factor and truncated (not rounded),
/// then floored at 1 so the result is always a drawable image. Aspect ratio is
/// preserved by construction.
///
/// # Examples
/// ```
/// # use batch_resizer::imaging::{Dimensions, compute_target_size};
/// # use batch_resizer::scale::ScaleFactor;
/// let half = ScaleFactor::new(50).unwrap();
/// assert_eq!(
///     compute_target_size(Dimensions::new(800, 600), half),
///     Dimensions::new(400, 300)
/// );
///
/// // 3 * 0.3 = 0.9 → 0 → floored to 1
/// let small = ScaleFactor::new(30).unwrap();
/// assert_eq!(
///     compute_target_size(Dimensions::new(3, 3), small),
///     Dimensions::new(1, 1)
/// );
/// ```
pub fn compute_target_size(original: Dimensions, scale: ScaleFactor) -> Dimensions {
    Dimensions {
        width: scale_axis(original.width, scale),
        height: scale_axis(original.height, scale),
    }
}

fn scale_axis(length: u32, scale: ScaleFactor) -> u32 {
    // u64 intermediate: u32::MAX * 100 does not fit in u32.
    let scaled = u64::from(length) * u64::from(scale.percent()) / 100;
    (scaled as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(p: i64) -> ScaleFactor {
        ScaleFactor::new(p).unwrap()
    }

    #[test]
    fn half_of_landscape() {
        assert_eq!(
            compute_target_size(Dimensions::new(800, 600), scale(50)),
            Dimensions::new(400, 300)
        );
    }

    #[test]
    fn tiny_image_floors_to_one() {
        // 3 * 30 / 100 = 0.9 → 0 → 1
        assert_eq!(
            compute_target_size(Dimensions::new(3, 3), scale(30)),
            Dimensions::new(1, 1)
        );
    }

    #[test]
    fn truncates_instead_of_rounding() {
        // 999 * 75 / 100 = 749.25, 101 * 75 / 100 = 75.75
        assert_eq!(
            compute_target_size(Dimensions::new(999, 101), scale(75)),
            Dimensions::new(749, 75)
        );
    }

    #[test]
    fn full_scale_is_identity() {
        assert_eq!(
            compute_target_size(Dimensions::new(1234, 567), scale(100)),
            Dimensions::new(1234, 567)
        );
    }

    #[test]
    fn one_percent_of_one_pixel_is_one_pixel() {
        assert_eq!(
            compute_target_size(Dimensions::new(1, 1), scale(1)),
            Dimensions::new(1, 1)
        );
    }

    #[test]
    fn only_one_axis_floored_on_extreme_aspect() {
        // 4000x2 at 30% → 1200x0 → 1200x1
        assert_eq!(
            compute_target_size(Dimensions::new(4000, 2), scale(30)),
            Dimensions::new(1200, 1)
        );
    }

    #[test]
    fn huge_dimensions_do_not_overflow() {
        assert_eq!(
            compute_target_size(Dimensions::new(u32::MAX, u32::MAX), scale(100)),
            Dimensions::new(u32::MAX, u32::MAX)
        );
        assert_eq!(
            compute_target_size(Dimensions::new(u32::MAX, 10), scale(50)),
            Dimensions::new(u32::MAX / 2, 5)
        );
    }

    #[test]
    fn matches_formula_across_scales() {
        let sizes = [(1, 1), (3, 7), (640, 480), (1919, 1081), (4032, 3024)];
        for p in 1..=100 {
            for &(w, h) in &sizes {
                let got = compute_target_size(Dimensions::new(w, h), scale(p));
                let expect_w = ((w as u64 * p as u64) / 100).max(1) as u32;
                let expect_h = ((h as u64 * p as u64) / 100).max(1) as u32;
                assert_eq!(got, Dimensions::new(expect_w, expect_h), "{w}x{h} @ {p}%");
                assert!(got.width >= 1 && got.height >= 1);
            }
        }
    }
}
