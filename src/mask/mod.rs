//! Gap mask construction on the f64 working image.
//!
//! A pixel is a gap when every channel equals its sentinel. The comparison
//! is done over the channel lanes with `Zip`, so the whole image is tested in
//! one pass without index arithmetic.

use ndarray::{Array2, Array3, Axis, Zip};

/// Mark pixels whose three channels equal `sentinel` channel by channel.
///
/// A scalar sentinel is passed as `[v; 3]`.
pub fn build_gap_mask(work: &Array3<f64>, sentinel: [f64; 3]) -> Array2<bool> {
    let [s0, s1, s2] = sentinel;
    Zip::from(work.lanes(Axis(2))).map_collect(|px| px[0] == s0 && px[1] == s1 && px[2] == s2)
}

/// Mark pixels that already hold a missing marker in any channel.
///
/// Used instead of [`build_gap_mask`] when the caller's sentinel is itself
/// the missing marker.
pub fn missing_mask(work: &Array3<f64>) -> Array2<bool> {
    Zip::from(work.lanes(Axis(2))).map_collect(|px| px.iter().any(|v| v.is_nan()))
}

/// Overwrite every channel of masked pixels with NaN
pub fn mark_missing(work: &mut Array3<f64>, mask: &Array2<bool>) {
    Zip::from(work.lanes_mut(Axis(2)))
        .and(mask)
        .for_each(|mut px, &is_gap| {
            if is_gap {
                px.fill(f64::NAN);
            }
        });
}

/// Number of set pixels
pub fn count_gaps(mask: &Array2<bool>) -> usize {
    mask.iter().filter(|&&m| m).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with(pixels: &[((usize, usize), [f64; 3])]) -> Array3<f64> {
        let mut work = Array3::from_elem((3, 4, 3), 200.0);
        for &((y, x), rgb) in pixels {
            for c in 0..3 {
                work[(y, x, c)] = rgb[c];
            }
        }
        work
    }

    #[test]
    fn test_scalar_sentinel_needs_all_channels() {
        let work = image_with(&[((0, 0), [0.0, 0.0, 0.0]), ((1, 2), [0.0, 0.0, 5.0])]);
        let mask = build_gap_mask(&work, [0.0; 3]);
        assert!(mask[(0, 0)]);
        assert!(!mask[(1, 2)], "partial match is not a gap");
        assert_eq!(count_gaps(&mask), 1);
    }

    #[test]
    fn test_per_channel_sentinel() {
        let work = image_with(&[((2, 3), [255.0, 0.0, 255.0]), ((0, 1), [255.0, 255.0, 255.0])]);
        let mask = build_gap_mask(&work, [255.0, 0.0, 255.0]);
        assert!(mask[(2, 3)]);
        assert!(!mask[(0, 1)]);
        assert_eq!(count_gaps(&mask), 1);
    }

    #[test]
    fn test_nan_sentinel_selects_nothing() {
        let work = image_with(&[((1, 1), [f64::NAN; 3])]);
        let mask = build_gap_mask(&work, [f64::NAN; 3]);
        assert_eq!(count_gaps(&mask), 0);
    }

    #[test]
    fn test_missing_mask_finds_any_nan_channel() {
        let work = image_with(&[((1, 1), [f64::NAN; 3]), ((2, 0), [1.0, f64::NAN, 1.0])]);
        let mask = missing_mask(&work);
        assert!(mask[(1, 1)]);
        assert!(mask[(2, 0)]);
        assert_eq!(count_gaps(&mask), 2);
    }

    #[test]
    fn test_mark_missing_only_touches_masked_pixels() {
        let mut work = image_with(&[((0, 3), [0.0; 3])]);
        let mask = build_gap_mask(&work, [0.0; 3]);
        mark_missing(&mut work, &mask);
        assert!((0..3).all(|c| work[(0, 3, c)].is_nan()));
        assert_eq!(work.iter().filter(|v| v.is_nan()).count(), 3);
        assert_eq!(work[(0, 2, 1)], 200.0);
    }
}
