//! Write the interpolated estimate back into gap pixels only

use ndarray::{Array2, Array3, Axis, Zip};

/// Copy `estimate` into `original` at every masked pixel, all three
/// channels at once. Unmasked pixels are not touched.
pub fn composite(
    mut original: Array3<f64>,
    estimate: &Array3<f64>,
    mask: &Array2<bool>,
) -> Array3<f64> {
    Zip::from(original.lanes_mut(Axis(2)))
        .and(estimate.lanes(Axis(2)))
        .and(mask)
        .for_each(|mut px, est, &is_gap| {
            if is_gap {
                px.assign(&est);
            }
        });
    original
}

/// Masked pixels that still hold NaN in any channel of `filled`.
pub fn count_unresolved(filled: &Array3<f64>, mask: &Array2<bool>) -> usize {
    Zip::from(filled.lanes(Axis(2)))
        .and(mask)
        .fold(0, |acc, px, &is_gap| {
            if is_gap && px.iter().any(|v| v.is_nan()) {
                acc + 1
            } else {
                acc
            }
        })
}
