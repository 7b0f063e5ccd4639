//! Directional interpolation along image rows and columns.
//!
//! Two full-size estimates are produced from the NaN-marked working image:
//! one interpolating down each column (lanes along the row axis) and one
//! across each row (lanes along the column axis). Each channel is its own
//! lane. The estimates are averaged; a streak that defeats one direction is
//! still bridged by the other.

use crate::interp1d::Interpolator1d;
use crate::parallel::{for_each_lane, with_lane_buffer};
use crate::types::InterpolationMethod;
use ndarray::{Array3, Axis};

/// Estimate obtained by interpolating down the rows of every column.
pub fn row_estimate<I: Interpolator1d>(
    marked: &Array3<f64>,
    method: InterpolationMethod,
    interp: &I,
    parallel: bool,
) -> Array3<f64> {
    estimate_along(marked, Axis(0), method, interp, parallel)
}

/// Estimate obtained by interpolating across the columns of every row.
pub fn column_estimate<I: Interpolator1d>(
    marked: &Array3<f64>,
    method: InterpolationMethod,
    interp: &I,
    parallel: bool,
) -> Array3<f64> {
    estimate_along(marked, Axis(1), method, interp, parallel)
}

/// Elementwise mean of the row and column estimates.
///
/// With `parallel` set, the two passes run concurrently and are joined
/// before averaging. A NaN left by either pass stays NaN.
pub fn directional_interpolate<I: Interpolator1d>(
    marked: &Array3<f64>,
    method: InterpolationMethod,
    interp: &I,
    parallel: bool,
) -> Array3<f64> {
    let (rows, cols) = if parallel {
        rayon::join(
            || row_estimate(marked, method, interp, true),
            || column_estimate(marked, method, interp, true),
        )
    } else {
        (
            row_estimate(marked, method, interp, false),
            column_estimate(marked, method, interp, false),
        )
    };
    (rows + cols) / 2.0
}

fn estimate_along<I: Interpolator1d>(
    marked: &Array3<f64>,
    axis: Axis,
    method: InterpolationMethod,
    interp: &I,
    parallel: bool,
) -> Array3<f64> {
    let mut estimate = marked.clone();
    for_each_lane(&mut estimate, axis, parallel, |lane| {
        if lane.iter().any(|v| v.is_nan()) {
            with_lane_buffer(lane, |buf| interp.fill_missing(buf, method));
        }
    });
    estimate
}
