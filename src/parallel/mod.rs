//! Parallelization helpers for per-lane processing

use ndarray::{Array3, ArrayViewMut1, Axis, Zip};

/// Apply `f` to every 1-D lane of `image` along `axis`.
///
/// For a (rows, cols, 3) image, `Axis(0)` visits one lane per (column,
/// channel) pair and `Axis(1)` one per (row, channel) pair. Lanes are
/// independent, so with `parallel` set they are dispatched to the rayon
/// pool; the result does not depend on the schedule.
pub fn for_each_lane<F>(image: &mut Array3<f64>, axis: Axis, parallel: bool, f: F)
where
    F: Fn(ArrayViewMut1<'_, f64>) + Sync + Send,
{
    let lanes = Zip::from(image.lanes_mut(axis));
    if parallel {
        lanes.par_for_each(f);
    } else {
        lanes.for_each(f);
    }
}

/// Run `f` on a contiguous copy of the lane, then write the copy back.
///
/// Lanes along the outer axes are strided; copying keeps the inner loop
/// on contiguous memory and lets the callee take a plain slice.
pub fn with_lane_buffer<F>(mut lane: ArrayViewMut1<'_, f64>, f: F)
where
    F: FnOnce(&mut [f64]),
{
    let mut buf = lane.to_vec();
    f(&mut buf);
    for (dst, src) in lane.iter_mut().zip(buf) {
        *dst = src;
    }
}
