//! 1-D gap filling along a single lane of samples.
//!
//! The directional passes only need one capability: given a sequence where
//! missing samples are NaN, replace them according to an
//! [`InterpolationMethod`]. That capability is the [`Interpolator1d`] trait;
//! [`Interp1d`] is the implementation used by default.
//!
//! Sample positions are the lane indices `0..n`. Known samples ("anchors")
//! are never modified. Entries the method cannot reach stay NaN, e.g. a
//! leading run under `previous`.

mod cubic;

use crate::types::InterpolationMethod;

/// Fills NaN entries of a lane in place.
pub trait Interpolator1d: Sync {
    fn fill_missing(&self, samples: &mut [f64], method: InterpolationMethod);
}

/// Default interpolation primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct Interp1d;

impl Interpolator1d for Interp1d {
    fn fill_missing(&self, samples: &mut [f64], method: InterpolationMethod) {
        if !samples.iter().any(|v| v.is_nan()) {
            return;
        }
        let anchors = Anchors::collect(samples);
        if anchors.is_empty() {
            return;
        }

        match method {
            InterpolationMethod::Previous => fill_previous(samples),
            InterpolationMethod::Next => fill_next(samples),
            InterpolationMethod::Nearest => fill_nearest(samples, &anchors),
            InterpolationMethod::Linear => fill_linear(samples, &anchors),
            InterpolationMethod::Spline => {
                let slopes = cubic::spline_slopes(&anchors);
                cubic::fill_hermite(samples, &anchors, &slopes);
            }
            InterpolationMethod::Pchip => {
                let slopes = cubic::pchip_slopes(&anchors);
                cubic::fill_hermite(samples, &anchors, &slopes);
            }
        }
    }
}

/// Known samples of a lane, in increasing position order
#[derive(Debug, Clone)]
pub(crate) struct Anchors {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Anchors {
    fn collect(samples: &[f64]) -> Self {
        let (xs, ys) = samples
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(i, &v)| (i as f64, v))
            .unzip();
        Self { xs, ys }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index `k` of the segment `[x_k, x_{k+1}]` used to evaluate `x`.
    ///
    /// Positions outside the anchors map to the first or last segment so
    /// that evaluation extrapolates. Requires at least two anchors.
    pub fn segment(&self, x: f64) -> usize {
        let upper = self.xs.partition_point(|&xk| xk <= x);
        upper.clamp(1, self.len() - 1) - 1
    }

    /// Segment widths and slopes `(h_k, δ_k)`
    pub fn differences(&self) -> (Vec<f64>, Vec<f64>) {
        self.xs
            .windows(2)
            .zip(self.ys.windows(2))
            .map(|(x, y)| {
                let h = x[1] - x[0];
                (h, (y[1] - y[0]) / h)
            })
            .unzip()
    }
}

fn fill_previous(samples: &mut [f64]) {
    let mut last = f64::NAN;
    for v in samples.iter_mut() {
        if v.is_nan() {
            *v = last;
        } else {
            last = *v;
        }
    }
}

fn fill_next(samples: &mut [f64]) {
    let mut next = f64::NAN;
    for v in samples.iter_mut().rev() {
        if v.is_nan() {
            *v = next;
        } else {
            next = *v;
        }
    }
}

/// Equidistant gaps take the later anchor.
fn fill_nearest(samples: &mut [f64], anchors: &Anchors) {
    let mut upper = 0;
    for (i, v) in samples.iter_mut().enumerate() {
        if !v.is_nan() {
            continue;
        }
        let x = i as f64;
        while upper < anchors.len() && anchors.xs[upper] < x {
            upper += 1;
        }
        let k = if upper == 0 {
            0
        } else if upper == anchors.len() {
            upper - 1
        } else if x - anchors.xs[upper - 1] < anchors.xs[upper] - x {
            upper - 1
        } else {
            upper
        };
        *v = anchors.ys[k];
    }
}

/// Straight lines between anchors, end segments extended past the ends.
fn fill_linear(samples: &mut [f64], anchors: &Anchors) {
    if anchors.len() == 1 {
        samples.fill(anchors.ys[0]);
        return;
    }
    for (i, v) in samples.iter_mut().enumerate() {
        if !v.is_nan() {
            continue;
        }
        let x = i as f64;
        let k = anchors.segment(x);
        let (x0, x1) = (anchors.xs[k], anchors.xs[k + 1]);
        let (y0, y1) = (anchors.ys[k], anchors.ys[k + 1]);
        *v = y0 + (x - x0) * (y1 - y0) / (x1 - x0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const NAN: f64 = f64::NAN;

    fn fill(samples: &[f64], method: InterpolationMethod) -> Vec<f64> {
        let mut out = samples.to_vec();
        Interp1d.fill_missing(&mut out, method);
        out
    }

    fn assert_lane_eq(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            if e.is_nan() {
                assert!(a.is_nan(), "index {i}: expected NaN, got {a}");
            } else {
                assert_abs_diff_eq!(*a, *e, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_previous_leaves_leading_gap() {
        let out = fill(&[NAN, 1.0, NAN, NAN, 4.0, NAN], InterpolationMethod::Previous);
        assert_lane_eq(&out, &[NAN, 1.0, 1.0, 1.0, 4.0, 4.0]);
    }

    #[test]
    fn test_next_leaves_trailing_gap() {
        let out = fill(&[NAN, 1.0, NAN, NAN, 4.0, NAN], InterpolationMethod::Next);
        assert_lane_eq(&out, &[1.0, 1.0, 4.0, 4.0, 4.0, NAN]);
    }

    #[test]
    fn test_nearest_ties_go_to_later_anchor() {
        let out = fill(&[NAN, 1.0, NAN, 3.0, NAN, NAN, 9.0], InterpolationMethod::Nearest);
        assert_lane_eq(&out, &[1.0, 1.0, 3.0, 3.0, 3.0, 9.0, 9.0]);
    }

    #[test]
    fn test_linear_interior_and_extrapolation() {
        let out = fill(&[NAN, 2.0, NAN, NAN, 8.0, NAN], InterpolationMethod::Linear);
        assert_lane_eq(&out, &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_single_anchor_is_constant() {
        for method in InterpolationMethod::ALL {
            let out = fill(&[NAN, NAN, 5.0, NAN], method);
            match method {
                InterpolationMethod::Previous => assert_lane_eq(&out, &[NAN, NAN, 5.0, 5.0]),
                InterpolationMethod::Next => assert_lane_eq(&out, &[5.0, 5.0, 5.0, NAN]),
                _ => assert_lane_eq(&out, &[5.0; 4]),
            }
        }
    }

    #[test]
    fn test_all_missing_stays_missing() {
        for method in InterpolationMethod::ALL {
            let out = fill(&[NAN; 4], method);
            assert!(out.iter().all(|v| v.is_nan()), "{method}");
        }
    }

    #[test]
    fn test_anchors_never_change() {
        let lane = [3.0, NAN, 7.5, 1.0, NAN, NAN, 2.0, 6.0];
        for method in InterpolationMethod::ALL {
            let out = fill(&lane, method);
            for (a, e) in out.iter().zip(&lane) {
                if !e.is_nan() {
                    assert_eq!(a, e, "{method}");
                }
            }
        }
    }

    #[test]
    fn test_segment_lookup() {
        let anchors = Anchors::collect(&[1.0, NAN, 2.0, NAN, NAN, 3.0]);
        assert_eq!(anchors.xs, vec![0.0, 2.0, 5.0]);
        assert_eq!(anchors.segment(-1.0), 0);
        assert_eq!(anchors.segment(1.0), 0);
        assert_eq!(anchors.segment(3.0), 1);
        assert_eq!(anchors.segment(7.0), 1);
    }
}
