//! Piecewise cubic Hermite evaluation with spline and PCHIP slopes.
//!
//! Both methods reduce to choosing a slope at every anchor; the curve on
//! each segment is then the cubic Hermite polynomial through the two end
//! values and slopes. The first and last polynomials are extended past the
//! anchors for extrapolation.

use super::Anchors;

/// Slopes of the not-a-knot cubic spline through the anchors.
///
/// Two anchors give the straight line, three the interpolating parabola.
pub(crate) fn spline_slopes(anchors: &Anchors) -> Vec<f64> {
    let n = anchors.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let (h, del) = anchors.differences();
    if n == 2 {
        return vec![del[0]; 2];
    }
    if n == 3 {
        let xs = &anchors.xs;
        let curvature = (del[1] - del[0]) / (xs[2] - xs[0]);
        return xs
            .iter()
            .map(|&x| del[0] + curvature * (2.0 * x - xs[0] - xs[1]))
            .collect();
    }

    // Tridiagonal system in the slopes, not-a-knot conditions in the first
    // and last rows.
    let mut sub = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut sup = vec![0.0; n];
    let mut rhs = vec![0.0; n];

    let x31 = h[0] + h[1];
    diag[0] = h[1];
    sup[0] = x31;
    rhs[0] = ((h[0] + 2.0 * x31) * h[1] * del[0] + h[0] * h[0] * del[1]) / x31;

    for i in 1..n - 1 {
        sub[i] = h[i];
        diag[i] = 2.0 * (h[i - 1] + h[i]);
        sup[i] = h[i - 1];
        rhs[i] = 3.0 * (h[i] * del[i - 1] + h[i - 1] * del[i]);
    }

    let xn = h[n - 2] + h[n - 3];
    sub[n - 1] = xn;
    diag[n - 1] = h[n - 3];
    rhs[n - 1] =
        (h[n - 2] * h[n - 2] * del[n - 3] + (2.0 * xn + h[n - 2]) * h[n - 3] * del[n - 2]) / xn;

    solve_tridiagonal(&sub, &mut diag, &sup, &mut rhs);
    rhs
}

/// Thomas algorithm; the solution is left in `rhs`.
fn solve_tridiagonal(sub: &[f64], diag: &mut [f64], sup: &[f64], rhs: &mut [f64]) {
    let n = diag.len();
    for i in 1..n {
        let w = sub[i] / diag[i - 1];
        diag[i] -= w * sup[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }
    rhs[n - 1] /= diag[n - 1];
    for i in (0..n - 1).rev() {
        rhs[i] = (rhs[i] - sup[i] * rhs[i + 1]) / diag[i];
    }
}

/// Fritsch–Carlson slopes: zero at local extrema, weighted harmonic mean of
/// the neighbouring secants elsewhere, one-sided three-point estimate at the
/// ends.
pub(crate) fn pchip_slopes(anchors: &Anchors) -> Vec<f64> {
    let n = anchors.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let (h, del) = anchors.differences();
    if n == 2 {
        return vec![del[0]; 2];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        if sign(del[k - 1]) * sign(del[k]) > 0.0 {
            let w1 = 2.0 * h[k] + h[k - 1];
            let w2 = h[k] + 2.0 * h[k - 1];
            d[k] = (w1 + w2) / (w1 / del[k - 1] + w2 / del[k]);
        }
    }
    d[0] = end_slope(h[0], h[1], del[0], del[1]);
    d[n - 1] = end_slope(h[n - 2], h[n - 3], del[n - 2], del[n - 3]);
    d
}

fn end_slope(h1: f64, h2: f64, del1: f64, del2: f64) -> f64 {
    let d = ((2.0 * h1 + h2) * del1 - h1 * del2) / (h1 + h2);
    if sign(d) != sign(del1) {
        0.0
    } else if sign(del1) != sign(del2) && d.abs() > (3.0 * del1).abs() {
        3.0 * del1
    } else {
        d
    }
}

/// -1, 0 or 1; unlike `f64::signum`, zero maps to zero.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Replace NaN samples with the Hermite curve defined by `slopes`.
pub(crate) fn fill_hermite(samples: &mut [f64], anchors: &Anchors, slopes: &[f64]) {
    if anchors.len() == 1 {
        samples.fill(anchors.ys[0]);
        return;
    }
    for (i, v) in samples.iter_mut().enumerate() {
        if v.is_nan() {
            *v = eval_hermite(anchors, slopes, i as f64);
        }
    }
}

fn eval_hermite(anchors: &Anchors, slopes: &[f64], x: f64) -> f64 {
    let k = anchors.segment(x);
    let h = anchors.xs[k + 1] - anchors.xs[k];
    let del = (anchors.ys[k + 1] - anchors.ys[k]) / h;
    let (d0, d1) = (slopes[k], slopes[k + 1]);
    let c = (3.0 * del - 2.0 * d0 - d1) / h;
    let b = (d0 - 2.0 * del + d1) / (h * h);
    let t = x - anchors.xs[k];
    anchors.ys[k] + t * (d0 + t * (c + t * b))
}
