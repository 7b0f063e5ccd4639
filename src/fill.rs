//! Gap filling pipeline: validate, mask, interpolate, composite.

use crate::inpainting::composite::count_unresolved;
use crate::inpainting::{composite, directional_interpolate};
use crate::interp1d::{Interp1d, Interpolator1d};
use crate::mask::{build_gap_mask, count_gaps, mark_missing, missing_mask};
use crate::sample::Sample;
use crate::types::{
    FillConfig, FillOutcome, FillSummary, GapValue, ImageData, InterpolationMethod, OutputDepth,
    Result,
};
use crate::validate::{validate, RgbView};
use log::{debug, warn};
use ndarray::{Array3, ArrayView3};

/// Fill gap pixels of an RGB image using the built-in 1-D interpolator.
///
/// Gap pixels are those whose three channels all match `config.gap_value`
/// (scalar or per channel, default 0). They are replaced by the mean of a
/// row-wise and a column-wise interpolation; every other pixel is returned
/// exactly as given. With [`GapValue::Missing`] the NaN samples already
/// present in a float image are the gaps.
///
/// # Errors
/// [`Error::Shape`](crate::Error::Shape), [`Error::Type`](crate::Error::Type)
/// or [`Error::Arity`](crate::Error::Arity) when the input fails
/// validation. Gaps the method cannot reach are not errors: they stay NaN
/// in float output and become 0 in 8-bit output.
pub fn fill_missing_rgb(image: &ImageData, config: &FillConfig) -> Result<ImageData> {
    fill_missing_rgb_with(image, config, &Interp1d).map(|outcome| outcome.image)
}

/// Same as [`fill_missing_rgb`] with a caller-supplied 1-D interpolator,
/// also reporting how many pixels were filled.
pub fn fill_missing_rgb_with<I: Interpolator1d>(
    image: &ImageData,
    config: &FillConfig,
    interp: &I,
) -> Result<FillOutcome> {
    let validated = validate(image, config)?;
    let method = validated.method;
    let gap_value = validated.gap_value;
    debug!(
        "filling {} {:?} image, method={}, gap={:?}",
        image.dtype(),
        image.shape(),
        method,
        gap_value
    );

    let (filled, summary) = match &validated.image {
        RgbView::U8(view) => fill_working(view, method, gap_value, interp, config.parallel),
        RgbView::F32(view) => fill_working(view, method, gap_value, interp, config.parallel),
        RgbView::F64(view) => fill_working(view, method, gap_value, interp, config.parallel),
    };

    let image = match (config.output, &validated.image) {
        (OutputDepth::Canonical, _) | (OutputDepth::Preserve, RgbView::U8(_)) => {
            ImageData::from(demote::<u8>(&filled))
        }
        (OutputDepth::Preserve, RgbView::F32(_)) => ImageData::from(demote::<f32>(&filled)),
        (OutputDepth::Preserve, RgbView::F64(_)) => ImageData::from(filled),
    };

    Ok(FillOutcome { image, summary })
}

/// Run the pipeline in the f64 working representation.
fn fill_working<T: Sample, I: Interpolator1d>(
    view: &ArrayView3<'_, T>,
    method: InterpolationMethod,
    gap_value: GapValue,
    interp: &I,
    parallel: bool,
) -> (Array3<f64>, FillSummary) {
    let original = view.mapv(T::to_working);

    let (mask, marked) = match gap_value.channels() {
        Some(sentinel) => {
            let mask = build_gap_mask(&original, sentinel.map(T::sentinel));
            let mut marked = original.clone();
            mark_missing(&mut marked, &mask);
            (mask, marked)
        }
        // The image carries its own markers; interpolate it as-is
        None => (missing_mask(&original), original.clone()),
    };

    let gap_pixels = count_gaps(&mask);
    debug!("gap mask selects {} of {} pixels", gap_pixels, mask.len());
    if gap_pixels == 0 {
        return (original, FillSummary::default());
    }

    let estimate = directional_interpolate(&marked, method, interp, parallel);
    let filled = composite(original, &estimate, &mask);

    let unresolved_pixels = count_unresolved(&filled, &mask);
    if unresolved_pixels > 0 {
        warn!(
            "{} of {} gap pixels could not be filled with method '{}'",
            unresolved_pixels, gap_pixels, method
        );
    }

    (
        filled,
        FillSummary {
            gap_pixels,
            unresolved_pixels,
        },
    )
}

fn demote<T: Sample>(working: &Array3<f64>) -> Array3<T> {
    working.mapv(T::from_working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Error;

    fn white_with_black_centre() -> Array3<u8> {
        let mut image = Array3::from_elem((3, 3, 3), 255u8);
        for c in 0..3 {
            image[(1, 1, c)] = 0;
        }
        image
    }

    #[test]
    fn test_single_black_pixel_becomes_white() {
        let image = ImageData::from(white_with_black_centre());
        let config = FillConfig::new(InterpolationMethod::Linear)
            .with_gap_value(GapValue::PerChannel([0.0, 0.0, 0.0]));
        let out = fill_missing_rgb(&image, &config).unwrap();
        let out = out.as_u8().unwrap();
        assert!(out.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_summary_counts() {
        let image = ImageData::from(white_with_black_centre());
        let config = FillConfig::new(InterpolationMethod::Spline);
        let outcome = fill_missing_rgb_with(&image, &config, &Interp1d).unwrap();
        assert_eq!(
            outcome.summary,
            FillSummary {
                gap_pixels: 1,
                unresolved_pixels: 0
            }
        );
    }

    #[test]
    fn test_unresolved_gap_becomes_zero_in_u8() {
        // Whole top row is a gap; `previous` has no anchor above it and
        // the row itself is all gap, so neither pass resolves it.
        let mut image = Array3::from_elem((3, 4, 3), 90u8);
        for x in 0..4 {
            for c in 0..3 {
                image[(0, x, c)] = 7;
            }
        }
        let config =
            FillConfig::new(InterpolationMethod::Previous).with_gap_value(GapValue::Scalar(7.0));
        let outcome = fill_missing_rgb_with(&ImageData::from(image), &config, &Interp1d).unwrap();
        assert_eq!(outcome.summary.unresolved_pixels, 4);
        let out = outcome.image.as_u8().unwrap().clone();
        assert!((0..4).all(|x| out[[0, x, 0]] == 0));
        assert!((0..4).all(|x| out[[1, x, 2]] == 90));
    }

    #[test]
    fn test_preserve_keeps_float_type_and_nan() {
        let mut image = Array3::from_elem((2, 3, 3), 0.25f32);
        for c in 0..3 {
            image[(0, 0, c)] = -1.0;
            image[(1, 0, c)] = -1.0;
        }
        let config = FillConfig::new(InterpolationMethod::Next)
            .with_gap_value(GapValue::Scalar(-1.0))
            .with_output(OutputDepth::Preserve);
        let out = fill_missing_rgb(&ImageData::from(image), &config).unwrap();
        let out = out.as_f32().unwrap();
        // Column 0 is all gap, so the row pass leaves NaN there and the
        // mean stays NaN.
        assert!(out[[0, 0, 0]].is_nan());
        assert_eq!(out[[0, 1, 0]], 0.25);
    }

    #[test]
    fn test_f32_sentinel_compared_at_f32_precision() {
        let mut image = Array3::from_elem((3, 3, 3), 0.5f32);
        for c in 0..3 {
            image[(1, 1, c)] = 0.1;
        }
        let config = FillConfig::new(InterpolationMethod::Nearest)
            .with_gap_value(GapValue::Scalar(0.1))
            .with_output(OutputDepth::Preserve);
        let outcome = fill_missing_rgb_with(&ImageData::from(image), &config, &Interp1d).unwrap();
        assert_eq!(outcome.summary.gap_pixels, 1);
        assert!(outcome.image.as_f32().unwrap().iter().all(|&v| v == 0.5));
    }

    #[test]
    fn test_validation_runs_first() {
        let image = ImageData::from(white_with_black_centre());
        assert!(matches!(
            fill_missing_rgb(&image, &FillConfig::default()),
            Err(Error::Arity(_))
        ));
    }
}
