//! Precondition checks run before any pixel is touched

use crate::types::{Error, FillConfig, GapValue, ImageData, InterpolationMethod, Result};
use ndarray::{ArrayD, ArrayView3, Ix3};

/// Borrowed rank-3 RGB image of an accepted element type
#[derive(Debug, Clone)]
pub enum RgbView<'a> {
    U8(ArrayView3<'a, u8>),
    F32(ArrayView3<'a, f32>),
    F64(ArrayView3<'a, f64>),
}

/// A call that passed validation
#[derive(Debug, Clone)]
pub struct Validated<'a> {
    pub image: RgbView<'a>,
    pub method: InterpolationMethod,
    /// Normalized, see [`GapValue::normalized`]
    pub gap_value: GapValue,
}

/// Check image shape and type, resolve defaults, and normalize the gap value
///
/// Errors, in order of checking:
/// - [`Error::Shape`] if the image is not rank 3 or does not have 3 channels
/// - [`Error::Type`] if the element type is not u8, f32 or f64
/// - [`Error::Arity`] if no method was given
pub fn validate<'a>(image: &'a ImageData, config: &FillConfig) -> Result<Validated<'a>> {
    check_shape(image.shape())?;

    let view = match image {
        ImageData::U8(arr) => RgbView::U8(as_rgb(arr)?),
        ImageData::F32(arr) => RgbView::F32(as_rgb(arr)?),
        ImageData::F64(arr) => RgbView::F64(as_rgb(arr)?),
        other => {
            return Err(Error::Type(format!(
                "unsupported image element type {}, expected uint8, float32 or float64",
                other.dtype()
            )))
        }
    };

    let method = config
        .method
        .ok_or_else(|| Error::Arity("an interpolation method is required".to_string()))?;
    let gap_value = config.gap_value.unwrap_or_default().normalized();

    Ok(Validated {
        image: view,
        method,
        gap_value,
    })
}

fn check_shape(shape: &[usize]) -> Result<()> {
    if shape.len() != 3 {
        return Err(Error::Shape(format!(
            "expected a (rows, cols, 3) image, got rank {}",
            shape.len()
        )));
    }
    if shape[2] != 3 {
        return Err(Error::Shape(format!(
            "invalid RGB channel count: {}",
            shape[2]
        )));
    }
    Ok(())
}

fn as_rgb<T>(arr: &ArrayD<T>) -> Result<ArrayView3<'_, T>> {
    arr.view()
        .into_dimensionality::<Ix3>()
        .map_err(|e| Error::Shape(format!("array is not rank 3: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, IxDyn};

    fn linear() -> FillConfig {
        FillConfig::new(InterpolationMethod::Linear)
    }

    #[test]
    fn test_accepts_rgb_u8() {
        let image = ImageData::from(Array3::<u8>::zeros((4, 5, 3)));
        let validated = validate(&image, &linear()).unwrap();
        assert!(matches!(validated.image, RgbView::U8(ref v) if v.dim() == (4, 5, 3)));
        assert_eq!(validated.method, InterpolationMethod::Linear);
        assert_eq!(validated.gap_value, GapValue::Scalar(0.0));
    }

    #[test]
    fn test_rejects_rank_two() {
        let image = ImageData::U8(Array2::<u8>::zeros((4, 5)).into_dyn());
        assert!(matches!(validate(&image, &linear()), Err(Error::Shape(_))));
    }

    #[test]
    fn test_rejects_four_channels() {
        let image = ImageData::F32(Array3::<f32>::zeros((2, 2, 4)).into_dyn());
        let err = validate(&image, &linear()).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
        assert!(err.to_string().contains("channel count"));
    }

    #[test]
    fn test_rejects_int16() {
        let image = ImageData::I16(ndarray::ArrayD::<i16>::zeros(IxDyn(&[2, 2, 3])));
        assert!(matches!(validate(&image, &linear()), Err(Error::Type(_))));
    }

    #[test]
    fn test_shape_checked_before_type() {
        let image = ImageData::I16(ndarray::ArrayD::<i16>::zeros(IxDyn(&[2, 2])));
        assert!(matches!(validate(&image, &linear()), Err(Error::Shape(_))));
    }

    #[test]
    fn test_missing_method_is_arity_error() {
        let image = ImageData::from(Array3::<f64>::zeros((2, 2, 3)));
        let err = validate(&image, &FillConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Arity(_)));
        assert!(err.to_string().starts_with("Too few arguments"));
    }

    #[test]
    fn test_gap_value_is_normalized() {
        let image = ImageData::from(Array3::<u8>::zeros((2, 2, 3)));
        let config = linear().with_gap_value(GapValue::PerChannel([9.0, 9.0, 9.0]));
        assert_eq!(
            validate(&image, &config).unwrap().gap_value,
            GapValue::Scalar(9.0)
        );
    }
}
