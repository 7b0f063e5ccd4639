//! Core types and structures for gapfill

use ndarray::{Array3, ArrayD};
use std::str::FromStr;
use thiserror::Error;

/// Strategy used by the 1-D interpolation primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationMethod {
    /// Carry the last known sample forward
    Previous,
    /// Carry the next known sample backward
    Next,
    /// Copy the closest known sample
    Nearest,
    /// Piecewise linear
    Linear,
    /// Not-a-knot cubic spline
    Spline,
    /// Shape-preserving piecewise cubic Hermite
    Pchip,
}

impl InterpolationMethod {
    pub const ALL: [InterpolationMethod; 6] = [
        InterpolationMethod::Previous,
        InterpolationMethod::Next,
        InterpolationMethod::Nearest,
        InterpolationMethod::Linear,
        InterpolationMethod::Spline,
        InterpolationMethod::Pchip,
    ];

    /// Lowercase method name
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationMethod::Previous => "previous",
            InterpolationMethod::Next => "next",
            InterpolationMethod::Nearest => "nearest",
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Spline => "spline",
            InterpolationMethod::Pchip => "pchip",
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let method = match s.trim().to_lowercase().as_str() {
            "previous" => InterpolationMethod::Previous,
            "next" => InterpolationMethod::Next,
            "nearest" => InterpolationMethod::Nearest,
            "linear" => InterpolationMethod::Linear,
            "spline" => InterpolationMethod::Spline,
            "pchip" => InterpolationMethod::Pchip,
            other => {
                return Err(Error::Type(format!(
                    "unknown interpolation method '{}' (expected previous, next, nearest, linear, spline or pchip)",
                    other
                )))
            }
        };
        Ok(method)
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sentinel identifying gap pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapValue {
    /// Gap iff all three channels equal this value
    Scalar(f64),
    /// Gap iff each channel equals its own component
    PerChannel([f64; 3]),
    /// The image already carries NaN markers; mask building is skipped
    Missing,
}

impl Default for GapValue {
    fn default() -> Self {
        GapValue::Scalar(0.0)
    }
}

impl GapValue {
    /// Build a gap value from a 1×1 or 1×3 sequence
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match *values {
            [v] => Ok(GapValue::Scalar(v)),
            [r, g, b] => Ok(GapValue::PerChannel([r, g, b])),
            _ => Err(Error::Shape(format!(
                "gap value must have 1 or 3 elements, got {}",
                values.len()
            ))),
        }
    }

    /// Canonical form: equal triples collapse to a scalar, any NaN means `Missing`
    pub fn normalized(self) -> Self {
        match self {
            GapValue::Scalar(v) if v.is_nan() => GapValue::Missing,
            GapValue::PerChannel(vs) if vs.iter().any(|v| v.is_nan()) => GapValue::Missing,
            GapValue::PerChannel([r, g, b]) if r == g && g == b => GapValue::Scalar(r),
            other => other,
        }
    }

    /// Per-channel sentinel, or `None` in passthrough mode
    pub fn channels(&self) -> Option<[f64; 3]> {
        match *self {
            GapValue::Scalar(v) => Some([v; 3]),
            GapValue::PerChannel(vs) => Some(vs),
            GapValue::Missing => None,
        }
    }
}

impl FromStr for GapValue {
    type Err = Error;

    /// Parses `"0"`, `"255,0,0"` or `"nan"`
    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token.parse::<f64>().map_err(|_| {
                    Error::Type(format!("gap value '{}' is not numeric", token))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        GapValue::from_slice(&values)
    }
}

/// Representation of the returned image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputDepth {
    /// Always 8-bit unsigned
    #[default]
    Canonical,
    /// Same element type as the input
    Preserve,
}

/// Fill configuration
///
/// `method` has no default; leaving it unset is reported as
/// [`Error::Arity`] when the configuration is validated.
#[derive(Debug, Clone)]
pub struct FillConfig {
    /// Interpolation strategy (required)
    pub method: Option<InterpolationMethod>,
    /// Gap sentinel, defaults to scalar 0
    pub gap_value: Option<GapValue>,
    /// Output representation
    pub output: OutputDepth,
    /// Interpolate lanes on the rayon pool
    pub parallel: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            method: None,
            gap_value: None,
            output: OutputDepth::Canonical,
            parallel: true,
        }
    }
}

impl FillConfig {
    /// Create a configuration with the given method and default options
    pub fn new(method: InterpolationMethod) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn with_gap_value(mut self, gap_value: GapValue) -> Self {
        self.gap_value = Some(gap_value);
        self
    }

    pub fn with_output(mut self, output: OutputDepth) -> Self {
        self.output = output;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Counts reported after a fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillSummary {
    /// Pixels selected by the gap mask
    pub gap_pixels: usize,
    /// Gap pixels still holding a missing marker after interpolation
    pub unresolved_pixels: usize,
}

/// Result of a fill: the new image plus its summary
#[derive(Debug)]
pub struct FillOutcome {
    pub image: ImageData,
    pub summary: FillSummary,
}

/// Multi-format image data representation
///
/// Only `U8`, `F32` and `F64` rank-3 arrays with three channels are
/// accepted for filling; the other variants exist so that callers and the
/// loader can hand over what they have and get a precise error back.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    I16(ArrayD<i16>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

impl ImageData {
    pub fn shape(&self) -> &[usize] {
        match self {
            ImageData::U8(arr) => arr.shape(),
            ImageData::U16(arr) => arr.shape(),
            ImageData::I16(arr) => arr.shape(),
            ImageData::F32(arr) => arr.shape(),
            ImageData::F64(arr) => arr.shape(),
        }
    }

    /// Element type name
    pub fn dtype(&self) -> &'static str {
        match self {
            ImageData::U8(_) => "uint8",
            ImageData::U16(_) => "uint16",
            ImageData::I16(_) => "int16",
            ImageData::F32(_) => "float32",
            ImageData::F64(_) => "float64",
        }
    }

    /// Borrow as a u8 RGB array, if that is what this holds
    pub fn as_u8(&self) -> Option<&ArrayD<u8>> {
        match self {
            ImageData::U8(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            ImageData::F32(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&ArrayD<f64>> {
        match self {
            ImageData::F64(arr) => Some(arr),
            _ => None,
        }
    }
}

impl From<Array3<u8>> for ImageData {
    fn from(arr: Array3<u8>) -> Self {
        ImageData::U8(arr.into_dyn())
    }
}

impl From<Array3<f32>> for ImageData {
    fn from(arr: Array3<f32>) -> Self {
        ImageData::F32(arr.into_dyn())
    }
}

impl From<Array3<f64>> for ImageData {
    fn from(arr: Array3<f64>) -> Self {
        ImageData::F64(arr.into_dyn())
    }
}

/// Image output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Tiff,
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Parse format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Tiff => "tif",
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// gapfill error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Type error: {0}")]
    Type(String),

    #[error("Too few arguments: {0}")]
    Arity(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
