//! RGB image I/O with element type preservation

use crate::types::{Error, ImageData, ImageFormat, Result};
use image::{DynamicImage, ImageBuffer, ImageReader, Rgb};
use ndarray::{ArrayD, ArrayView3, Ix3, IxDyn};
use std::path::{Path, PathBuf};

/// Load an image from a file as a (rows, cols, 3) array.
///
/// 8-bit sources (gray or color) load as `U8`, 16-bit as `U16`, float as
/// `F32`. Alpha is dropped.
pub fn load_image(path: &Path) -> Result<ImageData> {
    let mut reader = ImageReader::open(path)?;
    reader.no_limits();
    let img = reader.decode()?;

    match img {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            Ok(ImageData::U8(to_array(height, width, rgb.into_raw())?))
        }
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => {
            let rgb = img.to_rgb16();
            let (width, height) = rgb.dimensions();
            Ok(ImageData::U16(to_array(height, width, rgb.into_raw())?))
        }
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            let rgb = img.to_rgb32f();
            let (width, height) = rgb.dimensions();
            Ok(ImageData::F32(to_array(height, width, rgb.into_raw())?))
        }
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported image format: {:?}",
            img.color()
        ))),
    }
}

/// Interleaved row-major RGB samples to a (rows, cols, 3) array
fn to_array<T>(height: u32, width: u32, raw: Vec<T>) -> Result<ArrayD<T>> {
    ArrayD::from_shape_vec(IxDyn(&[height as usize, width as usize, 3]), raw)
        .map_err(|e| Error::Processing(format!("Array shape error: {}", e)))
}

/// Save a (rows, cols, 3) image with the given format.
///
/// u8 data is written as RGB8, float data as RGB32F (TIFF only among the
/// supported formats).
pub fn save_image(path: &Path, data: &ImageData, format: ImageFormat) -> Result<()> {
    let dynamic = match data {
        ImageData::U8(array) => {
            let (width, height, raw) = interleaved(array)?;
            let buf = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(width, height, raw)
                .ok_or_else(|| Error::Processing("Failed to create image buffer".to_string()))?;
            DynamicImage::ImageRgb8(buf)
        }
        ImageData::F32(array) => {
            let (width, height, raw) = interleaved(array)?;
            let buf = ImageBuffer::<Rgb<f32>, Vec<f32>>::from_raw(width, height, raw)
                .ok_or_else(|| Error::Processing("Failed to create image buffer".to_string()))?;
            DynamicImage::ImageRgb32F(buf)
        }
        ImageData::F64(array) => {
            let narrowed = array.mapv(|v| v as f32);
            return save_image(path, &ImageData::F32(narrowed), format);
        }
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "{} images are not supported for saving",
                other.dtype()
            )));
        }
    };

    dynamic.save_with_format(path, format.into())?;
    Ok(())
}

/// Width, height and row-major interleaved samples of an RGB array
fn interleaved<T: Copy>(array: &ArrayD<T>) -> Result<(u32, u32, Vec<T>)> {
    let rgb: ArrayView3<'_, T> = array
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|e| Error::Shape(format!("array is not rank 3: {}", e)))?;
    let (height, width, channels) = rgb.dim();
    if channels != 3 {
        return Err(Error::Shape(format!(
            "invalid RGB channel count: {}",
            channels
        )));
    }
    // Direct buffer construction from contiguous array data
    let raw = match rgb.as_slice() {
        Some(slice) => slice.to_vec(),
        None => rgb.iter().copied().collect(),
    };
    Ok((width as u32, height as u32, raw))
}

/// Generate output filename based on input and format
pub fn generate_output_path(input: &Path, format: Option<ImageFormat>) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Invalid input filename",
            ))
        })?;

    let parent = input.parent().unwrap_or_else(|| Path::new("."));

    let extension = if let Some(fmt) = format {
        fmt.extension()
    } else {
        input
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "No file extension",
                ))
            })?
    };

    Ok(parent.join(format!("{}_filled.{}", stem, extension)))
}
