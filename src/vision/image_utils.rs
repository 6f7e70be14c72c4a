// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading and tensor conversion for the classifiers
//!
//! Every model in this crate consumes the same batch-wrapped NHWC tensor:
//! shape `[1, 224, 224, 3]`, RGB, raw pixel values in `0.0..=255.0`.
//! Model-specific normalization happens later in `preprocessing`.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageFormat};
use ndarray::Array4;
use std::path::Path;

use super::error::VisionError;

/// Side length of the square model input
pub const INPUT_SIZE: u32 = 224;

/// Number of color channels in the model input
pub const INPUT_CHANNELS: usize = 3;

/// Read and decode an image from disk
///
/// The format is sniffed from the file's magic bytes rather than trusted
/// from the extension, so a renamed file still decodes (or fails cleanly).
///
/// # Arguments
/// * `path` - Image file, e.g. a saved upload
///
/// # Returns
/// * `Ok(DynamicImage)` - The decoded image
/// * `Err(VisionError::ImageNotFound)` - If `path` does not exist
/// * `Err(VisionError)` - If the file cannot be read or decoded
pub fn load_image(path: &Path) -> Result<DynamicImage, VisionError> {
    if !path.exists() {
        return Err(VisionError::ImageNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| VisionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode_image_bytes(&bytes)
}

/// Decode raw image bytes
///
/// # Arguments
/// * `bytes` - Raw image bytes
///
/// # Returns
/// * `Ok(DynamicImage)` - The decoded image
/// * `Err(VisionError::EmptyData)` - If `bytes` is empty
/// * `Err(VisionError::UnsupportedFormat)` - If no known magic bytes match
/// * `Err(VisionError::Decode)` - If the decoder rejects the data
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, VisionError> {
    if bytes.is_empty() {
        return Err(VisionError::EmptyData);
    }

    let format = detect_format(bytes)?;

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| VisionError::Decode(e.to_string()))
}

/// Detect image format from magic bytes
///
/// # Arguments
/// * `bytes` - Raw image data
///
/// # Returns
/// * `Ok(ImageFormat)` - Detected format
/// * `Err(VisionError::UnsupportedFormat)` - If format cannot be detected
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, VisionError> {
    if bytes.len() < 4 {
        return Err(VisionError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(ImageFormat::WebP),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Ok(ImageFormat::Bmp),

        _ => Err(VisionError::UnsupportedFormat),
    }
}

/// Load an image and convert it to a `[1, 224, 224, 3]` tensor
///
/// # Arguments
/// * `path` - Image file to load
///
/// # Returns
/// * `Ok(Array4<f32>)` - NHWC RGB tensor with raw `0..=255` values
/// * `Err(VisionError)` - If the image cannot be loaded (see [`load_image`])
///
/// # Example
/// ```ignore
/// let tensor = path_to_tensor(Path::new("static/uploads/dog.jpg"))?;
/// assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
/// ```
pub fn path_to_tensor(path: &Path) -> Result<Array4<f32>, VisionError> {
    let image = load_image(path)?;
    Ok(image_to_tensor(&image))
}

/// Resize to the model input size and pack pixels into an NHWC tensor
///
/// Resizing ignores aspect ratio and uses nearest-neighbour sampling, which
/// is what the classifiers were trained against.
pub fn image_to_tensor(image: &DynamicImage) -> Array4<f32> {
    let resized = image.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Nearest);
    let rgb = resized.to_rgb8();

    let size = INPUT_SIZE as usize;
    let mut tensor = Array4::zeros((1, size, size, INPUT_CHANNELS));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..INPUT_CHANNELS {
            tensor[[0, y as usize, x as usize, c]] = pixel[c] as f32;
        }
    }

    tensor
}

/// Load an image as 8-bit grayscale, for the cascade face detector
pub fn load_grayscale(path: &Path) -> Result<GrayImage, VisionError> {
    Ok(load_image(path)?.to_luma8())
}
