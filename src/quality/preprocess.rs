//! Crop, resize, and grayscale preprocessing for capture scoring
//!
//! Analyzer thresholds were tuned against a ~320 px wide crop, so the
//! resize target must stay in step with the scoring configuration.

use crate::config::CropConfig;
use crate::errors::FingerCapError;
use crate::sampler;
use crate::types::{CropRect, StillFrame};
use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

/// Compute the centered crop rectangle for a still of the given size
///
/// The crop is `floor(width * size_ratio)` square, centered, with
/// left/top clamped to 0 and right/bottom clamped to the frame; clamping
/// may shrink the effective crop near edges. Never fails.
pub fn center_crop(width: u32, height: u32, size_ratio: f64) -> CropRect {
    let crop_size = (width as f64 * size_ratio).floor() as i64;
    let cx = width as i64 / 2;
    let cy = height as i64 / 2;

    let left = (cx - crop_size / 2).max(0);
    let top = (cy - crop_size / 2).max(0);
    let right = (left + crop_size).min(width as i64);
    let bottom = (top + crop_size).min(height as i64);

    CropRect {
        left: left as u32,
        top: top as u32,
        width: (right - left).max(0) as u32,
        height: (bottom - top).max(0) as u32,
    }
}

/// Cropped and resized buffers shared by the analyzers
#[derive(Debug, Clone)]
pub struct PreparedCapture {
    pub crop: CropRect,
    /// Resized color crop for the skin analyzer and the preview
    pub color: RgbImage,
    /// Rec.601 grayscale reduction for the focus and illumination analyzers
    pub gray: GrayImage,
}

/// Run the full preprocessing chain on a decoded still
pub fn prepare(still: &StillFrame, config: &CropConfig) -> Result<PreparedCapture, FingerCapError> {
    if !still.is_valid() {
        return Err(FingerCapError::InputError(format!(
            "Invalid still: {} bytes for {}x{}",
            still.data.len(),
            still.width,
            still.height
        )));
    }

    let raster = RgbImage::from_vec(still.width, still.height, still.data.clone())
        .ok_or_else(|| FingerCapError::InputError("Failed to decode still raster".to_string()))?;

    let crop = center_crop(still.width, still.height, config.size_ratio);
    if crop.is_empty() {
        return Err(FingerCapError::CaptureFailure(format!(
            "Degenerate crop {}x{} for still {}x{}",
            crop.width, crop.height, still.width, still.height
        )));
    }

    let cropped =
        imageops::crop_imm(&raster, crop.left, crop.top, crop.width, crop.height).to_image();

    let color = if cropped.width() > config.resize_width {
        let scale = config.resize_width as f64 / cropped.width() as f64;
        let target_h = ((cropped.height() as f64 * scale).round() as u32).max(1);
        imageops::resize(&cropped, config.resize_width, target_h, FilterType::Triangle)
    } else {
        cropped
    };

    let gray = to_grayscale(&color);

    log::debug!(
        "Prepared capture: crop {}x{} at ({},{}), analysis size {}x{}",
        crop.width,
        crop.height,
        crop.left,
        crop.top,
        color.width(),
        color.height()
    );

    Ok(PreparedCapture { crop, color, gray })
}

/// Rec.601 grayscale reduction
fn to_grayscale(color: &RgbImage) -> GrayImage {
    GrayImage::from_fn(color.width(), color.height(), |x, y| {
        let p = color.get_pixel(x, y);
        let lum = sampler::rgb_luminance(p[0], p[1], p[2]);
        image::Luma([lum.round().clamp(0.0, 255.0) as u8])
    })
}
