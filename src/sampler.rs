//! Pixel sampling helpers shared by all analyzers
//!
//! Provides bounds-checked luminance access over the two buffer layouts
//! the core receives: planar luma planes from the live feed, and
//! interleaved RGB rasters from decoded stills.

use crate::types::LumaFrame;

/// Rec.601 luma weights, matching the grayscale reduction used for scoring
pub fn rgb_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Read a luminance sample from a planar frame, `None` when out of frame
pub fn luma_at(frame: &LumaFrame, x: u32, y: u32) -> Option<u8> {
    if x >= frame.width || y >= frame.height {
        return None;
    }
    frame
        .data
        .get(y as usize * frame.stride as usize + x as usize)
        .copied()
}

/// Read an RGB sample from an interleaved raster, `None` when out of frame
pub fn rgb_at(data: &[u8], width: u32, height: u32, x: u32, y: u32) -> Option<(u8, u8, u8)> {
    if x >= width || y >= height {
        return None;
    }
    let idx = (y as usize * width as usize + x as usize) * 3;
    if idx + 2 >= data.len() {
        return None;
    }
    Some((data[idx], data[idx + 1], data[idx + 2]))
}

/// Mean of every `step`-th element of a luma plane, linear index over the
/// whole buffer ignoring geometry
///
/// Returns `None` when the buffer holds no samples.
pub fn subsampled_mean(data: &[u8], step: usize) -> Option<f64> {
    if data.is_empty() || step == 0 {
        return None;
    }
    let mut sum = 0u64;
    let mut count = 0u64;
    let mut i = 0;
    while i < data.len() {
        sum += data[i] as u64;
        count += 1;
        i += step;
    }
    Some(sum as f64 / count as f64)
}
