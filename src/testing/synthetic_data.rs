//! Synthetic frame generators for offline testing
//!
//! Patterns cover the cases the analyzers discriminate on: uniform
//! luminance bands, skin-toned rasters, sharp checkerboards, and
//! exposure gradients.

use crate::types::{LumaFrame, StillFrame};

/// Uniform luminance plane, tightly packed
pub fn solid_luma_frame(width: u32, height: u32, value: u8) -> LumaFrame {
    LumaFrame::packed(vec![value; (width * height) as usize], width, height)
}

/// Uniform RGB still
pub fn solid_still(width: u32, height: u32, rgb: [u8; 3]) -> StillFrame {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&rgb);
    }
    StillFrame::new(data, width, height)
}

/// Uniform still in a tone satisfying the skin rule
pub fn skin_still(width: u32, height: u32) -> StillFrame {
    solid_still(width, height, [200, 130, 100])
}

/// Black/white checkerboard still for sharpness testing
pub fn checkerboard_still(width: u32, height: u32, check_size: u32) -> StillFrame {
    let check = check_size.max(1);
    let mut data = vec![0u8; (width * height * 3) as usize];
    for y in 0..height {
        for x in 0..width {
            let is_white = ((x / check) + (y / check)) % 2 == 0;
            let color = if is_white { 255 } else { 0 };
            let idx = ((y * width + x) * 3) as usize;
            data[idx] = color;
            data[idx + 1] = color;
            data[idx + 2] = color;
        }
    }
    StillFrame::new(data, width, height)
}

/// Horizontal gray gradient still for exposure testing
pub fn gradient_still(width: u32, height: u32) -> StillFrame {
    let mut data = vec![0u8; (width * height * 3) as usize];
    for y in 0..height {
        for x in 0..width {
            let intensity = (x * 255 / width.max(1)) as u8;
            let idx = ((y * width + x) * 3) as usize;
            data[idx] = intensity;
            data[idx + 1] = intensity;
            data[idx + 2] = intensity;
        }
    }
    StillFrame::new(data, width, height)
}
