//! Brightness-ratio placement test over the live luma plane

use crate::config::DetectionConfig;
use crate::errors::FingerCapError;
use crate::sampler;
use crate::types::LumaFrame;

/// Raw detector output before hint derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementResult {
    pub position_ok: bool,
    pub light_ok: bool,
}

/// Per-frame placement detector
///
/// Pure function of the input frame; all cross-frame state lives in
/// [`super::DetectorState`].
#[derive(Debug, Clone)]
pub struct PlacementDetector {
    config: DetectionConfig,
}

impl PlacementDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Run the placement and lighting checks on one live frame
    ///
    /// A zero-area frame is a defined negative result, not an error; a
    /// frame whose buffer is shorter than its geometry implies is an
    /// `InputError`.
    pub fn detect(&self, frame: &LumaFrame) -> Result<PlacementResult, FingerCapError> {
        if frame.width == 0 || frame.height == 0 {
            log::debug!("Zero-area live frame, position check negative");
            return Ok(PlacementResult {
                position_ok: false,
                light_ok: self.light_check(frame),
            });
        }

        if !frame.is_valid() {
            return Err(FingerCapError::InputError(format!(
                "Luma buffer too short: {} bytes for {}x{} stride {}",
                frame.data.len(),
                frame.width,
                frame.height,
                frame.stride
            )));
        }

        Ok(PlacementResult {
            position_ok: self.position_check(frame),
            light_ok: self.light_check(frame),
        })
    }

    /// Circular in-range luminance ratio around the frame center
    fn position_check(&self, frame: &LumaFrame) -> bool {
        let cx = frame.width as i64 / 2;
        let cy = frame.height as i64 / 2;
        let radius = (frame.width as f64 * self.config.radius_ratio).floor() as i64;
        let radius_sq = radius * radius;
        let stride = self.config.sample_stride.max(1) as i64;

        let mut total = 0u32;
        let mut in_range = 0u32;

        let mut dy = -radius;
        while dy <= radius {
            let mut dx = -radius;
            while dx <= radius {
                if dx * dx + dy * dy <= radius_sq {
                    let x = cx + dx;
                    let y = cy + dy;
                    // Out-of-frame points are skipped, not counted
                    if x >= 0 && y >= 0 {
                        if let Some(luma) = sampler::luma_at(frame, x as u32, y as u32) {
                            total += 1;
                            if luma > self.config.luma_min && luma < self.config.luma_max {
                                in_range += 1;
                            }
                        }
                    }
                }
                dx += stride;
            }
            dy += stride;
        }

        if total == 0 {
            return false;
        }
        in_range as f64 / total as f64 > self.config.min_in_range_ratio
    }

    /// Whole-plane mean luminance band check
    fn light_check(&self, frame: &LumaFrame) -> bool {
        match sampler::subsampled_mean(&frame.data, self.config.light_sample_step) {
            Some(mean) => mean > self.config.light_min && mean < self.config.light_max,
            None => true,
        }
    }
}
