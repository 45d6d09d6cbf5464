//! Rule-based skin coverage estimation
//!
//! Classifies sub-sampled pixels of the resized color crop with a fixed
//! RGB inequality rule and reports the skin fraction as a percentage.
//! Coverage is a gating metric (subject to the aggregator's acceptance
//! policy).

use crate::config::ScoringConfig;
use image::RgbImage;

/// Circle-sampled skin percentage analyzer
#[derive(Debug, Clone)]
pub struct SkinCoverageAnalyzer {
    radius_ratio: f64,
    sample_stride: u32,
    r_min: u8,
    g_min: u8,
    b_min: u8,
    rg_margin: u8,
    rb_margin: u8,
}

impl SkinCoverageAnalyzer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            radius_ratio: config.skin_radius_ratio,
            sample_stride: config.skin_sample_stride,
            r_min: config.skin_r_min,
            g_min: config.skin_g_min,
            b_min: config.skin_b_min,
            rg_margin: config.skin_rg_margin,
            rb_margin: config.skin_rb_margin,
        }
    }

    /// Skin percentage over a stride-sampled centered circle
    ///
    /// Returns `100 * skin / sampled`; zero sampled points yield 0.
    pub fn score(&self, color: &RgbImage) -> f64 {
        let width = color.width() as i64;
        let height = color.height() as i64;
        let cx = width / 2;
        let cy = height / 2;
        let radius = (width as f64 * self.radius_ratio).floor() as i64;
        let radius_sq = radius * radius;
        let stride = self.sample_stride.max(1) as i64;

        let mut total = 0u32;
        let mut skin = 0u32;

        let mut dy = -radius;
        while dy <= radius {
            let mut dx = -radius;
            while dx <= radius {
                if dx * dx + dy * dy <= radius_sq {
                    let x = cx + dx;
                    let y = cy + dy;
                    if x >= 0 && y >= 0 && x < width && y < height {
                        let p = color.get_pixel(x as u32, y as u32);
                        total += 1;
                        if self.is_skin(p[0], p[1], p[2]) {
                            skin += 1;
                        }
                    }
                }
                dx += stride;
            }
            dy += stride;
        }

        if total == 0 {
            return 0.0;
        }
        100.0 * skin as f64 / total as f64
    }

    /// Fixed channel-inequality skin rule
    fn is_skin(&self, r: u8, g: u8, b: u8) -> bool {
        r > self.r_min
            && g > self.g_min
            && b > self.b_min
            && r > g
            && r > b
            && r.saturating_sub(g) > self.rg_margin
            && r.saturating_sub(b) > self.rb_margin
    }
}
