//! Mean-luminance illumination estimation
//!
//! Illumination is a gating metric: a mean outside the acceptance band
//! fails the capture regardless of the numeric score.

use image::GrayImage;

/// Mean-luminance analyzer over the resized grayscale crop
#[derive(Debug, Clone)]
pub struct IlluminationAnalyzer {
    gate_min: f64,
    gate_max: f64,
}

impl IlluminationAnalyzer {
    pub fn new(gate_min: f64, gate_max: f64) -> Self {
        Self { gate_min, gate_max }
    }

    /// Arithmetic mean of the luminance channel over every pixel
    pub fn score(&self, gray: &GrayImage) -> f64 {
        let data = gray.as_raw();
        if data.is_empty() {
            return 0.0;
        }
        let sum: u64 = data.iter().map(|&v| v as u64).sum();
        sum as f64 / data.len() as f64
    }

    /// Gating band check, exclusive on both ends
    pub fn is_acceptable(&self, mean: f64) -> bool {
        mean > self.gate_min && mean < self.gate_max
    }
}
