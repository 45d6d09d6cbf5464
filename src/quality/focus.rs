//! Laplacian sharpness estimation
//!
//! Focus is advisory: it shapes the numeric score and the status string
//! but never gates the overall pass/fail decision.

use image::GrayImage;

/// Laplacian-based focus analyzer over the resized grayscale crop
#[derive(Debug, Clone)]
pub struct FocusAnalyzer {
    threshold: f64,
}

impl FocusAnalyzer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Mean absolute discrete Laplacian over interior pixels
    ///
    /// Images without an interior (either dimension < 3) score 0.
    pub fn score(&self, gray: &GrayImage) -> f64 {
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        if width < 3 || height < 3 {
            return 0.0;
        }

        let data = gray.as_raw();
        let mut sum = 0.0f64;
        let mut count = 0u64;

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let center = data[y * width + x] as f64;
                let top = data[(y - 1) * width + x] as f64;
                let bottom = data[(y + 1) * width + x] as f64;
                let left = data[y * width + x - 1] as f64;
                let right = data[y * width + x + 1] as f64;

                sum += (4.0 * center - (top + bottom + left + right)).abs();
                count += 1;
            }
        }

        sum / count as f64
    }

    /// Advisory sharpness check feeding the status string only
    pub fn is_acceptable(&self, score: f64) -> bool {
        score > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> FocusAnalyzer {
        FocusAnalyzer::new(12.0)
    }

    fn uniform(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, image::Luma([value]))
    }

    #[test]
    fn test_uniform_image_scores_zero() {
        assert_eq!(analyzer().score(&uniform(100, 100, 128)), 0.0);
        assert_eq!(analyzer().score(&uniform(100, 100, 0)), 0.0);
        assert_eq!(analyzer().score(&uniform(100, 100, 255)), 0.0);
    }

    #[test]
    fn test_checkerboard_scores_high() {
        let img = GrayImage::from_fn(64, 64, |x, y| {
            if (x + y) % 2 == 0 {
                image::Luma([255])
            } else {
                image::Luma([0])
            }
        });
        let score = analyzer().score(&img);
        // Every interior pixel alternates against all four neighbors
        assert_eq!(score, 4.0 * 255.0);
        assert!(analyzer().is_acceptable(score));
    }

    #[test]
    fn test_single_edge() {
        // Vertical step edge: only the two columns beside it respond
        let img = GrayImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                image::Luma([0])
            } else {
                image::Luma([200])
            }
        });
        let score = analyzer().score(&img);
        assert!(score > 0.0);
        assert!(score < 4.0 * 255.0);
    }

    #[test]
    fn test_no_interior_scores_zero() {
        assert_eq!(analyzer().score(&uniform(2, 10, 128)), 0.0);
        assert_eq!(analyzer().score(&uniform(10, 2, 128)), 0.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let analyzer = analyzer();
        assert!(!analyzer.is_acceptable(12.0));
        assert!(analyzer.is_acceptable(12.1));
    }
}
