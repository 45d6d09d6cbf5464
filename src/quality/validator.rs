//! Score aggregation and acceptance policy
//!
//! Combines the three analyzer outputs into a weighted 0-100 score and
//! a pass/fail decision, and assembles the per-metric report items.

use crate::config::{FingerCapConfig, ScoringConfig};
use crate::errors::FingerCapError;
use crate::quality::{
    preprocess, FocusAnalyzer, IlluminationAnalyzer, SkinCoverageAnalyzer,
};
use crate::types::{QualityItem, QualityReport, StillFrame};
use std::io::Cursor;

/// Aggregated decision for one capture attempt
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AggregateResult {
    pub overall_score: u8,
    pub overall_passed: bool,
    pub focus_part: f64,
    pub illum_part: f64,
    pub coverage_part: f64,
    pub focus_acceptable: bool,
    pub illum_passed: bool,
    pub coverage_passed: bool,
    /// Coverage after the position-ok correction, used in the score
    pub corrected_coverage: f64,
}

/// Pure scoring policy over `(focus, illumination, coverage, position_ok)`
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    config: ScoringConfig,
}

impl ScoreAggregator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Apply weights, bands, and the coverage acceptance policy
    pub fn aggregate(
        &self,
        focus: f64,
        illumination: f64,
        coverage: f64,
        position_ok: bool,
    ) -> AggregateResult {
        let c = &self.config;

        // Relaxed-acceptance policy: a green position indicator at capture
        // time corrects low coverage upward and forces the coverage gate
        // open. Revisit: position is taken from the live frame, not
        // re-verified against the captured still.
        let (corrected_coverage, coverage_passed) = if position_ok {
            let corrected = if coverage < c.coverage_override_floor {
                c.coverage_override_value
            } else {
                coverage
            };
            (corrected, true)
        } else {
            (coverage, coverage > c.coverage_pass_min)
        };

        let illum_passed = illumination > c.illum_gate_min && illumination < c.illum_gate_max;
        let focus_acceptable = focus > c.focus_threshold;

        let focus_part = (focus / c.focus_scale * c.focus_weight).clamp(0.0, c.focus_weight);

        let illum_part = if illumination >= c.illum_ideal_min && illumination <= c.illum_ideal_max
        {
            c.illum_weight_ideal
        } else if illumination >= c.illum_ok_min && illumination <= c.illum_ok_max {
            c.illum_weight_ok
        } else {
            c.illum_weight_poor
        };

        let coverage_part =
            (corrected_coverage / 100.0 * c.coverage_weight).clamp(0.0, c.coverage_weight);

        let overall_score = (focus_part + illum_part + coverage_part)
            .round()
            .clamp(0.0, 100.0) as u8;

        AggregateResult {
            overall_score,
            // Focus is advisory and excluded from the gate
            overall_passed: illum_passed && coverage_passed,
            focus_part,
            illum_part,
            coverage_part,
            focus_acceptable,
            illum_passed,
            coverage_passed,
            corrected_coverage,
        }
    }

    /// Build the per-metric report items in stable order
    pub fn build_items(
        &self,
        focus: f64,
        illumination: f64,
        coverage: f64,
        result: &AggregateResult,
    ) -> Vec<QualityItem> {
        let focus_status = if result.focus_acceptable {
            "Good"
        } else {
            "Slight Blur (OK)"
        };
        let illum_status = if result.illum_passed { "Good" } else { "Poor" };
        let coverage_status = if result.coverage_passed { "Good" } else { "Low" };

        vec![
            QualityItem {
                title: "Focus".to_string(),
                status: focus_status.to_string(),
                // Focus never fails its item; the status string carries
                // the advisory blur note
                passed: true,
                formatted_score: format!("{:.1}", focus),
            },
            QualityItem {
                title: "Illumination".to_string(),
                status: illum_status.to_string(),
                passed: result.illum_passed,
                formatted_score: format!("{:.1}", illumination),
            },
            QualityItem {
                title: "Skin Coverage".to_string(),
                status: coverage_status.to_string(),
                passed: result.coverage_passed,
                formatted_score: format!("{:.1}%", coverage),
            },
        ]
    }
}

/// Full capture scoring pipeline: preprocess, analyze, aggregate, encode
#[derive(Debug, Clone)]
pub struct CaptureScorer {
    config: FingerCapConfig,
}

impl CaptureScorer {
    pub fn new(config: FingerCapConfig) -> Self {
        Self { config }
    }

    /// Score a decoded still against the configured thresholds
    ///
    /// `position_ok` is the live position indicator captured at shutter
    /// time; it feeds the coverage acceptance policy.
    pub fn score_still(
        &self,
        still: &StillFrame,
        position_ok: bool,
    ) -> Result<QualityReport, FingerCapError> {
        let prepared = preprocess::prepare(still, &self.config.crop)?;

        let focus_analyzer = FocusAnalyzer::new(self.config.scoring.focus_threshold);
        let illum_analyzer = IlluminationAnalyzer::new(
            self.config.scoring.illum_gate_min,
            self.config.scoring.illum_gate_max,
        );
        let skin_analyzer = SkinCoverageAnalyzer::new(&self.config.scoring);

        let focus = focus_analyzer.score(&prepared.gray);
        let illumination = illum_analyzer.score(&prepared.gray);
        let coverage = skin_analyzer.score(&prepared.color);

        let aggregator = ScoreAggregator::new(self.config.scoring.clone());
        let result = aggregator.aggregate(focus, illumination, coverage, position_ok);
        let items = aggregator.build_items(focus, illumination, coverage, &result);

        let preview_jpeg = encode_preview(&prepared.color, self.config.preview.jpeg_quality)?;

        log::info!(
            "Capture scored: {} ({}), focus={:.1} illum={:.1} coverage={:.1}%",
            result.overall_score,
            if result.overall_passed { "pass" } else { "fail" },
            focus,
            illumination,
            coverage
        );

        Ok(QualityReport {
            overall_score: result.overall_score,
            overall_passed: result.overall_passed,
            items,
            preview_jpeg,
            timestamp: chrono::Utc::now(),
        })
    }
}

/// JPEG-encode the cropped preview for the shell
fn encode_preview(color: &image::RgbImage, quality: u8) -> Result<Vec<u8>, FingerCapError> {
    let mut bytes = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality);
    image::DynamicImage::ImageRgb8(color.clone())
        .write_with_encoder(encoder)
        .map_err(|e| FingerCapError::CaptureFailure(format!("Failed to encode preview: {}", e)))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FingerCapConfig;

    fn aggregator() -> ScoreAggregator {
        ScoreAggregator::new(FingerCapConfig::default().scoring)
    }

    #[test]
    fn test_good_capture_scenario() {
        let result = aggregator().aggregate(40.0, 130.0, 50.0, true);
        assert_eq!(result.focus_part, 35.0);
        assert_eq!(result.illum_part, 35.0);
        assert_eq!(result.coverage_part, 15.0);
        assert_eq!(result.overall_score, 85);
        assert!(result.overall_passed);
    }

    #[test]
    fn test_overexposed_capture_fails_gate() {
        let result = aggregator().aggregate(40.0, 230.0, 50.0, false);
        assert_eq!(result.illum_part, 10.0);
        assert!(!result.illum_passed);
        assert!(!result.overall_passed);
        assert!(result.coverage_passed);
    }

    #[test]
    fn test_coverage_override_corrects_low_coverage() {
        let result = aggregator().aggregate(20.0, 130.0, 10.0, true);
        assert!(result.coverage_passed);
        assert_eq!(result.corrected_coverage, 65.0);
        assert_eq!(result.coverage_part, 19.5);
        assert!(result.overall_passed);
    }

    #[test]
    fn test_coverage_override_keeps_high_coverage() {
        let result = aggregator().aggregate(20.0, 130.0, 80.0, true);
        assert_eq!(result.corrected_coverage, 80.0);
        assert_eq!(result.coverage_part, 24.0);
    }

    #[test]
    fn test_no_override_without_position() {
        let low = aggregator().aggregate(20.0, 130.0, 10.0, false);
        assert!(!low.coverage_passed);
        assert_eq!(low.corrected_coverage, 10.0);

        let enough = aggregator().aggregate(20.0, 130.0, 25.0, false);
        assert!(enough.coverage_passed);
    }

    #[test]
    fn test_coverage_gate_boundary_exclusive() {
        let at = aggregator().aggregate(20.0, 130.0, 20.0, false);
        assert!(!at.coverage_passed);
        let above = aggregator().aggregate(20.0, 130.0, 20.1, false);
        assert!(above.coverage_passed);
    }

    #[test]
    fn test_focus_never_gates() {
        let blurry = aggregator().aggregate(0.0, 130.0, 80.0, false);
        assert!(!blurry.focus_acceptable);
        assert!(blurry.overall_passed);
    }

    #[test]
    fn test_focus_part_clamps() {
        let result = aggregator().aggregate(500.0, 130.0, 50.0, false);
        assert_eq!(result.focus_part, 35.0);

        let result = aggregator().aggregate(10.0, 130.0, 50.0, false);
        assert_eq!(result.focus_part, 10.0);
    }

    #[test]
    fn test_illum_bands() {
        // Inclusive ideal band edges
        assert_eq!(aggregator().aggregate(0.0, 85.0, 50.0, false).illum_part, 35.0);
        assert_eq!(aggregator().aggregate(0.0, 195.0, 50.0, false).illum_part, 35.0);
        // Between ok and ideal
        assert_eq!(aggregator().aggregate(0.0, 75.0, 50.0, false).illum_part, 25.0);
        assert_eq!(aggregator().aggregate(0.0, 210.0, 50.0, false).illum_part, 25.0);
        // The 25-point band is inclusive at 220 while the gate is not
        let edge = aggregator().aggregate(0.0, 220.0, 50.0, false);
        assert_eq!(edge.illum_part, 25.0);
        assert!(!edge.illum_passed);
        // Outside everything
        assert_eq!(aggregator().aggregate(0.0, 230.0, 50.0, false).illum_part, 10.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let a = aggregator().aggregate(23.4, 156.7, 61.2, true);
        let b = aggregator().aggregate(23.4, 156.7, 61.2, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_items_order_and_statuses() {
        let agg = aggregator();
        let result = agg.aggregate(5.0, 130.0, 50.0, false);
        let items = agg.build_items(5.0, 130.0, 50.0, &result);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Focus");
        assert_eq!(items[1].title, "Illumination");
        assert_eq!(items[2].title, "Skin Coverage");

        assert_eq!(items[0].status, "Slight Blur (OK)");
        assert!(items[0].passed);
        assert_eq!(items[1].status, "Good");
        assert_eq!(items[2].status, "Good");
        assert_eq!(items[2].formatted_score, "50.0%");
    }

    #[test]
    fn test_scorer_end_to_end_skin_still() {
        let scorer = CaptureScorer::new(FingerCapConfig::default());
        let mut data = Vec::with_capacity(640 * 480 * 3);
        for _ in 0..640 * 480 {
            data.extend_from_slice(&[200, 130, 100]);
        }
        let still = StillFrame::new(data, 640, 480);

        let report = scorer.score_still(&still, true).unwrap();
        assert!(report.overall_passed);
        assert_eq!(report.items.len(), 3);
        assert!(!report.preview_jpeg.is_empty());
        // JPEG magic bytes
        assert_eq!(&report.preview_jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_scorer_rejects_invalid_still() {
        let scorer = CaptureScorer::new(FingerCapConfig::default());
        let still = StillFrame::new(vec![0u8; 5], 100, 100);
        assert!(scorer.score_still(&still, false).is_err());
    }
}
