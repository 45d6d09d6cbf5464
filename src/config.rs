//! Configuration management for fingercap
//!
//! Every threshold used by the live detector and the capture scoring
//! pipeline lives here as a named value, so the shell and the test suite
//! can override tuning without touching analyzer code.

use crate::errors::FingerCapError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerCapConfig {
    pub detection: DetectionConfig,
    pub crop: CropConfig,
    pub scoring: ScoringConfig,
    pub preview: PreviewConfig,
}

/// Live placement detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Sampling circle radius as a fraction of frame width
    pub radius_ratio: f64,
    /// Grid step between sampled points (pixels)
    pub sample_stride: u32,
    /// Exclusive lower bound for an in-range luminance value
    pub luma_min: u8,
    /// Exclusive upper bound for an in-range luminance value
    pub luma_max: u8,
    /// Minimum in-range fraction for a positive position indicator
    pub min_in_range_ratio: f64,
    /// Linear step between light-check samples over the whole plane
    pub light_sample_step: usize,
    /// Acceptable mean-luminance band for the light indicator (exclusive)
    pub light_min: f64,
    pub light_max: f64,
    /// Minimum gap between completed detections (ms); frames arriving
    /// earlier are dropped, not queued
    pub cooldown_ms: u64,
}

/// Still crop and resize configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropConfig {
    /// Centered crop size as a fraction of still width
    pub size_ratio: f64,
    /// Analyzer resize target width (aspect-preserving, no upscaling)
    pub resize_width: u32,
}

/// Capture scoring weights and thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Advisory focus threshold; feeds the status string, never the gate
    pub focus_threshold: f64,
    /// Divisor normalizing the raw Laplacian mean
    pub focus_scale: f64,
    /// Maximum focus contribution to the overall score
    pub focus_weight: f64,
    /// Ideal illumination band (inclusive) worth the full weight
    pub illum_ideal_min: f64,
    pub illum_ideal_max: f64,
    /// Acceptable illumination band (inclusive) worth the reduced weight
    pub illum_ok_min: f64,
    pub illum_ok_max: f64,
    pub illum_weight_ideal: f64,
    pub illum_weight_ok: f64,
    pub illum_weight_poor: f64,
    /// Gating illumination band (exclusive)
    pub illum_gate_min: f64,
    pub illum_gate_max: f64,
    /// Maximum coverage contribution to the overall score
    pub coverage_weight: f64,
    /// Skin sampling circle radius as a fraction of crop width
    pub skin_radius_ratio: f64,
    /// Grid step between skin samples (pixels)
    pub skin_sample_stride: u32,
    /// Skin classifier channel floors and dominance margins
    pub skin_r_min: u8,
    pub skin_g_min: u8,
    pub skin_b_min: u8,
    pub skin_rg_margin: u8,
    pub skin_rb_margin: u8,
    /// Coverage below this triggers the position-ok correction
    pub coverage_override_floor: f64,
    /// Corrected coverage substituted when the override fires
    pub coverage_override_value: f64,
    /// Gating coverage minimum when position was not ok at capture
    pub coverage_pass_min: f64,
}

/// Preview encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// JPEG quality for the cropped preview (1-100)
    pub jpeg_quality: u8,
}

impl Default for FingerCapConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig {
                radius_ratio: 1.0 / 6.0,
                sample_stride: 2,
                luma_min: 70,
                luma_max: 210,
                min_in_range_ratio: 0.55,
                light_sample_step: 2000,
                light_min: 70.0,
                light_max: 220.0,
                cooldown_ms: 500,
            },
            crop: CropConfig {
                size_ratio: 0.55,
                resize_width: 320,
            },
            scoring: ScoringConfig {
                focus_threshold: 12.0,
                focus_scale: 35.0,
                focus_weight: 35.0,
                illum_ideal_min: 85.0,
                illum_ideal_max: 195.0,
                illum_ok_min: 70.0,
                illum_ok_max: 220.0,
                illum_weight_ideal: 35.0,
                illum_weight_ok: 25.0,
                illum_weight_poor: 10.0,
                illum_gate_min: 70.0,
                illum_gate_max: 220.0,
                coverage_weight: 30.0,
                skin_radius_ratio: 0.45,
                skin_sample_stride: 2,
                skin_r_min: 50,
                skin_g_min: 35,
                skin_b_min: 20,
                skin_rg_margin: 8,
                skin_rb_margin: 15,
                coverage_override_floor: 40.0,
                coverage_override_value: 65.0,
                coverage_pass_min: 20.0,
            },
            preview: PreviewConfig { jpeg_quality: 85 },
        }
    }
}

impl FingerCapConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FingerCapError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            FingerCapError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: FingerCapConfig = toml::from_str(&contents).map_err(|e| {
            FingerCapError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FingerCapError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FingerCapError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            FingerCapError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            FingerCapError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("fingercap.toml")
    }

    /// Load from default location or create with defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        let d = &self.detection;
        if !(0.0..=0.5).contains(&d.radius_ratio) {
            return Err("Detection radius ratio must be between 0.0 and 0.5".to_string());
        }
        if d.sample_stride == 0 {
            return Err("Detection sample stride must be at least 1".to_string());
        }
        if d.luma_min >= d.luma_max {
            return Err("Detection luma band is empty".to_string());
        }
        if !(0.0..=1.0).contains(&d.min_in_range_ratio) {
            return Err("In-range ratio must be between 0.0 and 1.0".to_string());
        }
        if d.light_sample_step == 0 {
            return Err("Light sample step must be at least 1".to_string());
        }
        if d.light_min >= d.light_max {
            return Err("Light band is empty".to_string());
        }

        let c = &self.crop;
        if !(0.0..=1.0).contains(&c.size_ratio) {
            return Err("Crop size ratio must be between 0.0 and 1.0".to_string());
        }
        if c.resize_width == 0 {
            return Err("Resize width must be positive".to_string());
        }

        let s = &self.scoring;
        if s.focus_scale <= 0.0 {
            return Err("Focus scale must be positive".to_string());
        }
        if s.focus_weight < 0.0 || s.coverage_weight < 0.0 {
            return Err("Score weights must be non-negative".to_string());
        }
        if s.illum_ideal_min > s.illum_ideal_max || s.illum_ok_min > s.illum_ok_max {
            return Err("Illumination bands are empty".to_string());
        }
        if s.illum_gate_min >= s.illum_gate_max {
            return Err("Illumination gate band is empty".to_string());
        }
        if !(0.0..=0.5).contains(&s.skin_radius_ratio) {
            return Err("Skin radius ratio must be between 0.0 and 0.5".to_string());
        }
        if s.skin_sample_stride == 0 {
            return Err("Skin sample stride must be at least 1".to_string());
        }
        if !(0.0..=100.0).contains(&s.coverage_override_floor)
            || !(0.0..=100.0).contains(&s.coverage_override_value)
            || !(0.0..=100.0).contains(&s.coverage_pass_min)
        {
            return Err("Coverage thresholds must be between 0 and 100".to_string());
        }

        if self.preview.jpeg_quality == 0 || self.preview.jpeg_quality > 100 {
            return Err("JPEG quality must be between 1 and 100".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FingerCapConfig::default();
        assert_eq!(config.detection.cooldown_ms, 500);
        assert_eq!(config.detection.luma_min, 70);
        assert_eq!(config.detection.luma_max, 210);
        assert_eq!(config.crop.resize_width, 320);
        assert_eq!(config.scoring.coverage_weight, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut bad = FingerCapConfig::default();
        bad.detection.luma_min = 210;
        bad.detection.luma_max = 70;
        assert!(bad.validate().is_err());

        let mut bad_crop = FingerCapConfig::default();
        bad_crop.crop.size_ratio = 1.5;
        assert!(bad_crop.validate().is_err());

        let mut bad_preview = FingerCapConfig::default();
        bad_preview.preview.jpeg_quality = 0;
        assert!(bad_preview.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = std::env::temp_dir();
        let config_path = temp_dir.join("test_fingercap.toml");

        let _ = fs::remove_file(&config_path);

        let config = FingerCapConfig::default();
        assert!(config.save_to_file(&config_path).is_ok());

        let loaded = FingerCapConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.detection.cooldown_ms, config.detection.cooldown_ms);
        assert_eq!(loaded.scoring.focus_scale, config.scoring.focus_scale);

        let _ = fs::remove_file(&config_path);
    }

    #[test]
    fn test_config_toml_format() {
        let config = FingerCapConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[detection]"));
        assert!(toml_string.contains("[crop]"));
        assert!(toml_string.contains("[scoring]"));
        assert!(toml_string.contains("[preview]"));
        assert!(toml_string.contains("cooldown_ms"));
        assert!(toml_string.contains("size_ratio"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = FingerCapConfig::load_from_file("nonexistent_fingercap.toml");
        assert!(result.is_ok());
        assert_eq!(result.unwrap().detection.cooldown_ms, 500);
    }
}
