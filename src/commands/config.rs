use crate::config::{DetectionConfig, FingerCapConfig, ScoringConfig};
use std::sync::{Arc, RwLock};
use tauri::command;

lazy_static::lazy_static! {
    static ref GLOBAL_CONFIG: Arc<RwLock<FingerCapConfig>> = Arc::new(RwLock::new(FingerCapConfig::load_or_default()));
}

/// Snapshot of the active configuration for the other command modules
pub(crate) fn current_config() -> FingerCapConfig {
    match GLOBAL_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(e) => {
            log::error!("Config lock poisoned, using defaults: {}", e);
            FingerCapConfig::default()
        }
    }
}

/// Get the current configuration
#[command]
pub async fn get_config() -> Result<FingerCapConfig, String> {
    let config = GLOBAL_CONFIG.read().map_err(|e| e.to_string())?;
    Ok(config.clone())
}

/// Update configuration
#[command]
pub async fn update_config(new_config: FingerCapConfig) -> Result<(), String> {
    // Validate first
    new_config.validate().map_err(|e| e.to_string())?;

    {
        let mut config = GLOBAL_CONFIG.write().map_err(|e| e.to_string())?;
        *config = new_config.clone();
    }

    // Save to file
    new_config
        .save_to_file(FingerCapConfig::default_path())
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Reset configuration to defaults
#[command]
pub async fn reset_config() -> Result<FingerCapConfig, String> {
    let default_config = FingerCapConfig::default();

    {
        let mut config = GLOBAL_CONFIG
            .write()
            .map_err(|e| format!("Failed to write config: {}", e))?;
        *config = default_config.clone();
    }

    default_config
        .save_to_file(FingerCapConfig::default_path())
        .map_err(|e| e.to_string())?;

    Ok(default_config)
}

/// Get detection configuration
#[command]
pub async fn get_detection_config() -> Result<DetectionConfig, String> {
    let config = GLOBAL_CONFIG.read().map_err(|e| e.to_string())?;
    Ok(config.detection.clone())
}

/// Get scoring configuration
#[command]
pub async fn get_scoring_config() -> Result<ScoringConfig, String> {
    let config = GLOBAL_CONFIG.read().map_err(|e| e.to_string())?;
    Ok(config.scoring.clone())
}

/// Update detection configuration
#[command]
pub async fn update_detection_config(detection_config: DetectionConfig) -> Result<(), String> {
    let mut config = GLOBAL_CONFIG.write().map_err(|e| e.to_string())?;
    config.detection = detection_config;

    config.validate().map_err(|e| e.to_string())?;

    config
        .save_to_file(FingerCapConfig::default_path())
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Update scoring configuration
#[command]
pub async fn update_scoring_config(scoring_config: ScoringConfig) -> Result<(), String> {
    let mut config = GLOBAL_CONFIG.write().map_err(|e| e.to_string())?;
    config.scoring = scoring_config;

    config.validate().map_err(|e| e.to_string())?;

    config
        .save_to_file(FingerCapConfig::default_path())
        .map_err(|e| e.to_string())?;

    Ok(())
}
