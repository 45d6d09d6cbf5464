//! FingerCap: finger capture quality scoring for Tauri applications
//!
//! This crate provides the deterministic image-quality core behind a
//! finger capture flow: live placement feedback over preview frames and
//! an objective accept/reject score for captured stills.
//!
//! # Features
//! - Live placement detection with drop-on-overload delivery
//! - Center crop, bounded resize, and grayscale preprocessing
//! - Laplacian focus, mean-illumination, and skin-coverage analyzers
//! - Weighted 0-100 scoring with a documented acceptance policy
//! - Configurable thresholds persisted as TOML
//!
//! # Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! fingercap = "0.3"
//! tauri = { version = "2.0", features = ["protocol-asset"] }
//! ```
//!
//! Then in your Tauri app:
//! ```rust,ignore
//! use fingercap;
//!
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(fingercap::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
pub mod commands;
pub mod config;
pub mod detection;
pub mod errors;
pub mod quality;
pub mod sampler;
pub mod types;

// Testing utilities - synthetic data for offline testing
pub mod testing;

// Re-exports for convenience
pub use config::FingerCapConfig;
pub use detection::{DetectorState, PlacementDetector};
pub use errors::FingerCapError;
pub use quality::{CaptureScorer, ScoreAggregator};
pub use types::{
    CropRect, LiveIndicatorState, LumaFrame, PlacementHint, QualityItem, QualityReport,
    StillFrame,
};

use tauri::{
    plugin::{Builder, TauriPlugin},
    Runtime,
};

/// Initialize the FingerCap plugin with all commands
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("fingercap")
        .invoke_handler(tauri::generate_handler![
            // Live detection commands
            commands::live::process_live_frame,
            commands::live::get_live_indicator,
            commands::live::suspend_live_detection,
            commands::live::resume_live_detection,
            commands::live::reset_detector,
            // Capture scoring commands
            commands::capture::score_still_capture,
            commands::capture::score_best_still,
            // Configuration commands
            commands::config::get_config,
            commands::config::update_config,
            commands::config::reset_config,
            commands::config::get_detection_config,
            commands::config::get_scoring_config,
            commands::config::update_detection_config,
            commands::config::update_scoring_config,
        ])
        .build()
}

/// Initialize logging for the capture quality system
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "fingercap=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}
