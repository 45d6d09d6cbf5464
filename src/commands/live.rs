use crate::commands::config::current_config;
use crate::detection::{DetectorState, PlacementDetector};
use crate::types::{LiveIndicatorState, LumaFrame};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tauri::command;

// Single-slot mailbox for the live feed: one shared state, no queue.
lazy_static::lazy_static! {
    static ref DETECTOR_STATE: Arc<Mutex<DetectorState>> = Arc::new(Mutex::new(DetectorState::new()));
}

/// Analyze one live preview frame, subject to drop-on-overload delivery
///
/// Frames arriving while a detection is in flight, within the cooldown
/// window, or while the feed is suspended for a capture are dropped and
/// the retained indicator state is returned unchanged.
#[command]
pub async fn process_live_frame(frame: LumaFrame) -> Result<LiveIndicatorState, String> {
    let detection_config = current_config().detection;
    let cooldown = Duration::from_millis(detection_config.cooldown_ms);

    {
        let mut state = DETECTOR_STATE.lock().map_err(|e| e.to_string())?;
        if !state.should_process(Instant::now(), cooldown) {
            log::debug!("Live frame {} dropped", frame.id);
            return Ok(state.last());
        }
        state.begin();
    }

    let detector = PlacementDetector::new(detection_config);
    let result = detector.detect(&frame);

    let mut state = DETECTOR_STATE.lock().map_err(|e| e.to_string())?;
    match result {
        Ok(placement) => {
            let indicators = LiveIndicatorState::new(placement.position_ok, placement.light_ok);
            state.complete(indicators, Instant::now());
            log::debug!(
                "Live frame {} analyzed: position_ok={}, light_ok={}",
                frame.id,
                indicators.position_ok,
                indicators.light_ok
            );
            Ok(indicators)
        }
        Err(e) => {
            // Soft failure: keep the previous indicators to avoid flicker
            log::warn!("Live detection failed, retaining indicators: {}", e);
            state.fail();
            Ok(state.last())
        }
    }
}

/// Get the most recent indicator state without analyzing a frame
#[command]
pub async fn get_live_indicator() -> Result<LiveIndicatorState, String> {
    let state = DETECTOR_STATE.lock().map_err(|e| e.to_string())?;
    Ok(state.last())
}

/// Stop analyzing live frames (called by the shell before a capture)
#[command]
pub async fn suspend_live_detection() -> Result<(), String> {
    suspend_feed();
    log::info!("Live detection suspended");
    Ok(())
}

/// Resume analyzing live frames
#[command]
pub async fn resume_live_detection() -> Result<(), String> {
    resume_feed();
    log::info!("Live detection resumed");
    Ok(())
}

/// Clear detector state, returning indicators to their defaults
#[command]
pub async fn reset_detector() -> Result<(), String> {
    let mut state = DETECTOR_STATE.lock().map_err(|e| e.to_string())?;
    state.reset();
    log::info!("Detector state reset");
    Ok(())
}

/// Suspend the feed; recovers a poisoned lock so suspension always lands
pub(crate) fn suspend_feed() {
    let mut state = DETECTOR_STATE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    state.suspend();
}

/// Resume the feed; recovers a poisoned lock so the system always
/// returns to live feedback
pub(crate) fn resume_feed() {
    let mut state = DETECTOR_STATE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    state.resume();
}

/// Position indicator retained from the most recent live detection
pub(crate) fn last_position_ok() -> bool {
    DETECTOR_STATE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .last()
        .position_ok
}
