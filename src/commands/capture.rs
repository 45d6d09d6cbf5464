use crate::commands::config::current_config;
use crate::commands::live::{last_position_ok, resume_feed, suspend_feed};
use crate::quality::CaptureScorer;
use crate::types::{QualityReport, StillFrame};
use std::time::Instant;
use tauri::command;

/// Score a captured still and return the quality report
///
/// The live feed is suspended for the duration of the pipeline and
/// resumed on every path, success or failure, so the system always
/// returns to live feedback.
#[command]
pub async fn score_still_capture(frame: StillFrame) -> Result<QualityReport, String> {
    log::info!(
        "Scoring still {} ({}x{})",
        frame.id,
        frame.width,
        frame.height
    );

    let start_time = Instant::now();
    let config = current_config();
    let position_ok = last_position_ok();

    suspend_feed();
    let result = CaptureScorer::new(config).score_still(&frame, position_ok);
    resume_feed();

    match result {
        Ok(report) => {
            log::info!(
                "Still {} scored {} in {}ms",
                frame.id,
                report.overall_score,
                start_time.elapsed().as_millis()
            );
            Ok(report)
        }
        Err(e) => {
            log::error!("Failed to score still {}: {}", frame.id, e);
            Err(e.to_string())
        }
    }
}

/// Score several stills and return the best report
///
/// Stills that fail the pipeline are skipped; the call fails only when
/// no still could be scored.
#[command]
pub async fn score_best_still(frames: Vec<StillFrame>) -> Result<QualityReport, String> {
    if frames.is_empty() {
        return Err("No stills provided".to_string());
    }

    log::info!("Scoring best of {} stills", frames.len());

    let config = current_config();
    let position_ok = last_position_ok();
    let scorer = CaptureScorer::new(config);

    suspend_feed();
    let mut best: Option<QualityReport> = None;
    let mut last_error: Option<String> = None;

    for frame in &frames {
        match scorer.score_still(frame, position_ok) {
            Ok(report) => {
                let better = best
                    .as_ref()
                    .map(|b| report.overall_score > b.overall_score)
                    .unwrap_or(true);
                if better {
                    best = Some(report);
                }
            }
            Err(e) => {
                log::warn!("Still {} skipped: {}", frame.id, e);
                last_error = Some(e.to_string());
            }
        }
    }
    resume_feed();

    match best {
        Some(report) => Ok(report),
        None => Err(last_error.unwrap_or_else(|| "No stills could be scored".to_string())),
    }
}
