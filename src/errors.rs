use thiserror::Error;

/// Error taxonomy for the capture quality pipeline
///
/// No variant is fatal: live-path failures are swallowed by the command
/// layer (previous indicator state is retained) and capture-path failures
/// are reported to the shell after the live feed has been resumed.
#[derive(Debug, Clone, Error)]
pub enum FingerCapError {
    /// Malformed or zero-sized frame/still payload
    #[error("Invalid input: {0}")]
    InputError(String),

    /// Runtime failure during live per-frame analysis
    #[error("Detection failure: {0}")]
    DetectionFailure(String),

    /// Failure anywhere in the capture scoring pipeline
    #[error("Capture failure: {0}")]
    CaptureFailure(String),

    /// Invalid or unloadable configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
