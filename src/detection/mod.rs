//! Live placement detection
//!
//! Runs a cheap sub-sampled brightness test per preview frame to drive
//! the shell's position and lighting indicators, with single-slot
//! drop-on-overload delivery semantics owned by [`DetectorState`].

pub mod placement;
pub mod state;

pub use placement::{PlacementDetector, PlacementResult};
pub use state::DetectorState;
