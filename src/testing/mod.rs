//! Testing utilities for fingercap
//!
//! Provides synthetic frame data for offline testing without a camera
//! or a shell delivering real buffers.

pub mod synthetic_data;

pub use synthetic_data::{
    checkerboard_still,
    gradient_still,
    skin_still,
    solid_luma_frame,
    solid_still,
};
