//! Core types for finger capture quality scoring
//!
//! Frame payloads delivered by the shell, crop geometry, and the
//! result types returned to the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single-channel luminance frame from the live preview feed
///
/// The luma plane is row-major with `stride` bytes per row; `stride`
/// may exceed `width` for padded camera buffers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumaFrame {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    pub data: Vec<u8>,
    pub timestamp: DateTime<Utc>,
}

impl LumaFrame {
    /// Create a new luma frame from a raw plane
    pub fn new(data: Vec<u8>, width: u32, height: u32, stride: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            width,
            height,
            stride,
            data,
            timestamp: Utc::now(),
        }
    }

    /// Create a frame with stride equal to width (tightly packed)
    pub fn packed(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self::new(data, width, height, width)
    }

    /// Check if frame geometry and buffer length are coherent
    pub fn is_valid(&self) -> bool {
        if self.width == 0 || self.height == 0 || self.stride < self.width {
            return false;
        }
        let required = self.stride as usize * (self.height as usize - 1) + self.width as usize;
        self.data.len() >= required
    }
}

/// Full-resolution RGB still delivered by the shell on capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StillFrame {
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// Interleaved RGB8 raster, `width * height * 3` bytes
    pub data: Vec<u8>,
    pub timestamp: DateTime<Utc>,
}

impl StillFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            width,
            height,
            data,
            timestamp: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() == self.width as usize * self.height as usize * 3
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }
}

/// Axis-aligned crop rectangle, clamped to the owning frame
///
/// Zero-area rectangles are valid and represent an empty crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Placement hint shown by the shell under the live preview
///
/// Serializes as the display string the shell renders verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementHint {
    #[serde(rename = "Adjust Finger")]
    AdjustFinger,
    #[serde(rename = "Improve Lighting")]
    ImproveLighting,
    #[serde(rename = "Perfect! Tap to Capture")]
    ReadyToCapture,
}

impl PlacementHint {
    /// Derive the hint from the two live indicators
    pub fn from_indicators(position_ok: bool, light_ok: bool) -> Self {
        if !position_ok {
            PlacementHint::AdjustFinger
        } else if !light_ok {
            PlacementHint::ImproveLighting
        } else {
            PlacementHint::ReadyToCapture
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementHint::AdjustFinger => "Adjust Finger",
            PlacementHint::ImproveLighting => "Improve Lighting",
            PlacementHint::ReadyToCapture => "Perfect! Tap to Capture",
        }
    }
}

/// Indicator state recomputed on every analyzed live frame
///
/// Superseded on each update; the command layer retains the most
/// recent value so dropped or failed frames never blank the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveIndicatorState {
    pub position_ok: bool,
    pub light_ok: bool,
    pub hint: PlacementHint,
}

impl LiveIndicatorState {
    pub fn new(position_ok: bool, light_ok: bool) -> Self {
        Self {
            position_ok,
            light_ok,
            hint: PlacementHint::from_indicators(position_ok, light_ok),
        }
    }
}

impl Default for LiveIndicatorState {
    fn default() -> Self {
        Self::new(false, true)
    }
}

/// One row of the post-capture quality report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityItem {
    pub title: String,
    pub status: String,
    pub passed: bool,
    pub formatted_score: String,
}

/// Post-capture quality report returned to the shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Weighted score, 0-100
    pub overall_score: u8,
    pub overall_passed: bool,
    /// Per-metric items in stable order: focus, illumination, coverage
    pub items: Vec<QualityItem>,
    /// JPEG-encoded crop for preview display
    pub preview_jpeg: Vec<u8>,
    pub timestamp: DateTime<Utc>,
}
