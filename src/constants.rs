// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};

/// Scalar storage key holding the encoded preset collection
pub const PRESETS_KEY: &str = "ColorPresets";

/// Directory name used under the data and pictures directories
pub const APP_DIR_NAME: &str = "fill-light";

/// JPEG quality presets for captured selfies
///
/// Ordered from smallest files to best quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhotoQuality {
    /// High compression
    Low,
    /// Balanced
    Medium,
    /// Low compression (default)
    #[default]
    High,
    /// Minimal compression
    Maximum,
}

impl PhotoQuality {
    /// All presets for UI iteration
    pub const ALL: [PhotoQuality; 4] = [
        PhotoQuality::Low,
        PhotoQuality::Medium,
        PhotoQuality::High,
        PhotoQuality::Maximum,
    ];

    /// JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            PhotoQuality::Low => 60,
            PhotoQuality::Medium => 80,
            PhotoQuality::High => 92,
            PhotoQuality::Maximum => 98,
        }
    }

    /// Position in [`PhotoQuality::ALL`], used by the settings dropdown
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|q| q == self).unwrap_or(2)
    }

    /// Preset at a dropdown index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Color panel defaults and ranges
pub mod panel {
    /// Initial channel value (opaque white)
    pub const DEFAULT_CHANNEL: f64 = 1.0;
    /// Screen brightness assumed when no backlight can be read
    pub const DEFAULT_BRIGHTNESS: f64 = 1.0;
    /// Lower slider bound for every channel
    pub const SLIDER_MIN: f32 = 0.0;
    /// Upper slider bound for every channel
    pub const SLIDER_MAX: f32 = 1.0;
    /// Slider step
    pub const SLIDER_STEP: f32 = 0.01;
}

/// UI sizing
pub mod ui {
    /// Preset swatch diameter
    pub const SWATCH_SIZE: f32 = 50.0;
    /// Gap between swatches in the preset bar
    pub const SWATCH_SPACING: u16 = 15;
    /// Width of the channel label column
    pub const LABEL_WIDTH: f32 = 120.0;
    /// Width of the numeric value column
    pub const VALUE_WIDTH: f32 = 50.0;
    /// Control panel maximum width
    pub const PANEL_MAX_WIDTH: f32 = 560.0;
    /// Capture button outer size
    pub const CAPTURE_BUTTON_OUTER: f32 = 72.0;
    /// Capture button inner size
    pub const CAPTURE_BUTTON_INNER: f32 = 58.0;
    /// Capture button corner radius
    pub const CAPTURE_BUTTON_RADIUS: f32 = 29.0;
    /// Opacity of the translucent panels drawn over the fill color
    pub const PANEL_OPACITY: f32 = 0.5;
    /// Opacity of the preset bar background
    pub const PRESET_BAR_OPACITY: f32 = 0.3;
    /// Corner radius of the overlay panels
    pub const PANEL_RADIUS: f32 = 15.0;
}

/// Capture pipeline tuning
pub mod pipeline {
    /// Maximum appsink buffers
    pub const MAX_BUFFERS: u32 = 2;
    /// Capacity of the preview frame channel
    pub const PREVIEW_CHANNEL_CAPACITY: usize = 4;
}

/// Timeouts and intervals
pub mod timing {
    use std::time::Duration;

    /// Seconds to wait for the pipeline to reach PLAYING
    pub const START_TIMEOUT_SECS: u64 = 5;
    /// Seconds to wait for the pipeline to reach NULL
    pub const STOP_TIMEOUT_SECS: u64 = 2;
    /// How long a capture request waits for a fresh frame
    pub const CAPTURE_TIMEOUT: Duration = Duration::from_secs(3);
    /// Poll interval while waiting for a fresh frame
    pub const CAPTURE_POLL_INTERVAL: Duration = Duration::from_millis(10);
    /// Log frame statistics every N frames
    pub const FRAME_LOG_INTERVAL: u64 = 120;
}
