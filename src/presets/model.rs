// SPDX-License-Identifier: GPL-3.0-only

//! Preset data model

use crate::constants::panel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Live color of the fill panel
///
/// Channels are normalized reals, conventionally 0.0-1.0. They are not
/// validated; the renderer clamps when converting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl FillColor {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Convert to an iced color for rendering
    pub fn to_color(self) -> cosmic::iced::Color {
        cosmic::iced::Color::from_rgba(
            self.red.clamp(0.0, 1.0) as f32,
            self.green.clamp(0.0, 1.0) as f32,
            self.blue.clamp(0.0, 1.0) as f32,
            self.alpha.clamp(0.0, 1.0) as f32,
        )
    }
}

impl Default for FillColor {
    fn default() -> Self {
        Self::new(
            panel::DEFAULT_CHANNEL,
            panel::DEFAULT_CHANNEL,
            panel::DEFAULT_CHANNEL,
            panel::DEFAULT_CHANNEL,
        )
    }
}

/// A saved color and screen brightness
///
/// The identifier is assigned once at creation and never changes. Records
/// stored without an identifier get a fresh one when decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPreset {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
    pub brightness: f64,
}

impl ColorPreset {
    /// Capture the live panel state as a new preset
    pub fn new(color: FillColor, brightness: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            red: color.red,
            green: color.green,
            blue: color.blue,
            alpha: color.alpha,
            brightness,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn color(&self) -> FillColor {
        FillColor::new(self.red, self.green, self.blue, self.alpha)
    }

    /// The color and brightness this preset restores
    ///
    /// Pure projection; applying the same preset twice yields the same state.
    pub fn apply(&self) -> (FillColor, f64) {
        (self.color(), self.brightness)
    }
}
