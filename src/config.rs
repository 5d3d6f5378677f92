// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::PhotoQuality;
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    /// All themes in settings dropdown order
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }

    /// Position in [`AppTheme::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::System => 0,
            Self::Dark => 1,
            Self::Light => 2,
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Mirror the selfie preview horizontally
    pub mirror_preview: bool,
    /// Leave the capture session running after selfie mode exits
    pub keep_camera_warm: bool,
    /// JPEG quality for captured selfies
    pub photo_quality: PhotoQuality,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            mirror_preview: true, // Selfies read naturally when mirrored
            keep_camera_warm: false,
            photo_quality: PhotoQuality::default(),
        }
    }
}
