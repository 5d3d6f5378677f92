// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles the photo folder and settings.

use crate::app::state::{AppModel, Message, UiMode};
use crate::config::{AppTheme, Config};
use crate::constants::PhotoQuality;
use crate::storage::DirectoryLibrary;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info};

impl AppModel {
    // =========================================================================
    // Photo Folder
    // =========================================================================

    pub(crate) fn handle_open_photo_folder(&self) -> Task<cosmic::Action<Message>> {
        let photo_dir = DirectoryLibrary::default_dir();
        if let Err(e) = std::fs::create_dir_all(&photo_dir) {
            error!(error = %e, path = %photo_dir.display(), "Failed to create photo directory");
            return Task::none();
        }

        info!(path = %photo_dir.display(), "Opening photo folder");
        if let Err(e) = open::that_detached(&photo_dir) {
            error!(error = %e, path = %photo_dir.display(), "Failed to open photo folder");
        }
        Task::none()
    }

    // =========================================================================
    // Settings Handlers
    // =========================================================================

    fn save_config(&self, setting: &str) {
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, setting, "Failed to save setting");
        }
    }

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        let theme_changed = config.app_theme != self.config.app_theme;
        self.config = config;

        if theme_changed {
            cosmic::command::set_theme(self.config.app_theme.theme())
        } else {
            Task::none()
        }
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(&app_theme) = AppTheme::ALL.get(index) else {
            return Task::none();
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.save_config("app_theme");

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_toggle_mirror_preview(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.mirror_preview = !self.config.mirror_preview;
        info!(enabled = self.config.mirror_preview, "Mirror preview toggled");
        self.save_config("mirror_preview");
        Task::none()
    }

    pub(crate) fn handle_toggle_keep_camera_warm(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.keep_camera_warm = !self.config.keep_camera_warm;
        info!(enabled = self.config.keep_camera_warm, "Keep camera warm toggled");
        self.save_config("keep_camera_warm");

        // A session left warm outside selfie mode has no reason to keep running
        if !self.config.keep_camera_warm && self.mode != UiMode::Selfie {
            // Not waited on; nothing in the UI depends on the stop finishing
            drop(self.session.stop());
        }
        Task::none()
    }

    pub(crate) fn handle_select_photo_quality(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        let Some(quality) = PhotoQuality::from_index(index) else {
            return Task::none();
        };

        info!(?quality, "Photo quality selected");
        self.config.photo_quality = quality;
        self.save_config("photo_quality");
        Task::none()
    }
}
