// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher, while specific handlers are implemented
//! in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::ui`: context drawer, URLs, mode switching
//! - `handlers::panel`: color channel and brightness sliders
//! - `handlers::presets`: save, apply and remove presets
//! - `handlers::selfie`: capture session lifecycle, preview frames, photo capture
//! - `handlers::system`: settings and the photo folder

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::SetMode(mode) => self.handle_set_mode(mode),

            // ===== Panel =====
            Message::SetRed(value) => self.handle_set_red(value),
            Message::SetGreen(value) => self.handle_set_green(value),
            Message::SetBlue(value) => self.handle_set_blue(value),
            Message::SetAlpha(value) => self.handle_set_alpha(value),
            Message::SetBrightness(value) => self.handle_set_brightness(value),
            Message::CommitBrightness => self.handle_commit_brightness(),

            // ===== Presets =====
            Message::SavePreset => self.handle_save_preset(),
            Message::ApplyPreset(id) => self.handle_apply_preset(id),
            Message::RemovePreset(id) => self.handle_remove_preset(id),

            // ===== Selfie =====
            Message::Capture => self.handle_capture(),
            Message::PhotoSaved(path) => self.handle_photo_saved(path),
            Message::PreviewAttached(sender) => self.handle_preview_attached(sender),
            Message::PreviewFrame(frame) => self.handle_preview_frame(frame),
            Message::SessionSettled => self.handle_session_settled(),

            // ===== System & Settings =====
            Message::OpenPhotoFolder => self.handle_open_photo_folder(),
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::ToggleMirrorPreview => self.handle_toggle_mirror_preview(),
            Message::ToggleKeepCameraWarm => self.handle_toggle_keep_camera_warm(),
            Message::SelectPhotoQuality(index) => self.handle_select_photo_quality(index),

            Message::Noop => Task::none(),
        }
    }
}
