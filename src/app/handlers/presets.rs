// SPDX-License-Identifier: GPL-3.0-only

//! Preset handlers
//!
//! Persistence failures are logged; the in-memory list stays authoritative.

use crate::app::state::{AppModel, Message};
use cosmic::Task;
use tracing::{info, warn};
use uuid::Uuid;

impl AppModel {
    pub(crate) fn handle_save_preset(&mut self) -> Task<cosmic::Action<Message>> {
        if let Err(e) = self.presets.save(self.color, self.brightness) {
            warn!(error = %e, "Preset kept in memory but not persisted");
        }
        info!(count = self.presets.len(), "Preset saved");
        Task::none()
    }

    pub(crate) fn handle_apply_preset(&mut self, id: Uuid) -> Task<cosmic::Action<Message>> {
        let Some(preset) = self.presets.get(id) else {
            warn!(%id, "Preset to apply no longer exists");
            return Task::none();
        };

        let (color, brightness) = self.presets.apply(preset);
        self.color = color;
        self.brightness = brightness;
        info!(%id, "Preset applied");

        self.push_brightness()
    }

    pub(crate) fn handle_remove_preset(&mut self, id: Uuid) -> Task<cosmic::Action<Message>> {
        if let Err(e) = self.presets.delete(id) {
            warn!(error = %e, "Preset removed in memory but not persisted");
        }
        Task::none()
    }
}
