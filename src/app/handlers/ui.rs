// SPDX-License-Identifier: GPL-3.0-only

//! UI Navigation handlers
//!
//! Handles context pages, URLs and switching between edit, pure and selfie modes.

use crate::app::state::{AppModel, ContextPage, Message, UiMode};
use cosmic::Task;
use tracing::{error, info};

impl AppModel {
    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        match open::that_detached(&url) {
            Ok(()) => {}
            Err(err) => {
                error!(url = %url, error = %err, "Failed to open URL");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_set_mode(&mut self, mode: UiMode) -> Task<cosmic::Action<Message>> {
        if self.mode == mode {
            return Task::none();
        }

        let previous = std::mem::replace(&mut self.mode, mode);
        info!(from = ?previous, to = ?mode, "Switching UI mode");

        match (previous, mode) {
            (_, UiMode::Selfie) => self.enter_selfie(),
            (UiMode::Selfie, _) => self.leave_selfie(),
            _ => Task::none(),
        }
    }
}
