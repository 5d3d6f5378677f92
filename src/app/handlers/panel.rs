// SPDX-License-Identifier: GPL-3.0-only

//! Panel handlers
//!
//! Color channel sliders and screen brightness.

use crate::app::state::{AppModel, Message};
use cosmic::Task;
use tracing::{debug, warn};

impl AppModel {
    pub(crate) fn handle_set_red(&mut self, value: f32) -> Task<cosmic::Action<Message>> {
        self.color.red = f64::from(value);
        Task::none()
    }

    pub(crate) fn handle_set_green(&mut self, value: f32) -> Task<cosmic::Action<Message>> {
        self.color.green = f64::from(value);
        Task::none()
    }

    pub(crate) fn handle_set_blue(&mut self, value: f32) -> Task<cosmic::Action<Message>> {
        self.color.blue = f64::from(value);
        Task::none()
    }

    pub(crate) fn handle_set_alpha(&mut self, value: f32) -> Task<cosmic::Action<Message>> {
        self.color.alpha = f64::from(value);
        Task::none()
    }

    /// Track the slider; the screen follows on release
    pub(crate) fn handle_set_brightness(&mut self, value: f32) -> Task<cosmic::Action<Message>> {
        self.brightness = f64::from(value);
        Task::none()
    }

    pub(crate) fn handle_commit_brightness(&self) -> Task<cosmic::Action<Message>> {
        self.push_brightness()
    }

    /// Write the current brightness to the screen in the background
    pub(crate) fn push_brightness(&self) -> Task<cosmic::Action<Message>> {
        let fraction = self.brightness;
        Task::perform(
            async move { crate::brightness::set_brightness(fraction).await },
            move |result| {
                match result {
                    Ok(true) => debug!(fraction, "Brightness applied"),
                    Ok(false) => debug!("No backlight to apply brightness to"),
                    Err(e) => warn!(error = %e, "Failed to apply brightness"),
                }
                cosmic::Action::App(Message::Noop)
            },
        )
    }
}
