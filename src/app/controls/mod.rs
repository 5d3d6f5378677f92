// SPDX-License-Identifier: GPL-3.0-only

//! Panel and capture controls
//!
//! - Capture button (selfie mode)
//! - Preset bar with swatches and remove buttons
//! - Slider rows for the color channels and brightness

pub mod capture_button;
pub mod preset_bar;
pub mod sliders;

/// Translucent rounded background for panels drawn over the fill color
pub(crate) fn overlay_style(opacity: f32) -> cosmic::widget::container::Style {
    use crate::constants::ui;
    use cosmic::iced::{Background, Color};

    cosmic::widget::container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, opacity))),
        text_color: Some(Color::WHITE),
        border: cosmic::iced::Border {
            radius: ui::PANEL_RADIUS.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
