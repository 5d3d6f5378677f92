// SPDX-License-Identifier: GPL-3.0-only

//! Preset bar: one round swatch per saved preset

use crate::app::controls::overlay_style;
use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use crate::presets::ColorPreset;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

/// Round swatch that applies the preset when pressed, with a remove button below
fn preset_swatch(preset: &ColorPreset) -> Element<'_, Message> {
    let color = preset.color().to_color();

    let swatch = widget::container(widget::Space::new(
        Length::Fixed(ui::SWATCH_SIZE),
        Length::Fixed(ui::SWATCH_SIZE),
    ))
    .style(move |_theme| widget::container::Style {
        background: Some(Background::Color(color)),
        border: cosmic::iced::Border {
            radius: (ui::SWATCH_SIZE / 2.0).into(),
            width: 2.0,
            color: Color::WHITE,
        },
        ..Default::default()
    });

    let apply_button = widget::button::custom(swatch)
        .padding(0)
        .class(cosmic::theme::Button::Image)
        .on_press(Message::ApplyPreset(preset.id()));

    let remove_button =
        widget::button::icon(widget::icon::from_name("window-close-symbolic").size(12))
            .padding(2)
            .on_press(Message::RemovePreset(preset.id()));

    widget::column()
        .push(apply_button)
        .push(remove_button)
        .spacing(4)
        .align_x(Alignment::Center)
        .into()
}

impl AppModel {
    /// Horizontally scrolling bar of preset swatches
    pub fn build_preset_bar(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let content: Element<'_, Message> = if self.presets.is_empty() {
            widget::text::body(fl!("no-presets")).into()
        } else {
            let swatches = self
                .presets
                .presets()
                .iter()
                .fold(widget::row().spacing(ui::SWATCH_SPACING), |row, preset| {
                    row.push(preset_swatch(preset))
                })
                .align_y(Alignment::Center);
            widget::scrollable::horizontal(swatches).into()
        };

        widget::container(content)
            .padding(spacing.space_s)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .style(|_theme| overlay_style(ui::PRESET_BAR_OPACITY))
            .into()
    }
}
