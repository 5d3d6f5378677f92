// SPDX-License-Identifier: GPL-3.0-only

//! Slider rows for the color channels and screen brightness

use crate::app::controls::overlay_style;
use crate::app::state::{AppModel, Message};
use crate::constants::{panel, ui};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

/// Label, slider and two-decimal readout
fn slider_row<'a>(
    label: String,
    value: f64,
    on_change: fn(f32) -> Message,
    on_release: Option<Message>,
) -> Element<'a, Message> {
    let mut slider = widget::slider(
        panel::SLIDER_MIN..=panel::SLIDER_MAX,
        (value as f32).clamp(panel::SLIDER_MIN, panel::SLIDER_MAX),
        on_change,
    )
    .step(panel::SLIDER_STEP)
    .width(Length::Fill);
    if let Some(message) = on_release {
        slider = slider.on_release(message);
    }

    widget::row::with_capacity(3)
        .align_y(Alignment::Center)
        .spacing(cosmic::theme::spacing().space_s)
        .push(widget::text::body(label).width(Length::Fixed(ui::LABEL_WIDTH)))
        .push(slider)
        .push(
            widget::text::body(format!("{:.2}", value)).width(Length::Fixed(ui::VALUE_WIDTH)),
        )
        .into()
}

impl AppModel {
    /// Channel, opacity and brightness sliders
    pub fn build_sliders(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let column = widget::column()
            .spacing(spacing.space_xs)
            .push(slider_row(fl!("red"), self.color.red, Message::SetRed, None))
            .push(slider_row(
                fl!("green"),
                self.color.green,
                Message::SetGreen,
                None,
            ))
            .push(slider_row(fl!("blue"), self.color.blue, Message::SetBlue, None))
            .push(slider_row(
                fl!("alpha"),
                self.color.alpha,
                Message::SetAlpha,
                None,
            ))
            .push(slider_row(
                fl!("brightness"),
                self.brightness,
                Message::SetBrightness,
                Some(Message::CommitBrightness),
            ));

        widget::container(column)
            .padding(spacing.space_s)
            .max_width(ui::PANEL_MAX_WIDTH)
            .style(|_theme| overlay_style(ui::PANEL_OPACITY))
            .into()
    }
}
