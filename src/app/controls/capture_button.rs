// SPDX-License-Identifier: GPL-3.0-only

//! Capture button widget implementation

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::pipelines::photo::SessionState;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the capture button widget
    ///
    /// - Ready: white circle
    /// - Capturing: gray, pressed down
    /// - No running session: grayed out and non-interactive
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let is_disabled = self.session.state() != SessionState::Running;

        let capture_button_color = if is_disabled {
            Color::from_rgba(0.5, 0.5, 0.5, 0.3)
        } else if self.is_capturing {
            Color::from_rgb(0.7, 0.7, 0.7)
        } else {
            Color::WHITE
        };

        let (inner_size, outer_size) = if self.is_capturing {
            (
                ui::CAPTURE_BUTTON_INNER * 0.85,
                ui::CAPTURE_BUTTON_OUTER * 0.85,
            )
        } else {
            (ui::CAPTURE_BUTTON_INNER, ui::CAPTURE_BUTTON_OUTER)
        };

        let button_inner = widget::container(widget::Space::new(
            Length::Fixed(inner_size),
            Length::Fixed(inner_size),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(capture_button_color)),
            border: cosmic::iced::Border {
                radius: [ui::CAPTURE_BUTTON_RADIUS * (inner_size / ui::CAPTURE_BUTTON_INNER); 4]
                    .into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let mut button = widget::button::custom(button_inner)
            .padding(0)
            .width(Length::Fixed(outer_size))
            .height(Length::Fixed(outer_size));
        if !is_disabled && !self.is_capturing {
            button = button.on_press(Message::Capture);
        }

        // Fixed-size wrapper keeps the layout still while the button shrinks
        widget::container(button)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .center_x(ui::CAPTURE_BUTTON_OUTER)
            .center_y(ui::CAPTURE_BUTTON_OUTER)
            .into()
    }
}
