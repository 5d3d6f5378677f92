// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! The fill color covers the whole window in every mode except selfie:
//! - Edit: preset bar on top, sliders and mode buttons at the bottom
//! - Pure: nothing but the color and a button back to editing
//! - Selfie: camera preview with back, capture and photo folder buttons

use crate::app::controls::overlay_style;
use crate::app::state::{AppModel, Message, UiMode};
use crate::constants::ui;
use crate::fl;
use crate::pipelines::photo::SessionState;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        match self.mode {
            UiMode::Edit => self.view_edit(),
            UiMode::Pure => self.view_pure(),
            UiMode::Selfie => self.view_selfie(),
        }
    }

    /// Solid full-window fill in the current color
    fn build_color_panel(&self) -> Element<'_, Message> {
        let color = self.color.to_color();
        widget::container(widget::Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| widget::container::Style {
                background: Some(Background::Color(color)),
                ..Default::default()
            })
            .into()
    }

    fn view_edit(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mode_buttons = widget::row()
            .spacing(spacing.space_s)
            .push(widget::button::suggested(fl!("save-preset")).on_press(Message::SavePreset))
            .push(
                widget::button::standard(fl!("pure-mode"))
                    .on_press(Message::SetMode(UiMode::Pure)),
            )
            .push(
                widget::button::standard(fl!("selfie-mode"))
                    .leading_icon(widget::icon::from_name("camera-photo-symbolic"))
                    .on_press(Message::SetMode(UiMode::Selfie)),
            );

        let bottom = widget::column()
            .spacing(spacing.space_s)
            .align_x(Alignment::Center)
            .push(self.build_sliders())
            .push(mode_buttons);

        let overlay = widget::column()
            .padding(spacing.space_m)
            .push(self.build_preset_bar())
            .push(widget::vertical_space())
            .push(
                widget::container(bottom)
                    .width(Length::Fill)
                    .center_x(Length::Fill),
            );

        cosmic::iced::widget::stack![self.build_color_panel(), overlay]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_pure(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let back = widget::container(
            widget::button::standard(fl!("edit-mode")).on_press(Message::SetMode(UiMode::Edit)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing.space_m)
        .align_x(Alignment::Center)
        .align_y(Alignment::End);

        cosmic::iced::widget::stack![self.build_color_panel(), back]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_selfie(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let preview: Element<'_, Message> = match &self.preview {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(cosmic::iced::ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => {
                let status = if self.session.state() == SessionState::Unavailable {
                    fl!("no-camera")
                } else {
                    fl!("camera-starting")
                };
                widget::container(widget::text::body(status))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .center(Length::Fill)
                    .into()
            }
        };

        let back_button = widget::button::standard(fl!("back"))
            .leading_icon(widget::icon::from_name("go-previous-symbolic"))
            .on_press(Message::SetMode(UiMode::Edit));

        let folder_button =
            widget::button::icon(widget::icon::from_name("folder-pictures-symbolic"))
                .on_press(Message::OpenPhotoFolder);

        let controls = widget::container(
            widget::row()
                .align_y(Alignment::Center)
                .push(
                    widget::container(back_button)
                        .width(Length::Fill)
                        .align_x(Alignment::Start),
                )
                .push(self.build_capture_button())
                .push(
                    widget::container(folder_button)
                        .width(Length::Fill)
                        .align_x(Alignment::End),
                ),
        )
        .padding(spacing.space_s)
        .width(Length::Fill)
        .style(|_theme| overlay_style(ui::PANEL_OPACITY));

        let last_saved = self
            .last_photo_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| {
                widget::container(widget::text::caption(fl!(
                    "photo-saved",
                    name = name.to_string_lossy().to_string()
                )))
                .padding(spacing.space_xxs)
                .style(|_theme| overlay_style(ui::PANEL_OPACITY))
            });

        let mut overlay = widget::column()
            .padding(spacing.space_m)
            .spacing(spacing.space_xs)
            .align_x(Alignment::Center)
            .push(widget::vertical_space());
        if let Some(last_saved) = last_saved {
            overlay = overlay.push(last_saved);
        }
        let overlay = overlay.push(controls);

        widget::container(
            cosmic::iced::widget::stack![preview, overlay]
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::BLACK)),
            text_color: Some(Color::WHITE),
            ..Default::default()
        })
        .into()
    }
}
