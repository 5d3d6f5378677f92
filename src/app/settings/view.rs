// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

/// Bold section heading, as used throughout the drawer
fn section_heading<'a>(label: String) -> Element<'a, Message> {
    widget::text(label).size(16).font(cosmic::font::bold()).into()
}

/// Heading on the left, toggler on the right
fn toggle_row<'a>(label: String, enabled: bool, message: Message) -> Element<'a, Message> {
    widget::row()
        .push(section_heading(label))
        .push(widget::horizontal_space().width(Length::Fill))
        .push(widget::toggler(enabled).on_toggle(move |_| message.clone()))
        .align_y(Alignment::Center)
        .into()
}

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            Some(self.config.app_theme.index()),
            Message::SetAppTheme,
        );

        let quality_dropdown = widget::dropdown(
            &self.quality_dropdown_options,
            Some(self.config.photo_quality.index()),
            Message::SelectPhotoQuality,
        );

        let settings_column: Element<'_, Message> = widget::column()
            .push(section_heading(fl!("appearance")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text::body(fl!("theme")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(theme_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(section_heading(fl!("camera-section")))
            .push(widget::vertical_space().height(spacing.space_s))
            .push(toggle_row(
                fl!("mirror-preview"),
                self.config.mirror_preview,
                Message::ToggleMirrorPreview,
            ))
            .push(widget::vertical_space().height(spacing.space_s))
            .push(toggle_row(
                fl!("keep-camera-warm"),
                self.config.keep_camera_warm,
                Message::ToggleKeepCameraWarm,
            ))
            .push(widget::text::caption(fl!("keep-camera-warm-description")))
            .push(widget::vertical_space().height(spacing.space_s))
            .push(widget::text::body(fl!("photo-quality")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(quality_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(fl!("version", version = env!("CARGO_PKG_VERSION")))
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings-title"))
    }
}
