// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for Fill Light
//!
//! This module contains the application state, message handling, UI rendering,
//! and the glue between the panel, the preset store and the capture session.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, UiMode, ContextPage)
//! - `controls`: Preset bar, slider rows and the capture button
//! - `handlers`: Message handlers grouped by functional domain
//! - `settings`: Settings drawer UI
//! - `view`: Main view rendering (edit, pure and selfie modes)
//! - `update`: Message dispatcher

mod controls;
mod handlers;
pub mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::{self, FrameReceiver, FrameSender};
use crate::config::Config;
use crate::constants::pipeline;
use crate::fl;
use crate::pipelines::photo::CaptureSession;
use crate::presets::PresetStore;
use crate::presets::storage::{FileStore, MemoryStore, ScalarStore};
use crate::presets::store::LoadOutcome;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, Message, UiMode};
use tracing::{debug, error, info, warn};

const REPOSITORY: &str = "https://github.com/fill-light/fill-light";
const APP_ICON: &[u8] = include_bytes!(
    "../../resources/icons/hicolor/scalable/apps/io.github.filllight.FillLight.svg"
);

/// Open the preset store under the user's data directory
///
/// Falls back to an in-memory store when no data directory is known, so the
/// panel still works; presets just do not outlive the process.
fn open_preset_store() -> PresetStore<Box<dyn ScalarStore>> {
    let storage: Box<dyn ScalarStore> = match FileStore::user_default() {
        Some(store) => {
            debug!(dir = %store.dir().display(), "Using on-disk preset storage");
            Box::new(store)
        }
        None => {
            warn!("No local data directory, presets will not be persisted");
            Box::new(MemoryStore::new())
        }
    };

    let mut presets = PresetStore::new(storage);
    match presets.load() {
        LoadOutcome::Loaded(count) => info!(count, "Loaded presets"),
        LoadOutcome::Missing => info!("No saved presets"),
        LoadOutcome::Corrupt(e) => {
            warn!(error = %e, "Saved presets could not be read, starting empty")
        }
    }
    presets
}

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.filllight.FillLight";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // Create the about widget
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        // Initialize GStreamer early (required before any GStreamer calls)
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let brightness = crate::brightness::read_current();
        info!(brightness, "Starting with current screen brightness");

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            mode: UiMode::default(),
            color: Default::default(),
            brightness,
            presets: open_preset_store(),
            session: CaptureSession::new(camera::get_backend()),
            preview: None,
            is_capturing: false,
            last_photo_path: None,
            theme_dropdown_options: vec![
                fl!("theme-system"),
                fl!("theme-dark"),
                fl!("theme-light"),
            ],
            quality_dropdown_options: vec![
                fl!("quality-low"),
                fl!("quality-medium"),
                fl!("quality-high"),
                fl!("quality-maximum"),
            ],
        };

        let theme_task = cosmic::command::set_theme(app.config.app_theme.theme());

        (app, theme_task)
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            )
            .title(fl!("about")),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // Lives exactly as long as selfie mode; dropping the receiver detaches
        // the sender from the pipeline
        let preview_sub = if self.mode != UiMode::Selfie {
            Subscription::none()
        } else {
            Self::preview_subscription()
        };

        Subscription::batch([config_sub, preview_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}

impl AppModel {
    /// Hand a frame sender to the session and forward its frames to the view
    fn preview_subscription() -> Subscription<Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        Subscription::run_with_id(
            "selfie-preview",
            cosmic::iced::stream::channel(pipeline::PREVIEW_CHANNEL_CAPACITY, |mut output| async move {
                let (sender, mut receiver): (FrameSender, FrameReceiver) =
                    cosmic::iced::futures::channel::mpsc::channel(
                        pipeline::PREVIEW_CHANNEL_CAPACITY,
                    );

                if output.send(Message::PreviewAttached(sender)).await.is_err() {
                    return;
                }
                info!("Selfie preview subscription started");

                let mut frame_count = 0u64;
                while let Some(frame) = receiver.next().await {
                    frame_count += 1;
                    // Keep only the newest frames when the UI falls behind
                    if let Err(e) = output.try_send(Message::PreviewFrame(frame)) {
                        if e.is_disconnected() {
                            break;
                        }
                        debug!(frame = frame_count, "Preview frame dropped (UI busy)");
                    }
                }
                info!(frames = frame_count, "Selfie preview subscription ended");
            }),
        )
    }
}
