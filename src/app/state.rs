// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::types::{CameraFrame, FrameSender};
use crate::config::Config;
use crate::pipelines::photo::CaptureSession;
use crate::presets::storage::ScalarStore;
use crate::presets::{FillColor, PresetStore};
use cosmic::cosmic_config;
use cosmic::widget::{self, about::About};
use std::path::PathBuf;
use uuid::Uuid;

/// What the main window shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    /// Preset bar, sliders and mode buttons over the color panel
    #[default]
    Edit,
    /// Only the color panel and a button back to editing
    Pure,
    /// Front camera preview with capture controls
    Selfie,
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Config handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Current window mode
    pub mode: UiMode,
    /// Live panel color
    pub color: FillColor,
    /// Screen brightness as a fraction of the backlight maximum
    pub brightness: f64,
    /// Saved presets and their backing store
    pub presets: PresetStore<Box<dyn ScalarStore>>,
    /// Front camera capture session
    pub session: CaptureSession,
    /// Latest preview frame, ready to draw
    pub preview: Option<widget::image::Handle>,
    /// Whether a capture is in flight
    pub is_capturing: bool,
    /// Where the most recent selfie went
    pub last_photo_path: Option<PathBuf>,
    /// Theme dropdown labels, in `AppTheme::ALL` order
    pub theme_dropdown_options: Vec<String>,
    /// Photo quality dropdown labels, in `PhotoQuality::ALL` order
    pub quality_dropdown_options: Vec<String>,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open a URL in the default browser
    LaunchUrl(String),
    /// Toggle a context drawer page
    ToggleContextPage(ContextPage),

    // ===== Panel =====
    SetRed(f32),
    SetGreen(f32),
    SetBlue(f32),
    SetAlpha(f32),
    SetBrightness(f32),
    /// Brightness slider released; push the value to the screen
    CommitBrightness,

    // ===== Presets =====
    SavePreset,
    ApplyPreset(Uuid),
    RemovePreset(Uuid),

    // ===== Modes =====
    SetMode(UiMode),

    // ===== Selfie =====
    Capture,
    /// Capture finished; `None` when nothing was written
    PhotoSaved(Option<PathBuf>),
    OpenPhotoFolder,
    /// The preview subscription is ready to receive frames
    PreviewAttached(FrameSender),
    PreviewFrame(CameraFrame),
    /// A session start or stop finished in the background
    SessionSettled,

    // ===== Settings =====
    UpdateConfig(Config),
    SetAppTheme(usize),
    ToggleMirrorPreview,
    ToggleKeepCameraWarm,
    SelectPhotoQuality(usize),

    /// Nothing to do
    Noop,
}
