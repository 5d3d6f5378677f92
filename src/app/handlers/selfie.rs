// SPDX-License-Identifier: GPL-3.0-only

//! Selfie handlers
//!
//! Capture session lifecycle, preview frames and photo capture.

use crate::app::state::{AppModel, Message, UiMode};
use crate::backends::camera::types::{CameraFrame, FrameSender};
use crate::pipelines::photo::{self, SessionState, encoding};
use crate::storage::{DirectoryLibrary, PhotoLibrary};
use cosmic::Task;
use cosmic::widget;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// Report back once a session thread has finished its work
fn settle(handle: Option<JoinHandle<()>>) -> Task<cosmic::Action<Message>> {
    let Some(handle) = handle else {
        return Task::none();
    };

    Task::perform(
        async move {
            match tokio::task::spawn_blocking(move || handle.join()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => warn!("Session thread panicked"),
                Err(e) => warn!(error = %e, "Failed to wait for session thread"),
            }
        },
        |_| cosmic::Action::App(Message::SessionSettled),
    )
}

impl AppModel {
    /// Start the session (no-op when it is already warm)
    pub(crate) fn enter_selfie(&mut self) -> Task<cosmic::Action<Message>> {
        self.preview = None;
        settle(self.session.initialize())
    }

    /// Detach the preview and stop the session unless it should stay warm
    pub(crate) fn leave_selfie(&mut self) -> Task<cosmic::Action<Message>> {
        self.session.attach_preview(None);
        self.preview = None;
        settle(self.session.release(self.config.keep_camera_warm))
    }

    pub(crate) fn handle_session_settled(&mut self) -> Task<cosmic::Action<Message>> {
        match self.session.state() {
            SessionState::Running => {
                if let Some(device) = self.session.device() {
                    info!(camera = %device.name, position = %device.position, "Selfie camera ready");
                }
            }
            SessionState::Unavailable => {
                info!("No front camera, selfie capture disabled");
            }
            SessionState::Stopped => {
                if let Some(e) = self.session.last_error() {
                    warn!(error = %e, "Selfie camera did not start");
                }
            }
            state => debug!(?state, "Session settled"),
        }
        Task::none()
    }

    pub(crate) fn handle_preview_attached(
        &mut self,
        sender: FrameSender,
    ) -> Task<cosmic::Action<Message>> {
        if self.mode == UiMode::Selfie {
            self.session.attach_preview(Some(sender));
        }
        Task::none()
    }

    pub(crate) fn handle_preview_frame(
        &mut self,
        frame: CameraFrame,
    ) -> Task<cosmic::Action<Message>> {
        if self.mode != UiMode::Selfie {
            return Task::none();
        }

        let mut pixels = frame.packed_rgba();
        if pixels.len() != frame.width as usize * frame.height as usize * 4 {
            debug!(
                width = frame.width,
                height = frame.height,
                len = pixels.len(),
                "Skipping truncated preview frame"
            );
            return Task::none();
        }

        if self.config.mirror_preview {
            encoding::mirror_rgba(&mut pixels, frame.width);
        }
        self.preview = Some(widget::image::Handle::from_rgba(
            frame.width,
            frame.height,
            pixels,
        ));
        Task::none()
    }

    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if self.is_capturing {
            debug!("Capture already in flight");
            return Task::none();
        }

        let quality = self.config.photo_quality;
        let Some(pending) = self.session.capture_photo(quality) else {
            debug!("No camera bound, ignoring capture");
            return Task::none();
        };

        self.is_capturing = true;
        let library: Arc<dyn PhotoLibrary> = Arc::new(DirectoryLibrary::new(
            DirectoryLibrary::default_dir(),
            quality.jpeg_quality(),
        ));
        Task::perform(photo::complete_capture(pending, library), |path| {
            cosmic::Action::App(Message::PhotoSaved(path))
        })
    }

    pub(crate) fn handle_photo_saved(
        &mut self,
        path: Option<PathBuf>,
    ) -> Task<cosmic::Action<Message>> {
        self.is_capturing = false;
        if let Some(path) = path {
            info!(path = %path.display(), "Selfie saved");
            self.last_photo_path = Some(path);
        }
        Task::none()
    }
}
