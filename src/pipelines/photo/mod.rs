// SPDX-License-Identifier: GPL-3.0-only

//! Selfie photo capture
//!
//! ```text
//! CaptureSession ──capture_photo──► capture thread ──oneshot──► complete_capture
//!   (UI thread)                     frame → JPEG               decode → PhotoLibrary
//!       ↓
//! Preview continues uninterrupted
//! ```
//!
//! # Stages
//!
//! 1. **Capture**: wait for the next frame from the bound photo output
//! 2. **Encoding**: RGBA frame to JPEG at the configured quality
//! 3. **Completion**: decode the JPEG and hand it to the photo library
//!
//! Failures in any stage are logged and otherwise dropped.

pub mod encoding;
pub mod session;

pub use session::{CaptureSession, PendingCapture, SessionState};

use crate::storage::PhotoLibrary;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Finish a capture: decode the delivered photo and write it to the library
///
/// Never fails; the saved path is returned for callers that want to show it.
pub async fn complete_capture(
    pending: PendingCapture,
    library: Arc<dyn PhotoLibrary>,
) -> Option<PathBuf> {
    let photo = match pending.wait().await {
        Ok(photo) => photo,
        Err(e) => {
            warn!(error = %e, "Photo capture failed");
            return None;
        }
    };

    info!(
        width = photo.width,
        height = photo.height,
        size = photo.data.len(),
        "Photo delivered"
    );

    let saved = tokio::task::spawn_blocking(move || {
        let image = encoding::decode_photo(&photo.data)?;
        library.save_image(&image)
    })
    .await;

    match saved {
        Ok(Ok(path)) => Some(path),
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to write photo to library");
            None
        }
        Err(e) => {
            warn!(error = %e, "Photo save task failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::{
        BackendResult, CameraBackend, CameraDevice, CameraFrame, CameraPosition, FrameSender,
        PhotoOutput,
    };
    use crate::constants::PhotoQuality;
    use crate::errors::PhotoError;
    use image::DynamicImage;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLibrary {
        saved: Mutex<Vec<(u32, u32)>>,
    }

    impl PhotoLibrary for RecordingLibrary {
        fn save_image(&self, image: &DynamicImage) -> Result<PathBuf, PhotoError> {
            let mut saved = self.saved.lock().unwrap();
            saved.push((image.width(), image.height()));
            Ok(PathBuf::from(format!("/photos/{}.jpg", saved.len())))
        }
    }

    struct GreyOutput;

    impl PhotoOutput for GreyOutput {
        fn capture_frame(&self) -> BackendResult<CameraFrame> {
            Ok(CameraFrame {
                width: 8,
                height: 6,
                data: Arc::from(vec![90u8; 8 * 6 * 4]),
                stride: 8 * 4,
            })
        }
    }

    struct OneCamera(Vec<CameraDevice>);

    impl CameraBackend for OneCamera {
        fn enumerate_cameras(&self) -> Vec<CameraDevice> {
            self.0.clone()
        }
        fn bind_input(&mut self, _device: &CameraDevice) -> BackendResult<()> {
            Ok(())
        }
        fn bind_photo_output(&mut self) -> BackendResult<Arc<dyn PhotoOutput>> {
            Ok(Arc::new(GreyOutput))
        }
        fn set_preview_sender(&mut self, _sender: Option<FrameSender>) {}
        fn start_running(&mut self) -> BackendResult<()> {
            Ok(())
        }
        fn stop_running(&mut self) -> BackendResult<()> {
            Ok(())
        }
        fn is_running(&self) -> bool {
            true
        }
    }

    fn camera() -> CameraDevice {
        CameraDevice {
            name: "Webcam".to_string(),
            path: String::new(),
            metadata_path: None,
            position: CameraPosition::Unknown,
        }
    }

    #[tokio::test]
    async fn test_capture_writes_exactly_one_photo() {
        let session = CaptureSession::new(Box::new(OneCamera(vec![camera()])));
        session.initialize().unwrap().join().unwrap();

        let library = Arc::new(RecordingLibrary::default());
        let pending = session.capture_photo(PhotoQuality::High).unwrap();
        let path = complete_capture(pending, library.clone()).await;

        assert_eq!(path, Some(PathBuf::from("/photos/1.jpg")));
        assert_eq!(*library.saved.lock().unwrap(), vec![(8, 6)]);
    }

    #[tokio::test]
    async fn test_capture_without_camera_never_touches_library() {
        let session = CaptureSession::new(Box::new(OneCamera(Vec::new())));
        session.initialize().unwrap().join().unwrap();

        let library = Arc::new(RecordingLibrary::default());
        assert!(session.capture_photo(PhotoQuality::High).is_none());
        assert!(library.saved.lock().unwrap().is_empty());
    }
}
