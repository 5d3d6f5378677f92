// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the selfie capture session

use fill_light::backends::camera::{
    BackendResult, CameraBackend, CameraDevice, CameraFrame, CameraPosition, FrameSender,
    PhotoOutput,
};
use fill_light::constants::PhotoQuality;
use fill_light::pipelines::photo::{CaptureSession, SessionState, complete_capture};
use fill_light::storage::{DirectoryLibrary, PhotoLibrary};
use std::sync::{Arc, Mutex};

fn frame(value: u8) -> CameraFrame {
    CameraFrame {
        width: 16,
        height: 12,
        data: Arc::from(vec![value; 16 * 12 * 4]),
        stride: 16 * 4,
    }
}

struct SolidOutput;

impl PhotoOutput for SolidOutput {
    fn capture_frame(&self) -> BackendResult<CameraFrame> {
        Ok(frame(200))
    }
}

/// Backend that remembers what it was asked to do
#[derive(Default)]
struct ScriptedBackend {
    cameras: Vec<CameraDevice>,
    bound: Arc<Mutex<Option<CameraDevice>>>,
    running: bool,
}

impl CameraBackend for ScriptedBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        self.cameras.clone()
    }

    fn bind_input(&mut self, device: &CameraDevice) -> BackendResult<()> {
        *self.bound.lock().unwrap() = Some(device.clone());
        Ok(())
    }

    fn bind_photo_output(&mut self) -> BackendResult<Arc<dyn PhotoOutput>> {
        Ok(Arc::new(SolidOutput))
    }

    fn set_preview_sender(&mut self, sender: Option<FrameSender>) {
        if let Some(mut sender) = sender {
            let _ = sender.try_send(frame(10));
        }
    }

    fn start_running(&mut self) -> BackendResult<()> {
        self.running = true;
        Ok(())
    }

    fn stop_running(&mut self) -> BackendResult<()> {
        self.running = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

fn camera(name: &str, position: CameraPosition) -> CameraDevice {
    CameraDevice {
        name: name.to_string(),
        path: format!("pipewire-serial-{}", name.len()),
        metadata_path: None,
        position,
    }
}

#[test]
fn test_session_binds_front_camera() {
    let backend = ScriptedBackend {
        cameras: vec![
            camera("rear", CameraPosition::Back),
            camera("selfie", CameraPosition::Front),
        ],
        ..Default::default()
    };
    let bound = Arc::clone(&backend.bound);

    let session = CaptureSession::new(Box::new(backend));
    session.initialize().unwrap().join().unwrap();

    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(bound.lock().unwrap().as_ref().unwrap().name, "selfie");
    assert_eq!(session.device().unwrap().position, CameraPosition::Front);
}

#[test]
fn test_only_back_camera_leaves_session_unavailable() {
    let backend = ScriptedBackend {
        cameras: vec![camera("rear", CameraPosition::Back)],
        ..Default::default()
    };
    let bound = Arc::clone(&backend.bound);

    let session = CaptureSession::new(Box::new(backend));
    session.initialize().unwrap().join().unwrap();

    assert_eq!(session.state(), SessionState::Unavailable);
    assert!(bound.lock().unwrap().is_none());
    assert!(session.capture_photo(PhotoQuality::High).is_none());
}

#[tokio::test]
async fn test_capture_writes_one_jpeg_to_directory() {
    let backend = ScriptedBackend {
        cameras: vec![camera("webcam", CameraPosition::Unknown)],
        ..Default::default()
    };
    let session = CaptureSession::new(Box::new(backend));
    session.initialize().unwrap().join().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let library: Arc<dyn PhotoLibrary> = Arc::new(DirectoryLibrary::new(dir.path(), 90));
    let pending = session.capture_photo(PhotoQuality::Medium).unwrap();
    let saved = complete_capture(pending, library).await.unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files, vec![saved.clone()]);

    let image = image::open(&saved).unwrap();
    assert_eq!((image.width(), image.height()), (16, 12));
}

#[test]
fn test_attached_preview_receives_frames() {
    let backend = ScriptedBackend {
        cameras: vec![camera("webcam", CameraPosition::Unknown)],
        ..Default::default()
    };
    let session = CaptureSession::new(Box::new(backend));
    session.initialize().unwrap().join().unwrap();

    let (sender, mut receiver) = futures::channel::mpsc::channel(4);
    session.attach_preview(Some(sender));

    // The preview is applied on a background thread
    let received = futures::executor::block_on(futures::StreamExt::next(&mut receiver));
    assert_eq!(received.map(|f| f.width), Some(16));
}
