// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera backend
//!
//! This backend uses PipeWire for camera enumeration and capture.

mod enumeration;
mod pipeline;

pub use enumeration::{enumerate_pipewire_cameras, is_pipewire_available};
pub use pipeline::{FrameSlot, PipeWirePipeline, pipeline_description};

use super::types::*;
use super::{CameraBackend, PhotoOutput};
use crate::constants::timing;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Still output reading from the running pipeline's frame slot
pub struct PipeWirePhotoOutput {
    slot: Arc<FrameSlot>,
    running: Arc<AtomicBool>,
}

impl PhotoOutput for PipeWirePhotoOutput {
    fn capture_frame(&self) -> BackendResult<CameraFrame> {
        let requested_after = self.slot.sequence();
        let deadline = Instant::now() + timing::CAPTURE_TIMEOUT;
        debug!(requested_after, "Waiting for a fresh frame");

        while Instant::now() < deadline {
            // The session may stop while we wait
            if !self.running.load(Ordering::Acquire) {
                return Err(BackendError::NotBound("session is not running".to_string()));
            }
            if let Some(frame) = self.slot.frame_after(requested_after) {
                debug!(width = frame.width, height = frame.height, "Frame captured");
                return Ok(frame);
            }
            std::thread::sleep(timing::CAPTURE_POLL_INTERVAL);
        }

        Err(BackendError::Timeout)
    }
}

/// PipeWire backend implementation
pub struct PipeWireBackend {
    /// Bound input device
    input: Option<CameraDevice>,
    /// Bound photo output, shared with capture threads
    photo_output: Option<Arc<PipeWirePhotoOutput>>,
    /// Active GStreamer pipeline
    pipeline: Option<PipeWirePipeline>,
    slot: Arc<FrameSlot>,
    running: Arc<AtomicBool>,
}

impl PipeWireBackend {
    /// Create a new PipeWire backend
    pub fn new() -> Self {
        Self {
            input: None,
            photo_output: None,
            pipeline: None,
            slot: Arc::new(FrameSlot::new()),
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for PipeWireBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for PipeWireBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        enumerate_pipewire_cameras().unwrap_or_default()
    }

    fn bind_input(&mut self, device: &CameraDevice) -> BackendResult<()> {
        if !is_pipewire_available() {
            return Err(BackendError::NotAvailable(
                "PipeWire camera source missing".to_string(),
            ));
        }
        // The camera may have been unplugged since it was selected
        if !device.path.is_empty()
            && !self
                .enumerate_cameras()
                .iter()
                .any(|camera| camera.path == device.path)
        {
            return Err(BackendError::DeviceNotFound(device.name.clone()));
        }
        info!(device = %device.name, position = %device.position, "Binding camera input");
        self.input = Some(device.clone());
        Ok(())
    }

    fn bind_photo_output(&mut self) -> BackendResult<Arc<dyn PhotoOutput>> {
        let output = self
            .photo_output
            .get_or_insert_with(|| {
                info!("Binding photo output");
                Arc::new(PipeWirePhotoOutput {
                    slot: Arc::clone(&self.slot),
                    running: Arc::clone(&self.running),
                })
            })
            .clone();
        Ok(output)
    }

    fn set_preview_sender(&mut self, sender: Option<FrameSender>) {
        debug!(attached = sender.is_some(), "Preview sender changed");
        self.slot.set_preview(sender);
    }

    fn start_running(&mut self) -> BackendResult<()> {
        if self.pipeline.is_some() {
            return Ok(());
        }

        let device = self
            .input
            .as_ref()
            .ok_or_else(|| BackendError::NotBound("no input device".to_string()))?;

        self.slot.clear();
        let pipeline = PipeWirePipeline::new(device, Arc::clone(&self.slot))?;
        self.pipeline = Some(pipeline);
        self.running.store(true, Ordering::Release);
        Ok(())
    }

    fn stop_running(&mut self) -> BackendResult<()> {
        self.running.store(false, Ordering::Release);
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.stop()?;
        }
        self.slot.clear();
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CameraFrame {
        CameraFrame {
            width: 1,
            height: 1,
            data: Arc::from(vec![0u8; 4]),
            stride: 4,
        }
    }

    #[test]
    fn test_capture_on_stopped_output_fails_fast() {
        let output = PipeWirePhotoOutput {
            slot: Arc::new(FrameSlot::new()),
            running: Arc::new(AtomicBool::new(false)),
        };
        assert!(matches!(output.capture_frame(), Err(BackendError::NotBound(_))));
    }

    #[test]
    fn test_capture_gives_up_when_session_stops_mid_wait() {
        let running = Arc::new(AtomicBool::new(true));
        let output = PipeWirePhotoOutput {
            slot: Arc::new(FrameSlot::new()),
            running: Arc::clone(&running),
        };

        let stopper = std::thread::spawn(move || {
            std::thread::sleep(timing::CAPTURE_POLL_INTERVAL * 3);
            running.store(false, Ordering::Release);
        });

        let started = Instant::now();
        let result = output.capture_frame();
        stopper.join().unwrap();

        assert!(matches!(result, Err(BackendError::NotBound(_))));
        assert!(started.elapsed() < timing::CAPTURE_TIMEOUT);
    }

    #[test]
    fn test_capture_returns_frame_published_after_request() {
        let slot = Arc::new(FrameSlot::new());
        let output = PipeWirePhotoOutput {
            slot: Arc::clone(&slot),
            running: Arc::new(AtomicBool::new(true)),
        };

        let publisher = std::thread::spawn(move || {
            std::thread::sleep(timing::CAPTURE_POLL_INTERVAL * 2);
            slot.publish(frame());
        });

        let captured = output.capture_frame().unwrap();
        publisher.join().unwrap();
        assert_eq!((captured.width, captured.height), (1, 1));
    }
}
