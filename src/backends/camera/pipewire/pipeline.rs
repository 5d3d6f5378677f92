// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire GStreamer pipeline for camera capture

use super::super::types::*;
use crate::constants::{pipeline, timing};
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

/// Frames shared between the appsink callback and the session
///
/// Holds the newest frame with a sequence number so a capture can wait for
/// a frame produced after it was requested.
#[derive(Default)]
pub struct FrameSlot {
    sequence: AtomicU64,
    latest: Mutex<Option<CameraFrame>>,
    preview: Mutex<Option<FrameSender>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames published so far
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Acquire)
    }

    /// Newest frame, if it was published after `after`
    pub fn frame_after(&self, after: u64) -> Option<CameraFrame> {
        if self.sequence() <= after {
            return None;
        }
        self.latest.lock().ok()?.clone()
    }

    /// Store a frame and forward it to the preview, if attached
    pub fn publish(&self, frame: CameraFrame) -> u64 {
        if let Ok(mut preview) = self.preview.lock()
            && let Some(sender) = preview.as_mut()
            && let Err(e) = sender.try_send(frame.clone())
        {
            if e.is_disconnected() {
                debug!("Preview receiver dropped, detaching");
                *preview = None;
            }
        }

        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(frame);
        }
        self.sequence.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn set_preview(&self, sender: Option<FrameSender>) {
        if let Ok(mut preview) = self.preview.lock() {
            *preview = sender;
        }
    }

    /// Forget the last frame so a restarted pipeline never serves a stale one
    pub fn clear(&self) {
        if let Ok(mut latest) = self.latest.lock() {
            *latest = None;
        }
    }
}

/// Build the `pipewiresrc` target property for a device path
fn target_property(device_path: &str) -> String {
    if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
        format!("target-object={} ", serial)
    } else if let Some(node_id) = device_path.strip_prefix("pipewire-") {
        format!("target-object={} ", node_id)
    } else {
        // Empty path = PipeWire auto-selects the default camera
        String::new()
    }
}

/// Full launch description for a device
pub fn pipeline_description(device_path: &str) -> String {
    format!(
        "pipewiresrc {}do-timestamp=true ! decodebin ! videoconvert ! \
         video/x-raw,format=RGBA ! appsink name=sink",
        target_property(device_path)
    )
}

/// PipeWire camera pipeline
///
/// Decodes whatever the camera produces to RGBA and publishes every frame
/// into a [`FrameSlot`].
pub struct PipeWirePipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

impl PipeWirePipeline {
    /// Create and start a pipeline for `device`
    pub fn new(device: &CameraDevice, slot: Arc<FrameSlot>) -> BackendResult<Self> {
        info!(device = %device.name, path = %device.path, "Creating PipeWire pipeline");

        gstreamer::init().map_err(|e| BackendError::InitializationFailed(e.to_string()))?;

        let description = pipeline_description(&device.path);
        debug!(pipeline = %description, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&description)
            .map_err(|e| {
                BackendError::InitializationFailed(format!("Failed to create pipeline: {}", e))
            })?
            .downcast::<gstreamer::Pipeline>()
            .map_err(|_| {
                BackendError::InitializationFailed("Failed to downcast to Pipeline".to_string())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| BackendError::InitializationFailed("Failed to get appsink".to_string()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| {
                BackendError::InitializationFailed("Failed to cast appsink".to_string())
            })?;

        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let sample = appsink.pull_sample().map_err(|e| {
                        error!(error = ?e, "Failed to pull sample");
                        gstreamer::FlowError::Eos
                    })?;

                    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
                        warn!("Buffer marked as corrupted, skipping frame");
                        return Ok(gstreamer::FlowSuccess::Ok);
                    }

                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info = VideoInfo::from_caps(caps).map_err(|e| {
                        error!(error = ?e, "Failed to get video info");
                        gstreamer::FlowError::Error
                    })?;

                    let map = buffer.map_readable().map_err(|e| {
                        error!(error = ?e, "Failed to map buffer");
                        gstreamer::FlowError::Error
                    })?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        data: Arc::from(map.as_slice()),
                        stride: video_info.stride()[0] as u32,
                    };

                    let frame_num = slot.publish(frame);
                    if frame_num % timing::FRAME_LOG_INTERVAL == 1 {
                        debug!(
                            frame = frame_num,
                            width = video_info.width(),
                            height = video_info.height(),
                            "Frame received"
                        );
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            BackendError::InitializationFailed(format!("Failed to start pipeline: {}", e))
        })?;

        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, pending = ?pending, "Pipeline state");

        if result.is_err() {
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(BackendError::InitializationFailed(
                "Pipeline failed to reach PLAYING".to_string(),
            ));
        }
        if state != gstreamer::State::Playing {
            // Async transition; frames arrive once the device is ready
            warn!(?state, ?pending, "Pipeline is not in PLAYING state yet");
        }

        info!("PipeWire camera pipeline running");
        Ok(Self { pipeline, appsink })
    }

    /// Stop the pipeline and release the camera
    pub fn stop(self) -> BackendResult<()> {
        info!("Stopping PipeWire pipeline");

        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());

        self.pipeline
            .set_state(gstreamer::State::Null)
            .map_err(|e| BackendError::Other(format!("Failed to stop pipeline: {}", e)))?;

        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
        match result {
            Ok(_) => info!(state = ?state, "PipeWire pipeline stopped"),
            Err(e) => debug!(error = ?e, state = ?state, "Pipeline state change had issues"),
        }

        Ok(())
    }
}

impl Drop for PipeWirePipeline {
    fn drop(&mut self) {
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        let _ = self.pipeline.set_state(gstreamer::State::Null);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(fill: u8) -> CameraFrame {
        CameraFrame {
            width: 1,
            height: 1,
            data: Arc::from(vec![fill; 4]),
            stride: 4,
        }
    }

    #[test]
    fn test_pipeline_description_uses_serial() {
        let description = pipeline_description("pipewire-serial-2146");
        assert!(description.starts_with("pipewiresrc target-object=2146 "));
        assert!(description.contains("format=RGBA"));
        assert!(description.ends_with("appsink name=sink"));
    }

    #[test]
    fn test_pipeline_description_auto_select() {
        assert!(pipeline_description("").starts_with("pipewiresrc do-timestamp=true"));
    }

    #[test]
    fn test_frame_slot_only_serves_newer_frames() {
        let slot = FrameSlot::new();
        assert!(slot.frame_after(0).is_none());

        let seq = slot.publish(frame(7));
        assert_eq!(seq, 1);
        assert_eq!(slot.frame_after(0).unwrap().data[0], 7);
        assert!(slot.frame_after(seq).is_none());
    }

    #[test]
    fn test_frame_slot_forwards_to_preview() {
        let slot = FrameSlot::new();
        let (sender, mut receiver) = cosmic::iced::futures::channel::mpsc::channel(1);
        slot.set_preview(Some(sender));

        slot.publish(frame(3));
        assert_eq!(receiver.try_next().unwrap().unwrap().data[0], 3);
    }
}
