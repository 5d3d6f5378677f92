// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! The capture session talks to cameras only through these traits:
//!
//! ```text
//! ┌─────────────────────┐
//! │   CaptureSession    │  ← State machine, threads, completion
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐      ┌──────────────────┐
//! │  CameraBackend Trait│ ───► │ PhotoOutput Trait│  ← bound still output
//! └──────────┬──────────┘      └──────────────────┘
//!            │
//!            ▼
//!       ┌────────┐
//!       │PipeWire│  ← Concrete implementation
//!       └────────┘
//! ```

pub mod pipewire;
pub mod types;

pub use types::*;

use std::sync::Arc;

/// Still photo output bound to a session
///
/// Captures run on their own thread and may block until a fresh frame
/// arrives, so the output is shared separately from the backend.
pub trait PhotoOutput: Send + Sync {
    /// Wait for the next frame produced after this call
    fn capture_frame(&self) -> BackendResult<CameraFrame>;
}

/// Camera backend trait
///
/// Mirrors a capture session: one input device and one photo output are
/// bound, then the session is started and stopped as a whole.
pub trait CameraBackend: Send {
    /// Enumerate available cameras on this backend
    fn enumerate_cameras(&self) -> Vec<CameraDevice>;

    /// The camera facing the user, if any
    fn front_camera(&self) -> Option<CameraDevice> {
        select_front_camera(&self.enumerate_cameras())
    }

    /// Bind a camera as the session input
    fn bind_input(&mut self, device: &CameraDevice) -> BackendResult<()>;

    /// Bind a still photo output and return a handle to it
    fn bind_photo_output(&mut self) -> BackendResult<Arc<dyn PhotoOutput>>;

    /// Route preview frames to `sender`, or stop routing them
    fn set_preview_sender(&mut self, sender: Option<FrameSender>);

    /// Start streaming from the bound input; blocks until running or failed
    fn start_running(&mut self) -> BackendResult<()>;

    /// Stop streaming and release the device
    fn stop_running(&mut self) -> BackendResult<()>;

    /// Whether the session is streaming
    fn is_running(&self) -> bool;
}

/// Get the default backend (PipeWire)
pub fn get_backend() -> Box<dyn CameraBackend> {
    Box::new(pipewire::PipeWireBackend::new())
}
