// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use std::sync::Arc;

/// Which way a camera faces, as reported by libcamera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPosition {
    /// Faces the user (selfie camera)
    Front,
    /// Faces away from the user
    Back,
    /// Plugged-in camera that reports its own location
    External,
    /// No location reported (typical for desktop webcams)
    #[default]
    Unknown,
}

impl CameraPosition {
    /// Parse libcamera's `api.libcamera.location` property
    pub fn from_location(location: &str) -> Self {
        match location.trim() {
            "front" => CameraPosition::Front,
            "back" => CameraPosition::Back,
            "external" => CameraPosition::External,
            _ => CameraPosition::Unknown,
        }
    }
}

impl std::fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraPosition::Front => write!(f, "front"),
            CameraPosition::Back => write!(f, "back"),
            CameraPosition::External => write!(f, "external"),
            CameraPosition::Unknown => write!(f, "unknown"),
        }
    }
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    pub path: String,                  // PipeWire target (pipewire-serial-N), empty = auto-select
    pub metadata_path: Option<String>, // PipeWire node ID
    pub position: CameraPosition,
}

/// Pick the camera that faces the user
///
/// Prefers a camera that reports itself as front-facing. Webcams usually
/// report no location at all, so the first camera not known to face away is
/// the fallback.
pub fn select_front_camera(cameras: &[CameraDevice]) -> Option<CameraDevice> {
    cameras
        .iter()
        .find(|c| c.position == CameraPosition::Front)
        .or_else(|| cameras.iter().find(|c| c.position != CameraPosition::Back))
        .cloned()
}

/// A single RGBA frame
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels, `stride` bytes per row
    pub data: Arc<[u8]>,
    /// Row stride (bytes per row, may include padding)
    pub stride: u32,
}

impl CameraFrame {
    /// Pixels with row padding removed
    ///
    /// Truncated buffers yield fewer than `width * height * 4` bytes.
    pub fn packed_rgba(&self) -> Vec<u8> {
        let row_bytes = self.width as usize * 4;
        let stride = (self.stride as usize).max(row_bytes);
        if stride == 0 {
            return Vec::new();
        }

        let mut packed = Vec::with_capacity(row_bytes * self.height as usize);
        for row in self.data.chunks(stride).take(self.height as usize) {
            match row.get(..row_bytes) {
                Some(pixels) => packed.extend_from_slice(pixels),
                None => break,
            }
        }
        packed
    }
}

/// Encoded still photo as delivered to the capture completion
#[derive(Debug, Clone)]
pub struct EncodedPhoto {
    /// JPEG bytes
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Frame receiver type for preview streams
pub type FrameReceiver = cosmic::iced::futures::channel::mpsc::Receiver<CameraFrame>;

/// Frame sender type for preview streams
pub type FrameSender = cosmic::iced::futures::channel::mpsc::Sender<CameraFrame>;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// Failed to initialize backend
    InitializationFailed(String),
    /// Camera device not found
    DeviceNotFound(String),
    /// An operation needed a bound input or output that is missing
    NotBound(String),
    /// No frame arrived within the capture timeout
    Timeout,
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::NotBound(msg) => write!(f, "Not bound: {}", msg),
            BackendError::Timeout => write!(f, "Timed out waiting for a frame"),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}
