// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the fill light application
//!
//! None of these ever reach the user interface: every failure degrades to
//! "nothing happens" and is only logged. The types exist so that callers can
//! decide what to log and tests can assert on the failure kind.

use crate::backends::camera::BackendError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for preset persistence
pub type PresetResult<T> = Result<T, PresetError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Preset persistence errors
    Preset(PresetError),
    /// Camera-related errors
    Camera(CameraError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Generic error with message
    Other(String),
}

/// Preset persistence errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    /// The collection could not be serialized
    Encode(String),
    /// The stored blob could not be deserialized
    Decode(String),
    /// The scalar storage rejected the write
    Io(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// No user-facing camera was found
    NoFrontCamera,
    /// The capture pipeline could not be started
    StartFailed(String),
    /// A capture was requested on a session that is not running
    NotRunning,
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    /// The backend failed to produce a frame
    CaptureFailed(String),
    /// No new frame arrived in time
    Timeout,
    /// The completion channel closed before a result was delivered
    Abandoned,
    /// Encoded data could not be decoded back into an image
    DecodeFailed(String),
    /// Encoding failed
    EncodingFailed(String),
    /// Save failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Preset(e) => write!(f, "Preset error: {}", e),
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Encode(msg) => write!(f, "Failed to encode presets: {}", msg),
            PresetError::Decode(msg) => write!(f, "Failed to decode presets: {}", msg),
            PresetError::Io(msg) => write!(f, "Failed to write presets: {}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoFrontCamera => write!(f, "No front camera available"),
            CameraError::StartFailed(msg) => write!(f, "Failed to start session: {}", msg),
            CameraError::NotRunning => write!(f, "Capture session is not running"),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            PhotoError::Timeout => write!(f, "Timed out waiting for a camera frame"),
            PhotoError::Abandoned => write!(f, "Capture was abandoned before completing"),
            PhotoError::DecodeFailed(msg) => write!(f, "Decoding failed: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for PresetError {}
impl std::error::Error for CameraError {}
impl std::error::Error for PhotoError {}

// Conversions from sub-errors to AppError
impl From<PresetError> for AppError {
    fn from(err: PresetError) -> Self {
        AppError::Preset(err)
    }
}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<std::io::Error> for PresetError {
    fn from(err: std::io::Error) -> Self {
        PresetError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            PresetError::Io(err.to_string())
        } else {
            PresetError::Encode(err.to_string())
        }
    }
}

impl From<BackendError> for PhotoError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Timeout => PhotoError::Timeout,
            other => PhotoError::CaptureFailed(other.to_string()),
        }
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Decoding(e) => PhotoError::DecodeFailed(e.to_string()),
            image::ImageError::IoError(e) => PhotoError::SaveFailed(e.to_string()),
            other => PhotoError::EncodingFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_preset_io() {
        let err: PresetError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert!(matches!(err, PresetError::Io(_)));
    }

    #[test]
    fn test_backend_timeout_keeps_its_kind() {
        assert_eq!(PhotoError::from(BackendError::Timeout), PhotoError::Timeout);
        assert!(matches!(
            PhotoError::from(BackendError::NotBound("no output".to_string())),
            PhotoError::CaptureFailed(_)
        ));
    }

    #[test]
    fn test_app_error_display_includes_source() {
        let err: AppError = CameraError::NoFrontCamera.into();
        assert_eq!(err.to_string(), "Camera error: No front camera available");
    }
}
