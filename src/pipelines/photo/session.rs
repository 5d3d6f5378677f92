// SPDX-License-Identifier: GPL-3.0-only

//! Selfie capture session
//!
//! ```text
//! Uninitialized ──initialize──► Initializing ──started──► Running ──stop──► Stopped
//!       │                            │                      ▲  │              │
//!       │                            └──start failed──► Stopped│              │
//!       └──no front camera──► Unavailable ◄──no front camera───┼──────────────┘
//!                                                   capture ───┘
//! ```
//!
//! Device selection, binding and start all happen on a background thread so
//! the UI never waits on the camera. Every `initialize` and `stop` bumps a
//! generation counter; a background thread that finds the generation moved
//! on leaves the backend alone, so the most recent request always wins.

use crate::backends::camera::{
    CameraBackend, CameraDevice, EncodedPhoto, FrameSender, PhotoOutput,
};
use crate::constants::PhotoQuality;
use crate::errors::{CameraError, PhotoError};
use crate::pipelines::photo::encoding;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

/// Lifecycle of the capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initializing,
    Running,
    Stopped,
    /// No front camera exists; captures are no-ops
    Unavailable,
}

impl SessionState {
    /// Whether a start is in flight or done
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Initializing | SessionState::Running)
    }
}

#[derive(Default)]
struct Shared {
    state: SessionState,
    generation: u64,
    device: Option<CameraDevice>,
    output: Option<Arc<dyn PhotoOutput>>,
    preview: Option<FrameSender>,
    last_error: Option<CameraError>,
}

/// A capture request whose result has not been consumed yet
///
/// The result is delivered exactly once; waiting consumes the request.
pub struct PendingCapture {
    receiver: oneshot::Receiver<Result<EncodedPhoto, PhotoError>>,
}

impl PendingCapture {
    /// Wait for the encoded photo
    pub async fn wait(self) -> Result<EncodedPhoto, PhotoError> {
        self.receiver.await.map_err(|_| PhotoError::Abandoned)?
    }

    /// Blocking variant for non-async callers
    pub fn blocking_wait(self) -> Result<EncodedPhoto, PhotoError> {
        self.receiver.blocking_recv().map_err(|_| PhotoError::Abandoned)?
    }
}

/// Owns the camera backend and drives it through the session lifecycle
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct CaptureSession {
    backend: Arc<Mutex<Box<dyn CameraBackend>>>,
    shared: Arc<Mutex<Shared>>,
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("state", &self.state())
            .finish()
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Poisoned guards are recovered; every critical section leaves the state whole
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CaptureSession {
    pub fn new(backend: Box<dyn CameraBackend>) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            shared: Arc::new(Mutex::new(Shared::default())),
        }
    }

    pub fn state(&self) -> SessionState {
        lock(&self.shared).state
    }

    /// The bound camera, once initialization selected one
    pub fn device(&self) -> Option<CameraDevice> {
        lock(&self.shared).device.clone()
    }

    /// Why the last start attempt failed, if it did
    pub fn last_error(&self) -> Option<CameraError> {
        lock(&self.shared).last_error.clone()
    }

    /// Select the front camera, bind it, and start the session
    ///
    /// Returns immediately. The handle of the background thread is returned
    /// for callers that want to wait; dropping it is fine. Returns `None`
    /// when the session is already starting or running.
    pub fn initialize(&self) -> Option<JoinHandle<()>> {
        let generation = {
            let mut shared = lock(&self.shared);
            if shared.state.is_active() {
                debug!(state = ?shared.state, "Session already active, ignoring initialize");
                return None;
            }
            shared.state = SessionState::Initializing;
            shared.last_error = None;
            shared.generation += 1;
            shared.generation
        };

        info!(generation, "Initializing capture session");
        let session = self.clone();
        let spawned = std::thread::Builder::new()
            .name("fill-light-session".to_string())
            .spawn(move || session.run_start(generation));

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(error = %e, "Failed to spawn session thread");
                self.finish_start(generation, Err(CameraError::StartFailed(e.to_string())));
                None
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        lock(&self.shared).generation == generation
    }

    fn run_start(&self, generation: u64) {
        let mut backend = lock(&self.backend);
        if !self.is_current(generation) {
            debug!(generation, "Start superseded before it began");
            return;
        }

        let Some(device) = backend.front_camera() else {
            info!("No front camera, selfie capture unavailable");
            let mut shared = lock(&self.shared);
            if shared.generation == generation {
                shared.state = SessionState::Unavailable;
                shared.last_error = Some(CameraError::NoFrontCamera);
            }
            return;
        };
        info!(device = %device.name, position = %device.position, "Selected camera");

        if let Err(e) = backend.bind_input(&device) {
            warn!(error = %e, "Session rejected camera input");
        }

        let output = match backend.bind_photo_output() {
            Ok(output) => Some(output),
            Err(e) => {
                warn!(error = %e, "Session rejected photo output");
                None
            }
        };

        {
            let mut shared = lock(&self.shared);
            shared.device = Some(device);
            shared.output = output;
            backend.set_preview_sender(shared.preview.clone());
        }

        let result = backend
            .start_running()
            .map_err(|e| CameraError::StartFailed(e.to_string()));
        self.finish_start(generation, result);
    }

    fn finish_start(&self, generation: u64, result: Result<(), CameraError>) {
        let mut shared = lock(&self.shared);
        if shared.generation != generation {
            debug!(generation, "Start finished after being superseded");
            return;
        }

        match result {
            Ok(()) => {
                info!("Capture session running");
                shared.state = SessionState::Running;
            }
            Err(e) => {
                error!(error = %e, "Capture session failed to start");
                shared.state = SessionState::Stopped;
                shared.output = None;
                shared.last_error = Some(e);
            }
        }
    }

    /// Stop the session; a stopped session may be initialized again
    pub fn stop(&self) -> Option<JoinHandle<()>> {
        let generation = {
            let mut shared = lock(&self.shared);
            if !shared.state.is_active() {
                return None;
            }
            shared.state = SessionState::Stopped;
            shared.generation += 1;
            shared.generation
        };

        info!(generation, "Stopping capture session");
        let session = self.clone();
        std::thread::Builder::new()
            .name("fill-light-session-stop".to_string())
            .spawn(move || {
                let mut backend = lock(&session.backend);
                if !session.is_current(generation) {
                    debug!(generation, "Stop superseded by a newer request");
                    return;
                }
                if !backend.is_running() {
                    debug!(generation, "Camera already idle");
                    return;
                }
                if let Err(e) = backend.stop_running() {
                    warn!(error = %e, "Failed to stop camera cleanly");
                }
            })
            .map_err(|e| error!(error = %e, "Failed to spawn stop thread"))
            .ok()
    }

    /// Let go of the session when the selfie view closes
    ///
    /// Stops it unless `keep_warm` asks for the camera to keep streaming.
    pub fn release(&self, keep_warm: bool) -> Option<JoinHandle<()>> {
        if keep_warm {
            debug!(state = ?self.state(), "Keeping capture session warm");
            return None;
        }
        self.stop()
    }

    /// Route preview frames to `sender`, or detach with `None`
    pub fn attach_preview(&self, sender: Option<FrameSender>) {
        lock(&self.shared).preview = sender;

        // The backend may be busy starting; apply whatever is current once free
        let session = self.clone();
        let spawned = std::thread::Builder::new()
            .name("fill-light-preview".to_string())
            .spawn(move || {
                let mut backend = lock(&session.backend);
                let sender = lock(&session.shared).preview.clone();
                backend.set_preview_sender(sender);
            });
        if let Err(e) = spawned {
            error!(error = %e, "Failed to spawn preview thread");
        }
    }

    /// Request one still photo
    ///
    /// Returns `None` without doing anything unless the session is running
    /// with a bound photo output.
    pub fn capture_photo(&self, quality: PhotoQuality) -> Option<PendingCapture> {
        let output = {
            let shared = lock(&self.shared);
            if shared.state != SessionState::Running {
                debug!(state = ?shared.state, "Capture requested while not running");
                return None;
            }
            shared.output.clone()?
        };
        let (sender, receiver) = oneshot::channel();

        let spawned = std::thread::Builder::new()
            .name("fill-light-capture".to_string())
            .spawn(move || {
                let result = output
                    .capture_frame()
                    .map_err(PhotoError::from)
                    .and_then(|frame| encoding::encode_jpeg(&frame, quality));
                if sender.send(result).is_err() {
                    debug!("Capture completed after its receiver was dropped");
                }
            });

        match spawned {
            Ok(_) => {
                info!(quality = ?quality, "Photo capture requested");
                Some(PendingCapture { receiver })
            }
            Err(e) => {
                error!(error = %e, "Failed to spawn capture thread");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::{BackendError, BackendResult, CameraFrame, CameraPosition};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counters {
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    struct SolidOutput;

    impl PhotoOutput for SolidOutput {
        fn capture_frame(&self) -> BackendResult<CameraFrame> {
            Ok(CameraFrame {
                width: 2,
                height: 2,
                data: Arc::from(vec![128u8; 16]),
                stride: 8,
            })
        }
    }

    /// Output that never sees a fresh frame
    struct StalledOutput;

    impl PhotoOutput for StalledOutput {
        fn capture_frame(&self) -> BackendResult<CameraFrame> {
            Err(BackendError::Timeout)
        }
    }

    struct FakeBackend {
        cameras: Vec<CameraDevice>,
        fail_start: bool,
        stalled: bool,
        running: bool,
        counters: Arc<Counters>,
    }

    impl CameraBackend for FakeBackend {
        fn enumerate_cameras(&self) -> Vec<CameraDevice> {
            self.cameras.clone()
        }

        fn bind_input(&mut self, _device: &CameraDevice) -> BackendResult<()> {
            Ok(())
        }

        fn bind_photo_output(&mut self) -> BackendResult<Arc<dyn PhotoOutput>> {
            if self.stalled {
                return Ok(Arc::new(StalledOutput));
            }
            Ok(Arc::new(SolidOutput))
        }

        fn set_preview_sender(&mut self, _sender: Option<FrameSender>) {}

        fn start_running(&mut self) -> BackendResult<()> {
            self.counters.starts.fetch_add(1, Ordering::SeqCst);
            if self.fail_start {
                return Err(BackendError::InitializationFailed("busy".to_string()));
            }
            self.running = true;
            Ok(())
        }

        fn stop_running(&mut self) -> BackendResult<()> {
            self.counters.stops.fetch_add(1, Ordering::SeqCst);
            self.running = false;
            Ok(())
        }

        fn is_running(&self) -> bool {
            self.running
        }
    }

    fn session_with(cameras: Vec<CameraDevice>, fail_start: bool) -> (CaptureSession, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let backend = FakeBackend {
            cameras,
            fail_start,
            stalled: false,
            running: false,
            counters: Arc::clone(&counters),
        };
        (CaptureSession::new(Box::new(backend)), counters)
    }

    fn front() -> CameraDevice {
        CameraDevice {
            name: "Front Camera".to_string(),
            path: "pipewire-serial-1".to_string(),
            metadata_path: Some("1".to_string()),
            position: CameraPosition::Front,
        }
    }

    #[test]
    fn test_no_front_camera_is_unavailable() {
        let (session, counters) = session_with(Vec::new(), false);
        session.initialize().unwrap().join().unwrap();

        assert_eq!(session.state(), SessionState::Unavailable);
        assert_eq!(session.last_error(), Some(CameraError::NoFrontCamera));
        assert!(session.capture_photo(PhotoQuality::High).is_none());
        assert_eq!(counters.starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_initialize_runs_and_capture_delivers_once() {
        let (session, _) = session_with(vec![front()], false);
        session.initialize().unwrap().join().unwrap();

        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.device().unwrap().name, "Front Camera");

        let pending = session.capture_photo(PhotoQuality::Medium).unwrap();
        let photo = pending.blocking_wait().unwrap();
        assert_eq!((photo.width, photo.height), (2, 2));
    }

    #[test]
    fn test_initialize_while_running_is_noop() {
        let (session, counters) = session_with(vec![front()], false);
        session.initialize().unwrap().join().unwrap();

        assert!(session.initialize().is_none());
        assert_eq!(counters.starts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_start_failure_stops_session() {
        let (session, _) = session_with(vec![front()], true);
        session.initialize().unwrap().join().unwrap();

        assert_eq!(session.state(), SessionState::Stopped);
        assert!(matches!(session.last_error(), Some(CameraError::StartFailed(_))));
        assert!(session.capture_photo(PhotoQuality::High).is_none());
    }

    #[test]
    fn test_stop_then_reinitialize_restarts() {
        let (session, counters) = session_with(vec![front()], false);
        session.initialize().unwrap().join().unwrap();

        session.stop().unwrap().join().unwrap();
        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(counters.stops.load(Ordering::SeqCst), 1);
        assert!(session.capture_photo(PhotoQuality::High).is_none());

        session.initialize().unwrap().join().unwrap();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(counters.starts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let (session, counters) = session_with(vec![front()], false);
        assert!(session.stop().is_none());
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert_eq!(counters.stops.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_release_stops_unless_kept_warm() {
        let (session, counters) = session_with(vec![front()], false);
        session.initialize().unwrap().join().unwrap();

        assert!(session.release(true).is_none());
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(counters.stops.load(Ordering::SeqCst), 0);

        session.release(false).unwrap().join().unwrap();
        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(counters.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_capture_timeout_is_reported_as_timeout() {
        let counters = Arc::new(Counters::default());
        let backend = FakeBackend {
            cameras: vec![front()],
            fail_start: false,
            stalled: true,
            running: false,
            counters,
        };
        let session = CaptureSession::new(Box::new(backend));
        session.initialize().unwrap().join().unwrap();

        let pending = session.capture_photo(PhotoQuality::High).unwrap();
        assert!(matches!(pending.blocking_wait(), Err(PhotoError::Timeout)));
    }

    #[test]
    fn test_stop_leaves_idle_backend_alone() {
        let (session, counters) = session_with(vec![front()], false);
        session.initialize().unwrap().join().unwrap();
        lock(&session.backend).stop_running().unwrap();
        assert_eq!(counters.stops.load(Ordering::SeqCst), 1);

        session.stop().unwrap().join().unwrap();
        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(counters.stops.load(Ordering::SeqCst), 1);
    }
}
