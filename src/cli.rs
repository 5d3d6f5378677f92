// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Taking a selfie through the capture session
//! - Managing saved color presets

use cosmic::cosmic_config::{self, CosmicConfigEntry};
use fill_light::app::AppModel;
use fill_light::backends::camera::{self, pipewire::enumerate_pipewire_cameras};
use fill_light::config::Config;
use fill_light::errors::{AppError, AppResult, CameraError};
use fill_light::pipelines::photo::{self, CaptureSession, SessionState};
use fill_light::presets::PresetStore;
use fill_light::presets::storage::FileStore;
use fill_light::presets::store::LoadOutcome;
use fill_light::storage::{DirectoryLibrary, PhotoLibrary};
use fill_light::{FillColor, constants::PhotoQuality};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Parse a finite value in 0.0..=1.0
pub fn unit_interval(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if parsed.is_finite() && (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("{} is outside 0.0-1.0", value))
    }
}

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize GStreamer
    gstreamer::init()?;

    let cameras = enumerate_pipewire_cameras().unwrap_or_default();

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    let selfie = camera::types::select_front_camera(&cameras);

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        let marker = if selfie.as_ref() == Some(camera) {
            " (selfie)"
        } else {
            ""
        };
        println!("  [{}] {}{}", index, camera.name, marker);
        println!("      Facing: {}", camera.position);
        if !camera.path.is_empty() {
            println!("      Target: {}", camera.path);
        }
        if let Some(node) = &camera.metadata_path {
            println!("      Node:   {}", node);
        }
        println!();
    }

    Ok(())
}

/// Photo quality from the user's settings, or the default
fn configured_quality() -> PhotoQuality {
    use cosmic::Application;

    cosmic_config::Config::new(AppModel::APP_ID, Config::VERSION)
        .ok()
        .map(|handler| match Config::get_entry(&handler) {
            Ok(config) => config,
            Err((_, config)) => config,
        })
        .unwrap_or_default()
        .photo_quality
}

/// Start the capture session and wait until it settles
fn start_selfie_session() -> AppResult<CaptureSession> {
    let session = CaptureSession::new(camera::get_backend());
    if let Some(handle) = session.initialize() {
        handle
            .join()
            .map_err(|_| AppError::Other("Capture session thread panicked".to_string()))?;
    }

    match session.state() {
        SessionState::Running => Ok(session),
        SessionState::Unavailable => Err(CameraError::NoFrontCamera.into()),
        _ => Err(session
            .last_error()
            .unwrap_or(CameraError::NotRunning)
            .into()),
    }
}

/// Take a selfie with the front camera
pub fn take_photo(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize GStreamer
    gstreamer::init()?;

    // Determine output directory
    let output_dir = match output.as_ref() {
        Some(path) if path.is_dir() => path.clone(),
        Some(path) => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
        None => DirectoryLibrary::default_dir(),
    };

    let session = start_selfie_session()?;
    if let Some(device) = session.device() {
        println!("Using camera: {}", device.name);
    }

    let quality = configured_quality();
    let pending = session
        .capture_photo(quality)
        .ok_or(AppError::Camera(CameraError::NotRunning))?;

    println!("Capturing...");
    let library: Arc<dyn PhotoLibrary> =
        Arc::new(DirectoryLibrary::new(output_dir, quality.jpeg_quality()));
    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(photo::complete_capture(pending, library));

    if let Some(handle) = session.stop() {
        let _ = handle.join();
    }

    let saved = saved.ok_or_else(|| AppError::Other("Failed to capture photo".to_string()))?;

    // If user specified a specific filename, rename the file
    if let Some(user_path) = output
        && !user_path.is_dir()
    {
        std::fs::rename(&saved, &user_path)?;
        println!("Photo saved: {}", user_path.display());
        return Ok(());
    }

    println!("Photo saved: {}", saved.display());
    Ok(())
}

/// Open the user's preset store
fn open_presets() -> Result<PresetStore<FileStore>, Box<dyn std::error::Error>> {
    let storage = FileStore::user_default().ok_or("No local data directory")?;
    let mut presets = PresetStore::new(storage);
    if let LoadOutcome::Corrupt(e) = presets.load() {
        eprintln!("Warning: {}", e);
    }
    Ok(presets)
}

/// Print saved presets in order
pub fn list_presets() -> Result<(), Box<dyn std::error::Error>> {
    let presets = open_presets()?;

    if presets.is_empty() {
        println!("No presets saved.");
        return Ok(());
    }

    for preset in presets.presets() {
        println!(
            "{}  red {:.2}  green {:.2}  blue {:.2}  alpha {:.2}  brightness {:.2}",
            preset.id(),
            preset.red,
            preset.green,
            preset.blue,
            preset.alpha,
            preset.brightness
        );
    }
    Ok(())
}

/// Append a preset and persist the collection
pub fn add_preset(
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
    brightness: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut presets = open_presets()?;
    presets.save(FillColor::new(red, green, blue, alpha), brightness)?;

    if let Some(preset) = presets.presets().last() {
        println!("Saved preset {}", preset.id());
    }
    Ok(())
}

/// Remove a preset by id
pub fn remove_preset(id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    let mut presets = open_presets()?;
    if presets.get(id).is_none() {
        println!("No preset with id {}", id);
        return Ok(());
    }

    presets.delete(id)?;
    println!("Removed preset {}", id);
    Ok(())
}
