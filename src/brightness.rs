// SPDX-License-Identifier: GPL-3.0-only

//! Screen brightness passthrough
//!
//! Reads the backlight level from sysfs and writes it through logind's
//! `SetBrightness`, which works without root and inside a flatpak with
//! system bus access.

use crate::constants::panel;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const BACKLIGHT_ROOT: &str = "/sys/class/backlight";

/// A sysfs backlight device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklightDevice {
    /// Device directory name, e.g. `intel_backlight`
    pub name: String,
    /// Raw value corresponding to full brightness
    pub max: u32,
    path: PathBuf,
}

impl BacklightDevice {
    /// First usable backlight device on this machine
    pub fn detect() -> Option<Self> {
        Self::detect_in(Path::new(BACKLIGHT_ROOT))
    }

    /// First usable backlight device under `root`, sorted by name
    pub fn detect_in(root: &Path) -> Option<Self> {
        let mut dirs: Vec<PathBuf> = std::fs::read_dir(root)
            .ok()?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        dirs.sort();

        dirs.into_iter().find_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            let max = read_u32(&path.join("max_brightness"))?;
            if max == 0 {
                return None;
            }
            debug!(device = %name, max, "Found backlight device");
            Some(Self { name, max, path })
        })
    }

    /// Current brightness as a fraction of the maximum
    pub fn current_fraction(&self) -> Option<f64> {
        read_u32(&self.path.join("brightness")).map(|raw| raw_to_fraction(raw, self.max))
    }
}

fn read_u32(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Convert a raw backlight value to a fraction in 0.0-1.0
pub fn raw_to_fraction(raw: u32, max: u32) -> f64 {
    if max == 0 {
        return panel::DEFAULT_BRIGHTNESS;
    }
    (raw.min(max) as f64) / (max as f64)
}

/// Convert a fraction to a raw backlight value
///
/// Never returns 0: some panels switch the backlight off entirely at 0.
/// Non-finite input maps to full brightness.
pub fn fraction_to_raw(fraction: f64, max: u32) -> u32 {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        1.0
    };
    ((fraction * max as f64).round() as u32).clamp(1, max.max(1))
}

/// Screen brightness at startup, or the default when there is no backlight
pub fn read_current() -> f64 {
    BacklightDevice::detect()
        .and_then(|device| device.current_fraction())
        .unwrap_or(panel::DEFAULT_BRIGHTNESS)
}

/// Set the screen brightness via logind
///
/// Returns `Ok(false)` when the machine has no backlight to control.
pub async fn set_brightness(fraction: f64) -> Result<bool, String> {
    let Some(device) = BacklightDevice::detect() else {
        debug!("No backlight device, ignoring brightness change");
        return Ok(false);
    };
    let raw = fraction_to_raw(fraction, device.max);

    let connection = zbus::Connection::system()
        .await
        .map_err(|e| format!("Failed to connect to system D-Bus: {}", e))?;

    let session = zbus::Proxy::new(
        &connection,
        "org.freedesktop.login1",
        "/org/freedesktop/login1/session/auto",
        "org.freedesktop.login1.Session",
    )
    .await
    .map_err(|e| format!("Failed to create logind session proxy: {}", e))?;

    let result: Result<(), _> = session
        .call("SetBrightness", &("backlight", device.name.as_str(), raw))
        .await;

    match result {
        Ok(()) => {
            info!(device = %device.name, raw, max = device.max, "Screen brightness set");
            Ok(true)
        }
        Err(e) => {
            warn!(device = %device.name, error = %e, "SetBrightness rejected");
            Err(format!("Failed to set brightness: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_to_raw_never_zero() {
        assert_eq!(fraction_to_raw(0.0, 255), 1);
        assert_eq!(fraction_to_raw(-1.0, 255), 1);
        assert_eq!(fraction_to_raw(1.0, 255), 255);
        assert_eq!(fraction_to_raw(7.0, 255), 255);
        assert_eq!(fraction_to_raw(0.5, 100), 50);
    }

    #[test]
    fn test_fraction_to_raw_nan_is_full() {
        assert_eq!(fraction_to_raw(f64::NAN, 400), 400);
    }

    #[test]
    fn test_raw_to_fraction() {
        assert_eq!(raw_to_fraction(50, 100), 0.5);
        assert_eq!(raw_to_fraction(200, 100), 1.0);
        assert_eq!(raw_to_fraction(3, 0), panel::DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn test_detect_in_reads_sysfs_layout() {
        let root = tempfile::tempdir().unwrap();
        let device = root.path().join("acpi_video0");
        std::fs::create_dir(&device).unwrap();
        std::fs::write(device.join("max_brightness"), "400\n").unwrap();
        std::fs::write(device.join("brightness"), "100\n").unwrap();

        let found = BacklightDevice::detect_in(root.path()).unwrap();
        assert_eq!(found.name, "acpi_video0");
        assert_eq!(found.max, 400);
        assert_eq!(found.current_fraction(), Some(0.25));
    }

    #[test]
    fn test_detect_in_skips_zero_max() {
        let root = tempfile::tempdir().unwrap();
        let device = root.path().join("broken");
        std::fs::create_dir(&device).unwrap();
        std::fs::write(device.join("max_brightness"), "0").unwrap();

        assert!(BacklightDevice::detect_in(root.path()).is_none());
    }
}
