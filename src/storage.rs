// SPDX-License-Identifier: GPL-3.0-only

//! Photo library the selfie captures are written to

use crate::constants::APP_DIR_NAME;
use crate::errors::PhotoError;
use image::DynamicImage;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Destination for captured photos
pub trait PhotoLibrary: Send + Sync {
    /// Store an image, returning where it went
    fn save_image(&self, image: &DynamicImage) -> Result<PathBuf, PhotoError>;
}

/// Timestamped JPEG files in a directory
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    dir: PathBuf,
    quality: u8,
}

impl DirectoryLibrary {
    pub fn new(dir: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            dir: dir.into(),
            quality,
        }
    }

    /// `~/Pictures/fill-light`, falling back to the home directory
    pub fn default_dir() -> PathBuf {
        dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First free `IMG_<timestamp>[_N].jpg` path
    fn next_path(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let first = self.dir.join(format!("IMG_{}.jpg", timestamp));
        if !first.exists() {
            return first;
        }

        (1u32..)
            .map(|n| self.dir.join(format!("IMG_{}_{}.jpg", timestamp, n)))
            .find(|path| !path.exists())
            .unwrap_or(first)
    }
}

impl PhotoLibrary for DirectoryLibrary {
    fn save_image(&self, image: &DynamicImage) -> Result<PathBuf, PhotoError> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.next_path();
        debug!(path = %path.display(), "Saving photo");

        let file = std::fs::File::create(&path)?;
        let mut writer = std::io::BufWriter::new(file);
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, self.quality);
        image.to_rgb8().write_with_encoder(encoder)?;
        writer.flush()?;

        info!(path = %path.display(), "Photo saved successfully");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_save_creates_directory_and_unique_names() {
        let root = tempfile::tempdir().unwrap();
        let library = DirectoryLibrary::new(root.path().join("photos"), 90);
        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 4));

        let first = library.save_image(&image).unwrap();
        let second = library.save_image(&image).unwrap();

        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
        assert_eq!(first.extension().unwrap(), "jpg");
        assert!(
            first
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("IMG_")
        );
    }

    #[test]
    fn test_default_dir_ends_with_app_name() {
        assert!(DirectoryLibrary::default_dir().ends_with(APP_DIR_NAME));
    }
}
