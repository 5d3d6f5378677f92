// SPDX-License-Identifier: GPL-3.0-only

//! Local scalar storage: opaque blobs addressed by a fixed key

use crate::constants::APP_DIR_NAME;
use crate::errors::PresetResult;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key/value storage for small blobs
///
/// Reads never fail: a missing or unreadable entry is simply absent.
pub trait ScalarStore {
    /// Read the blob stored under `key`
    fn data(&self, key: &str) -> Option<Vec<u8>>;

    /// Replace the blob stored under `key`
    fn set_data(&mut self, key: &str, data: &[u8]) -> PresetResult<()>;
}

impl<S: ScalarStore + ?Sized> ScalarStore for Box<S> {
    fn data(&self, key: &str) -> Option<Vec<u8>> {
        (**self).data(key)
    }

    fn set_data(&mut self, key: &str, data: &[u8]) -> PresetResult<()> {
        (**self).set_data(key, data)
    }
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the user's local data directory (`~/.local/share/fill-light`)
    pub fn user_default() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::new(dir.join(APP_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl ScalarStore for FileStore {
    fn data(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read stored entry");
                None
            }
        }
    }

    fn set_data(&mut self, key: &str, data: &[u8]) -> PresetResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so a crash never leaves half a blob
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), bytes = data.len(), "Stored entry");
        Ok(())
    }
}

/// In-process storage, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScalarStore for MemoryStore {
    fn data(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set_data(&mut self, key: &str, data: &[u8]) -> PresetResult<()> {
        self.entries.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.data("ColorPresets").is_none());
    }

    #[test]
    fn test_file_store_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set_data("key", b"first").unwrap();
        store.set_data("key", b"second").unwrap();

        assert_eq!(store.data("key").as_deref(), Some(&b"second"[..]));
        assert!(!store.dir().join("key.json.tmp").exists());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.set_data("a", b"1").unwrap();
        assert_eq!(store.data("a"), Some(b"1".to_vec()));
        assert_eq!(store.data("b"), None);
    }
}
