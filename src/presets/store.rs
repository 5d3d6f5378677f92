// SPDX-License-Identifier: GPL-3.0-only

//! Ordered preset collection with write-through persistence

use super::model::{ColorPreset, FillColor};
use super::storage::ScalarStore;
use crate::constants::PRESETS_KEY;
use crate::errors::{PresetError, PresetResult};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of reading the stored collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The blob decoded and replaced the in-memory collection
    Loaded(usize),
    /// Nothing stored yet
    Missing,
    /// The blob did not decode; the in-memory collection was left alone
    Corrupt(PresetError),
}

/// Saved presets, newest last
pub struct PresetStore<S: ScalarStore> {
    presets: Vec<ColorPreset>,
    storage: S,
}

impl<S: ScalarStore> PresetStore<S> {
    /// Create an empty store; call [`PresetStore::load`] to restore saved presets
    pub fn new(storage: S) -> Self {
        Self {
            presets: Vec::new(),
            storage,
        }
    }

    pub fn presets(&self) -> &[ColorPreset] {
        &self.presets
    }

    pub fn get(&self, id: Uuid) -> Option<&ColorPreset> {
        self.presets.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append the live color as a new preset and persist the collection
    ///
    /// The append always takes effect. An `Err` only means the collection
    /// could not be written; memory and disk then differ until the next
    /// successful save or delete.
    pub fn save(&mut self, color: FillColor, brightness: f64) -> PresetResult<()> {
        let preset = ColorPreset::new(color, brightness);
        info!(id = %preset.id(), count = self.presets.len() + 1, "Saving preset");
        self.presets.push(preset);
        self.persist()
    }

    /// Replace the collection with the stored one, if it decodes
    pub fn load(&mut self) -> LoadOutcome {
        let Some(data) = self.storage.data(PRESETS_KEY) else {
            debug!("No stored presets");
            return LoadOutcome::Missing;
        };

        match serde_json::from_slice::<Vec<ColorPreset>>(&data) {
            Ok(presets) => {
                info!(count = presets.len(), "Loaded presets");
                self.presets = presets;
                LoadOutcome::Loaded(self.presets.len())
            }
            Err(e) => {
                let err = PresetError::Decode(e.to_string());
                warn!(error = %err, "Stored presets did not decode, ignoring");
                LoadOutcome::Corrupt(err)
            }
        }
    }

    /// Remove every preset with this id and persist the collection
    ///
    /// An unknown id leaves the collection unchanged and is not an error.
    pub fn delete(&mut self, id: Uuid) -> PresetResult<()> {
        let before = self.presets.len();
        self.presets.retain(|p| p.id() != id);
        info!(%id, removed = before - self.presets.len(), "Deleting preset");
        self.persist()
    }

    /// Color and brightness restored by a preset; no mutation
    pub fn apply(&self, preset: &ColorPreset) -> (FillColor, f64) {
        preset.apply()
    }

    /// Encode the whole collection and write it under the fixed key
    pub fn persist(&mut self) -> PresetResult<()> {
        let encoded = serde_json::to_vec(&self.presets)?;
        self.storage.set_data(PRESETS_KEY, &encoded)
    }
}
