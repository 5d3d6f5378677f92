// SPDX-License-Identifier: GPL-3.0-only

//! Saved color presets
//!
//! ```text
//! ┌──────────────┐  save / delete   ┌─────────────┐  set_data   ┌─────────────┐
//! │  UI (update) │ ───────────────► │ PresetStore │ ──────────► │ ScalarStore │
//! └──────────────┘ ◄─────────────── └─────────────┘ ◄────────── └─────────────┘
//!                    apply                           data (load)
//! ```
//!
//! The whole collection is re-encoded on every mutation and written under a
//! single key. Persistence is best-effort: the in-memory collection is always
//! authoritative for the running process.

pub mod model;
pub mod storage;
pub mod store;

pub use model::{ColorPreset, FillColor};
pub use storage::{FileStore, MemoryStore, ScalarStore};
pub use store::{LoadOutcome, PresetStore};
