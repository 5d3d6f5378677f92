// SPDX-License-Identifier: GPL-3.0-only

//! Fill Light - a screen fill light for the COSMIC desktop
//!
//! The screen becomes a solid, adjustable light source. Colors can be saved as
//! presets, and a selfie mode captures photos from the front camera while the
//! light is on.
//!
//! # Architecture
//!
//! - [`presets`]: color preset model, scalar storage and the preset store
//! - [`backends`]: camera backend abstraction and the PipeWire implementation
//! - [`pipelines`]: selfie capture session and photo encoding
//! - [`storage`]: photo library the captured images are written to
//! - [`brightness`]: screen backlight read/write
//! - [`config`]: user configuration handling
//! - [`app`]: COSMIC application (state, messages, views)

pub mod app;
pub mod backends;
pub mod brightness;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod pipelines;
pub mod presets;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Message, UiMode};
pub use config::Config;
pub use presets::{ColorPreset, FillColor, PresetStore};
