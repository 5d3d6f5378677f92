// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for camera capture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Selfie capture session               │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │              ┌──────────────────┐            │
//! │              │     Camera       │            │
//! │              │    (PipeWire)    │            │
//! │              └──────────────────┘            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`camera`]: Camera backend with device enumeration and frame capture

pub mod camera;
