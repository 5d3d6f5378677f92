// SPDX-License-Identifier: GPL-3.0-only

//! Capture pipelines
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │  JPEG File   │
//! │   (RGBA)     │     │  - Encoding       │     │              │
//! │              │     │  - Decode + save  │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! - [`photo`]: selfie capture session and JPEG encoding

pub mod photo;
