// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! This module organizes message handlers by functional domain,
//! keeping related functionality together for easier maintenance.

pub mod panel;
pub mod presets;
pub mod selfie;
pub mod system;
pub mod ui;
