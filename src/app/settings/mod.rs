// SPDX-License-Identifier: GPL-3.0-only

//! Settings UI module
//!
//! Settings drawer: appearance, camera behavior, photo quality.

pub mod view;
