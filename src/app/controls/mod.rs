// SPDX-License-Identifier: GPL-3.0-only

//! Capture controls module
//!
//! This module handles the buttons drawn over the camera preview:
//! - Capture button (and the spinning icon while a capture runs)
//! - Camera switcher (front/back)
//! - Flash mode toggle

pub mod camera_switcher;
pub mod capture_button;
pub mod flash_button;
