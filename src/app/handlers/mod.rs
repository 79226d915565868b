// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! This module organizes message handlers by screen,
//! keeping related functionality together for easier maintenance.

pub mod camera;
pub mod capture;
pub mod permission;
pub mod system;
pub mod ui;
pub mod viewer;
