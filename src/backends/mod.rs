// SPDX-License-Identifier: GPL-3.0-only

//! Platform collaborators
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                   │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐   │
//! │  │  Camera  │  │  Portal  │  │  Power   │   │
//! │  │(GStreamer)│ │  (zbus)  │  │(UPower)  │   │
//! │  └──────────┘  └──────────┘  └──────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`camera`]: device enumeration, preview streams and still frames
//! - [`portal`]: camera permission requests and stored decisions
//! - [`power`]: battery level for the simulated front flash

pub mod camera;
pub mod portal;
pub mod power;
