// SPDX-License-Identifier: GPL-3.0-only

//! Shutter - A photo capture application for the COSMIC desktop environment
//!
//! This library provides the core functionality for Shutter: camera access,
//! photo capture with a hardware or simulated flash, and an in-memory
//! session gallery with a rotatable viewer.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Main application logic, screen state machines and UI
//! - [`backends`]: Camera, portal and power backends
//! - [`pipelines`]: Photo capture, processing and export
//! - [`flash`]: Flash LEDs and display backlight
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // shutter
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flash;
pub mod i18n;
pub mod pipelines;

// Re-export commonly used types
pub use app::{AppModel, ContextPage, Message};
pub use config::Config;
