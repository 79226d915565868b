// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines
//!
//! Capture and post-processing run on background workers so the live
//! preview never freezes.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │    Photo     │
//! │   (RGBA)     │     │  - Orientation    │     │  (in memory) │
//! │              │     │  - Downsample     │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```

pub mod photo;
