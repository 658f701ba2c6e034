//! Telemetry on-screen display renderer for FPV video overlays.
//!
//! This library turns one [`VehicleState`](telemetry::VehicleState) snapshot
//! per video frame into drawing calls on any `embedded-graphics`
//! [`DrawTarget`](embedded_graphics::draw_target::DrawTarget) with `Rgb565`
//! pixels. The host application owns the frame buffer, the telemetry link and
//! the configuration store; this crate only decides what goes where.
//!
//! # Frame Pipeline
//!
//! ```text
//! VehicleState + OsdConfig + FrameClock
//!         │
//!         ▼
//! render_frame(&mut RenderContext, canvas, ...)
//!   ├─ select unit profile
//!   ├─ clamp panel cursor
//!   ├─ widgets (fixed order, each gated by enable flag + panel mask)
//!   ├─ panel-change indicator
//!   ├─ warning machine
//!   ├─ message log
//!   └─ canvas.flip()
//! ```
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), while the library itself
//! stays `no_std` so it can be linked into firmware.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Configuration
pub mod config;
pub mod thresholds;

// Pure logic (no drawing)
pub mod navigation;
pub mod panels;
pub mod signal;
pub mod telemetry;
pub mod units;
pub mod warnings;

// Layout and geometry
pub mod compass;
pub mod polygon;
pub mod shapes;
pub mod vscale;

// Rendering
pub mod canvas;
pub mod colors;
pub mod messages;
pub mod render;
pub mod styles;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use canvas::{FrameClock, OsdCanvas, TimeOfDay};
pub use config::{ConfigError, OsdConfig};
pub use render::{RenderContext, render_frame};
pub use telemetry::VehicleState;
