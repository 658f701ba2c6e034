//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, which the `no_std` renderer crate cannot
//! depend on.

use std::time::Duration;

/// Target frame time (~25 FPS, a PAL video frame rate).
pub const FRAME_TIME: Duration = Duration::from_millis(40);

/// Time step of the synthetic flight per frame, in seconds.
pub const SIM_STEP: f32 = 0.04;
