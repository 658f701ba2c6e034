//! Centralized timing and alarm threshold constants.
//!
//! Values that are part of the overlay's behaviour rather than its layout live
//! here, next to `const` assertions that fail compilation when they are
//! configured inconsistently. Per-flight alarm limits (low battery, speed and
//! altitude windows) are runtime configuration, see
//! [`AlarmConfig`](crate::config::AlarmConfig).

// =============================================================================
// Timers
// =============================================================================

/// Minimum time a warning message stays on screen before the next active
/// warning is rotated in.
pub const WARNING_ROTATION_MS: u64 = 1000;

/// How long the "P n" indicator stays visible after the panel changes.
pub const PANEL_INDICATOR_MS: u64 = 3000;

const _: () = assert!(WARNING_ROTATION_MS < PANEL_INDICATOR_MS);

// =============================================================================
// Panels
// =============================================================================

/// Highest panel number a `u16` panel mask can address.
pub const MAX_PANEL_COUNT: u8 = 16;

// =============================================================================
// Scale Floors
// =============================================================================

/// Altitude (display units) at or below which altitude ticks turn red.
pub const ALTITUDE_FLOOR: i32 = 10;

/// Airspeed (display units) at or below which airspeed ticks turn red.
/// Only applied to fixed-wing and VTOL forward flight.
pub const AIRSPEED_FLOOR: i32 = 15;

/// Ground speed floor. Below zero so no tick is ever flagged.
pub const GROUNDSPEED_FLOOR: i32 = -1;

const _: () = assert!(GROUNDSPEED_FLOOR < 0);
const _: () = assert!(AIRSPEED_FLOOR > 0);

// =============================================================================
// Battery & Link
// =============================================================================

/// Remaining capacity (%) below which the remaining readout turns red.
pub const BATTERY_LOW_PERCENT: u8 = 20;

/// RSSI percentage below which the RC link counts as lost.
pub const RC_LOST_PERCENT: i32 = 5;

/// Upper bound for the MAVLink RSSI calibration window.
pub const MAVLINK_RSSI_MAX: u16 = 255;

const _: () = assert!(BATTERY_LOW_PERCENT <= 100);
const _: () = assert!(RC_LOST_PERCENT < 100);

// =============================================================================
// Navigation
// =============================================================================

/// Climb rates with a smaller magnitude (m/s) are not drawn.
pub const CLIMB_DEADBAND: f32 = 0.1;

/// Home and waypoint glyphs on the compass rose are hidden closer than this (m).
pub const ROSE_MARKER_MIN_DISTANCE_M: f32 = 1.0;
