//! Per-frame telemetry snapshot.
//!
//! [`VehicleState`] is filled by the telemetry layer (MAVLink, link-layer
//! statistics) and handed to the renderer by reference once per frame. The
//! renderer never writes to it. All values are SI: meters, meters per second,
//! degrees.

use heapless::String;

/// Maximum length of a resolved flight mode label.
pub const FLIGHT_MODE_LEN: usize = 16;

/// Number of RC channels carried in [`VehicleState::rc_channels`].
pub const RC_CHANNEL_COUNT: usize = 18;

// =============================================================================
// GPS
// =============================================================================

/// GPS fix type, ordered from worst to best.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum GpsFix {
    #[default]
    NoGps,
    NoFix,
    Fix2D,
    Fix3D,
    Dgps,
    /// Fix types the overlay has no label for (RTK and newer).
    Unsupported,
}

impl GpsFix {
    /// Decode a MAVLink `GPS_FIX_TYPE` value.
    pub const fn from_mavlink(raw: u8) -> Self {
        match raw {
            0 => Self::NoGps,
            1 => Self::NoFix,
            2 => Self::Fix2D,
            3 => Self::Fix3D,
            4 => Self::Dgps,
            _ => Self::Unsupported,
        }
    }

    /// True for 3D fixes and better.
    #[inline]
    pub fn is_3d(self) -> bool { self >= Self::Fix3D }
}

/// One GPS receiver.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GpsInfo {
    pub fix: GpsFix,
    pub satellites: u8,
    /// Horizontal dilution of precision, scaled by 100.
    pub hdop_centi: u16,
    pub latitude: f64,
    pub longitude: f64,
}

/// A surveyed point.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

// =============================================================================
// Power & Radio
// =============================================================================

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Battery {
    pub voltage: f32,
    /// Current draw in centi-amps.
    pub current_centi_amps: i32,
    /// Remaining capacity in percent.
    pub remaining_percent: u8,
    pub consumed_mah: i32,
}

/// Video link-layer statistics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LinkStatus {
    pub lost: bool,
    pub jammed: bool,
    pub rssi: i16,
    pub fec_fixed: u32,
    pub errors: u32,
}

// =============================================================================
// Airframe
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum VehicleClass {
    #[default]
    Multirotor,
    FixedWing,
    Other,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum VtolState {
    /// Not a VTOL, or state not reported.
    #[default]
    Undefined,
    TransitionToFixedWing,
    TransitionToMultirotor,
    Multirotor,
    FixedWing,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Attitude {
    pub roll: f32,
    pub pitch: f32,
    pub heading: f32,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Wind {
    pub speed_mps: f32,
    pub direction_deg: f32,
}

/// Active mission item. Number `0` means no mission is running.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Waypoint {
    pub number: u16,
    pub distance_m: f32,
    pub bearing_deg: i32,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the overlay can show, captured once per frame.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct VehicleState {
    // Position
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_msl: f32,
    pub altitude_relative: f32,
    /// Rangefinder clearance, when a rangefinder is fitted.
    pub bottom_clearance: Option<f32>,

    pub attitude: Attitude,

    // Kinematics
    pub ground_speed: f32,
    pub air_speed: f32,
    pub climb_rate: f32,
    /// Throttle in percent.
    pub throttle: f32,

    pub gps: [GpsInfo; 2],
    pub battery: Battery,

    // Radio
    /// RSSI as reported by the autopilot (0..=255).
    pub rssi: u16,
    /// Raw PWM of RC channels 1..=18, indexed from zero.
    pub rc_channels: [u16; RC_CHANNEL_COUNT],
    pub link_quality: i32,
    pub link: LinkStatus,

    pub flight_mode: String<FLIGHT_MODE_LEN>,
    pub vehicle_class: VehicleClass,
    pub vtol_state: VtolState,
    pub armed: bool,

    pub wind: Wind,
    /// Home position, `None` until the autopilot reports one.
    pub home: Option<GeoPoint>,
    pub waypoint: Waypoint,
    pub total_trip_m: f32,
}

impl VehicleState {
    /// Raw value of RC channel `channel` (1-based).
    pub fn channel(&self, channel: u8) -> Option<u16> {
        let index = usize::from(channel).checked_sub(1)?;
        self.rc_channels.get(index).copied()
    }

    /// True while the airframe flies on its wings: fixed-wing, or a VTOL in
    /// (or transitioning to) forward flight.
    pub fn is_forward_flight(&self) -> bool {
        self.vehicle_class == VehicleClass::FixedWing
            || matches!(self.vtol_state, VtolState::TransitionToFixedWing | VtolState::FixedWing)
    }

    /// Set the flight mode label, truncating to [`FLIGHT_MODE_LEN`].
    pub fn set_flight_mode(&mut self, label: &str) {
        self.flight_mode.clear();
        for c in label.chars() {
            if self.flight_mode.push(c).is_err() {
                break;
            }
        }
    }
}
