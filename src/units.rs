//! Unit system conversion layer.
//!
//! Telemetry arrives in SI units (meters, meters per second). Every numeric
//! widget converts through the [`UnitProfile`] selected for the current frame,
//! so all widgets drawn in one frame agree on units and suffixes.
//!
//! # Distance Formatting
//!
//! Distances switch from the short unit to the long unit at
//! `distance_divider`:
//!
//! | Converted value | Output |
//! |-----------------|--------|
//! | `< divider` | integer, truncated, short unit (`"999m"`) |
//! | `>= divider` | value / divider with two decimals, long unit (`"1.50km"`) |

use core::fmt::Write;

use heapless::String;

/// Display unit system selected by configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum UnitSystem {
    /// Meters, kilometers, km/h.
    #[default]
    Metric,
    /// Feet, miles, mph.
    Imperial,
}

/// Conversion factors and suffixes for one unit system.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct UnitProfile {
    /// Multiplier from m/s to the display speed unit.
    pub speed_factor: f32,
    /// Multiplier from meters to the short distance unit.
    pub distance_factor: f32,
    /// Number of short units in one long unit.
    pub distance_divider: f32,
    /// Short distance suffix ("m" / "ft").
    pub short_label: &'static str,
    /// Long distance suffix ("km" / "ml").
    pub long_label: &'static str,
    /// Speed suffix ("km/h" / "mph").
    pub speed_label: &'static str,
}

/// Metric profile.
pub const METRIC: UnitProfile = UnitProfile {
    speed_factor: 3.6,
    distance_factor: 1.0,
    distance_divider: 1000.0,
    short_label: "m",
    long_label: "km",
    speed_label: "km/h",
};

/// Imperial profile. "ml" is the long label the ground station tooling expects.
pub const IMPERIAL: UnitProfile = UnitProfile {
    speed_factor: 2.23,
    distance_factor: 3.28,
    distance_divider: 5280.0,
    short_label: "ft",
    long_label: "ml",
    speed_label: "mph",
};

impl UnitSystem {
    /// Select the conversion profile for this unit system.
    #[inline]
    pub const fn select(self) -> UnitProfile {
        match self {
            Self::Metric => METRIC,
            Self::Imperial => IMPERIAL,
        }
    }
}

impl Default for UnitProfile {
    fn default() -> Self { METRIC }
}

impl UnitProfile {
    /// Convert meters to the short distance unit.
    #[inline]
    pub fn distance(&self, meters: f32) -> f32 { meters * self.distance_factor }

    /// Convert m/s to the display speed unit.
    #[inline]
    pub fn speed(&self, mps: f32) -> f32 { mps * self.speed_factor }

    /// Append a converted distance to `out`, switching to the long unit at
    /// `distance_divider`.
    pub fn write_distance<const N: usize>(&self, out: &mut String<N>, meters: f32) {
        let converted = self.distance(meters);
        if converted < self.distance_divider {
            let _ = write!(out, "{}{}", converted as i32, self.short_label);
        } else {
            let _ = write!(out, "{:.2}{}", converted / self.distance_divider, self.long_label);
        }
    }

    /// Format a distance with an optional text prefix (e.g. `"H: "`).
    pub fn format_distance(&self, prefix: &str, meters: f32) -> String<24> {
        let mut out: String<24> = String::new();
        let _ = out.push_str(prefix);
        self.write_distance(&mut out, meters);
        out
    }
}
