//! Rotating warning state machine.
//!
//! Ten alarm conditions are evaluated every frame in a fixed order. At most
//! one message is on screen at a time; when several conditions hold, the
//! machine walks round-robin through the active ones, advancing at most once
//! per [`WARNING_ROTATION_MS`].
//!
//! # State Transitions
//!
//! ```text
//!            any active, timer due
//!   Idle ───────────────────────────► Showing(slot)
//!    ▲                                   │  │
//!    │ nothing active (same frame)       │  │ timer due: next active
//!    └───────────────────────────────────┘  │ slot after `slot`
//!                                           ▼
//!                                     Showing(next)
//! ```
//!
//! A message is never pre-empted inside its rotation window, not even by a
//! condition earlier in the order.

use crate::config::{AltitudeSource, OsdConfig, SpeedSource};
use crate::signal;
use crate::telemetry::VehicleState;
use crate::thresholds::WARNING_ROTATION_MS;
use crate::units::UnitProfile;

/// Alarm conditions in evaluation and rotation order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WarningSlot {
    NoGpsFix,
    LowBattery,
    UnderSpeed,
    OverSpeed,
    LowAltitude,
    HighAltitude,
    NoHome,
    RcLost,
    LinkLost,
    LinkJammed,
}

impl WarningSlot {
    pub const COUNT: usize = 10;

    pub const ALL: [Self; Self::COUNT] = [
        Self::NoGpsFix,
        Self::LowBattery,
        Self::UnderSpeed,
        Self::OverSpeed,
        Self::LowAltitude,
        Self::HighAltitude,
        Self::NoHome,
        Self::RcLost,
        Self::LinkLost,
        Self::LinkJammed,
    ];

    /// Fixed on-screen text.
    pub const fn text(self) -> &'static str {
        match self {
            Self::NoGpsFix => "NO GPS FIX",
            Self::LowBattery => "LOW BATTERY",
            Self::UnderSpeed => "SPEED LOW",
            Self::OverSpeed => "OVER SPEED",
            Self::LowAltitude => "LOW ALT",
            Self::HighAltitude => "HIGH ALT",
            Self::NoHome => "NO HOME POSITION SET",
            Self::RcLost => "RC LOST",
            Self::LinkLost => "WFB LOST",
            Self::LinkJammed => "WFB JAMMED",
        }
    }

    #[inline]
    const fn index(self) -> usize { self as usize }
}

// =============================================================================
// Condition Evaluation
// =============================================================================

/// Set of conditions active in one frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ActiveWarnings([bool; WarningSlot::COUNT]);

impl ActiveWarnings {
    pub const fn none() -> Self { Self([false; WarningSlot::COUNT]) }

    #[inline]
    pub fn set(&mut self, slot: WarningSlot, active: bool) { self.0[slot.index()] = active; }

    #[inline]
    pub fn is_active(&self, slot: WarningSlot) -> bool { self.0[slot.index()] }

    #[inline]
    pub fn any(&self) -> bool { self.0.iter().any(|a| *a) }

    /// Build a set from a list of active slots.
    pub fn from_slots(slots: &[WarningSlot]) -> Self {
        let mut set = Self::none();
        for slot in slots {
            set.set(*slot, true);
        }
        set
    }
}

/// Evaluate every alarm condition for this frame.
///
/// Speed limits compare in display units, altitude limits in meters.
pub fn evaluate(state: &VehicleState, config: &OsdConfig, units: &UnitProfile) -> ActiveWarnings {
    let alarms = &config.alarms;
    let mut active = ActiveWarnings::none();

    active.set(WarningSlot::NoGpsFix, alarms.gps_status && !state.gps[0].fix.is_3d());
    active.set(
        WarningSlot::LowBattery,
        alarms.low_battery.is_some_and(|limit| state.battery.remaining_percent < limit),
    );

    let speed = units.speed(match config.speed_source {
        SpeedSource::Ground => state.ground_speed,
        SpeedSource::Air => state.air_speed,
    });
    active.set(WarningSlot::UnderSpeed, alarms.low_speed.is_some_and(|limit| speed < limit));
    active.set(WarningSlot::OverSpeed, alarms.over_speed.is_some_and(|limit| speed > limit));

    let altitude = match config.altitude_source {
        AltitudeSource::Msl => state.altitude_msl,
        AltitudeSource::Relative => state.altitude_relative,
    };
    active.set(WarningSlot::LowAltitude, alarms.low_altitude.is_some_and(|limit| altitude < limit));
    active.set(WarningSlot::HighAltitude, alarms.high_altitude.is_some_and(|limit| altitude > limit));

    active.set(WarningSlot::NoHome, state.home.is_none());
    active.set(WarningSlot::RcLost, alarms.rc_status && signal::rc_lost(state, &config.rssi_signal));
    active.set(WarningSlot::LinkLost, alarms.link_status && state.link.lost);
    active.set(WarningSlot::LinkJammed, alarms.link_status && state.link.jammed);

    active
}

// =============================================================================
// Rotation
// =============================================================================

/// Round-robin selector of the warning on screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WarningMachine {
    /// Last slot shown; rotation resumes after it, also after an idle spell.
    last_index: Option<usize>,
    /// When the message last changed; `None` makes the next update due.
    changed_at: Option<u64>,
    current: Option<WarningSlot>,
}

impl WarningMachine {
    pub const fn new() -> Self {
        Self {
            last_index: None,
            changed_at: None,
            current: None,
        }
    }

    /// Slot on screen, `None` while idle.
    #[inline]
    pub const fn current(&self) -> Option<WarningSlot> { self.current }

    /// Text on screen, empty while idle.
    pub fn text(&self) -> &'static str { self.current.map_or("", WarningSlot::text) }

    /// Advance the machine for one frame.
    pub fn update(&mut self, active: &ActiveWarnings, now_ms: u64) -> Option<WarningSlot> {
        if !active.any() {
            if let Some(slot) = self.current.take() {
                log::info!("warning cleared: {}", slot.text());
            }
            self.changed_at = None;
            return None;
        }

        let due = self
            .changed_at
            .is_none_or(|at| now_ms.saturating_sub(at) >= WARNING_ROTATION_MS);
        if !due {
            return self.current;
        }

        let start = self.last_index.map_or(0, |i| i + 1);
        for step in 0..WarningSlot::COUNT {
            let index = (start + step) % WarningSlot::COUNT;
            let slot = WarningSlot::ALL[index];
            if active.is_active(slot) {
                if self.current != Some(slot) {
                    log::info!("warning: {}", slot.text());
                }
                self.last_index = Some(index);
                self.current = Some(slot);
                self.changed_at = Some(now_ms);
                break;
            }
        }
        self.current
    }
}
