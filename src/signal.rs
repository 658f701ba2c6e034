//! RSSI and link-quality scaling.
//!
//! Both readouts take a raw value from telemetry or from an RC channel and
//! either show it as received or scale it into percent through a calibration
//! window. `rc_lost` is derived here so the warning machine sees the same
//! value whether or not the RSSI widget is on screen.

use crate::config::{SignalConfig, SignalDisplay, SignalSource};
use crate::telemetry::VehicleState;
use crate::thresholds::RC_LOST_PERCENT;

/// Raw signal value selected by `source`. An unset channel reads as zero.
pub fn raw_value(state: &VehicleState, source: SignalSource, telemetry_value: i32) -> i32 {
    match source {
        SignalSource::Telemetry => telemetry_value,
        SignalSource::Channel(ch) => state.channel(ch).map_or(0, i32::from),
    }
}

/// RSSI value as displayed: percent (never negative) or raw.
pub fn rssi_value(state: &VehicleState, cfg: &SignalConfig) -> i32 {
    let raw = raw_value(state, cfg.source, i32::from(state.rssi));
    match cfg.display {
        SignalDisplay::Raw => raw,
        SignalDisplay::Percent => {
            let (min, max) = cfg.effective_window();
            let scaled = if max - min > 0 {
                ((raw - min) as f32 / (max - min) as f32 * 100.0) as i32
            } else {
                raw
            };
            scaled.max(0)
        }
    }
}

/// RC link counts as lost while the RSSI percentage is below
/// [`RC_LOST_PERCENT`]. Raw display never reports a lost link.
pub fn rc_lost(state: &VehicleState, cfg: &SignalConfig) -> bool {
    match cfg.display {
        SignalDisplay::Raw => false,
        SignalDisplay::Percent => rssi_value(state, cfg) < RC_LOST_PERCENT,
    }
}

/// Link quality as displayed.
///
/// Percent mode clamps into `[min, max]` and maps `max` to 100 via
/// `(lq - max) / (max - min) * 100 + 100`. An empty window saturates
/// instead of dividing by zero.
pub fn link_quality_value(state: &VehicleState, cfg: &SignalConfig) -> i32 {
    let raw = raw_value(state, cfg.source, state.link_quality);
    match cfg.display {
        SignalDisplay::Raw => raw,
        SignalDisplay::Percent => {
            let (min, max) = (cfg.min, cfg.max);
            let lq = if raw < min { min } else if raw > max { max } else { raw };
            // float division: 0/0 is NaN (cast to 0), x/0 saturates
            ((lq - max) as f32 / (max - min) as f32 * 100.0) as i32 + 100
        }
    }
}
