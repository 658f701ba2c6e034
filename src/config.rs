//! Layout constants and runtime overlay configuration.
//!
//! # Compile-time Layout
//!
//! Screen geometry and the fixed parameters of the linear compass and the
//! vertical scales are `const`, so no widget recomputes them per frame.
//!
//! # Runtime Configuration
//!
//! [`OsdConfig`] is the record the host loads from its configuration store.
//! Every widget has one [`WidgetConfig`] carrying its enable flag, panel mask,
//! anchor, alignment and font size. The renderer never fails on a bad record:
//! out-of-range values are clamped where they are used. [`OsdConfig::validate`]
//! exists so the host can report a bad record once at start-up.
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `enabled` | widget is drawn at all |
//! | `panel_mask` | bit `n - 1` set means "shown on panel n" |
//! | `position` | anchor point, interpreted per widget |
//! | `align` | horizontal text alignment at the anchor |
//! | `font` | small / normal / large |

use embedded_graphics::prelude::Point;
use embedded_graphics::text::Alignment;
use thiserror::Error;

use crate::polygon::Viewport;
use crate::thresholds::{MAVLINK_RSSI_MAX, MAX_PANEL_COUNT};
use crate::units::UnitSystem;

// =============================================================================
// Display Configuration
// =============================================================================

/// Overlay width in pixels (16:9 analog-style OSD raster).
pub const SCREEN_WIDTH: u32 = 480;

/// Overlay height in pixels.
pub const SCREEN_HEIGHT: u32 = 270;

/// Screen center X coordinate.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

/// Baseline row of the "P n" panel indicator.
pub const PANEL_INDICATOR_Y: i32 = 210;

/// Vertical distance between two message log lines.
pub const MESSAGE_LINE_PITCH: i32 = 12;

// =============================================================================
// Linear Compass Geometry
// =============================================================================

/// Degrees visible across the linear compass.
pub const COMPASS_RANGE: i32 = 120;

/// Pixel width of the linear compass.
pub const COMPASS_WIDTH: i32 = 180;

/// Heading step between minor ticks (degrees).
pub const COMPASS_MINOR_STEP: i32 = 15;

/// Heading step between labelled major ticks (degrees).
pub const COMPASS_MAJOR_STEP: i32 = 30;

pub const COMPASS_MINOR_LEN: i32 = 5;
pub const COMPASS_MAJOR_LEN: i32 = 8;

// =============================================================================
// Vertical Scale Geometry
// =============================================================================

/// Value units visible across a vertical scale.
pub const VSCALE_RANGE: i32 = 60;

/// Pixel height of a vertical scale.
pub const VSCALE_HEIGHT: i32 = 130;

pub const VSCALE_MINOR_STEP: i32 = 5;
pub const VSCALE_MAJOR_STEP: i32 = 10;
pub const VSCALE_MINOR_LEN: i32 = 5;
pub const VSCALE_MAJOR_LEN: i32 = 8;
pub const VSCALE_BOUND_LEN: i32 = 11;

// =============================================================================
// Widget Configuration
// =============================================================================

/// Font size class selectable per widget.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

/// Placement and visibility of one widget.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WidgetConfig {
    pub enabled: bool,
    pub panel_mask: u16,
    pub position: Point,
    pub align: Alignment,
    pub font: FontSize,
}

impl WidgetConfig {
    /// Enabled widget on panel 1, left aligned, normal font.
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            enabled: true,
            panel_mask: 0x0001,
            position: Point::new(x, y),
            align: Alignment::Left,
            font: FontSize::Normal,
        }
    }

    pub const fn aligned(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub const fn sized(mut self, font: FontSize) -> Self {
        self.font = font;
        self
    }

    pub const fn on_panels(mut self, panel_mask: u16) -> Self {
        self.panel_mask = panel_mask;
        self
    }

    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Default for WidgetConfig {
    fn default() -> Self { Self::at(0, 0).disabled() }
}

// =============================================================================
// Widget Variants
// =============================================================================

/// Altitude fed to the altitude scale and the altitude alarms when no bottom
/// clearance is available.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AltitudeSource {
    /// Altitude above mean sea level ("AMSL").
    Msl,
    /// Altitude relative to home ("RALT").
    #[default]
    Relative,
}

/// Speed compared against the speed alarm window.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SpeedSource {
    #[default]
    Ground,
    Air,
}

/// Attitude indicator flavour.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AttitudeStyle {
    /// Clipped horizon with roll scale and aircraft symbol.
    #[default]
    Radar,
    /// Reticle with a pitch ladder.
    Simple,
}

/// Throttle widget flavour.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThrottleStyle {
    #[default]
    VerticalBar,
    HorizontalBar,
    /// Text only, no bar.
    Text,
}

/// Where a radio signal value is read from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SignalSource {
    /// Value reported by the autopilot telemetry.
    #[default]
    Telemetry,
    /// Raw PWM of an RC channel (5..=16).
    Channel(u8),
}

/// How a radio signal value is shown.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SignalDisplay {
    /// Scaled into percent through the calibration window.
    #[default]
    Percent,
    /// Shown as received.
    Raw,
}

/// Source and calibration of an RSSI or link-quality readout.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SignalConfig {
    pub source: SignalSource,
    pub display: SignalDisplay,
    pub min: i32,
    pub max: i32,
}

impl SignalConfig {
    /// Lowest RC channel that can carry a signal value.
    pub const FIRST_CHANNEL: u8 = 5;
    /// Highest RC channel that can carry a signal value.
    pub const LAST_CHANNEL: u8 = 16;

    /// Calibration window actually used, with the telemetry RSSI window
    /// trimmed to `0..=255`.
    pub fn effective_window(&self) -> (i32, i32) {
        match self.source {
            SignalSource::Telemetry => (self.min.max(0), self.max.min(i32::from(MAVLINK_RSSI_MAX))),
            SignalSource::Channel(_) => (self.min, self.max),
        }
    }
}

/// Radii of the map-style compass rose.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CompassRoseConfig {
    pub radius: u32,
    pub home_radius: f32,
    pub waypoint_radius: f32,
}

/// Per-widget configuration of one GPS receiver.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GpsWidgets {
    pub status: WidgetConfig,
    pub hdop: WidgetConfig,
    pub latitude: WidgetConfig,
    pub longitude: WidgetConfig,
}

// =============================================================================
// Alarm Configuration
// =============================================================================

/// Warning enables and thresholds.
///
/// `None` disables a threshold alarm. Speed limits are in display speed
/// units, altitude limits in meters.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AlarmConfig {
    pub gps_status: bool,
    pub low_battery: Option<u8>,
    pub low_speed: Option<f32>,
    pub over_speed: Option<f32>,
    pub low_altitude: Option<f32>,
    pub high_altitude: Option<f32>,
    pub rc_status: bool,
    pub link_status: bool,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            gps_status: true,
            low_battery: Some(20),
            low_speed: None,
            over_speed: None,
            low_altitude: None,
            high_altitude: None,
            rc_status: true,
            link_status: true,
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Inconsistency found by [`OsdConfig::validate`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("panel count {got} outside 1..={max}")]
    PanelCount { got: u8, max: u8 },

    #[error("{signal} calibration window is empty (min {min}, max {max})")]
    EmptyCalibration { signal: &'static str, min: i32, max: i32 },

    #[error("{signal} reads RC channel {channel}, expected 5..=16")]
    InvalidChannel { signal: &'static str, channel: u8 },

    #[error("{what} alarm window is inverted (low {low}, high {high})")]
    InvertedAlarm { what: &'static str, low: f32, high: f32 },

    #[error("attitude scale must be positive, got {0}")]
    AttitudeScale(f32),
}

// =============================================================================
// Overlay Configuration
// =============================================================================

/// Complete runtime configuration of the overlay.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct OsdConfig {
    pub units: UnitSystem,
    pub max_panels: u8,

    pub flight_mode: WidgetConfig,
    pub arm_state: WidgetConfig,

    pub battery_voltage: WidgetConfig,
    pub battery_current: WidgetConfig,
    pub battery_remaining: WidgetConfig,
    pub battery_consumed: WidgetConfig,

    pub altitude_scale: WidgetConfig,
    pub altitude_source: AltitudeSource,
    pub absolute_altitude: WidgetConfig,
    pub relative_altitude: WidgetConfig,

    pub speed_scale: WidgetConfig,
    pub speed_source: SpeedSource,
    pub ground_speed: WidgetConfig,
    pub air_speed: WidgetConfig,

    pub home_direction: WidgetConfig,
    pub attitude: WidgetConfig,
    pub attitude_style: AttitudeStyle,
    pub attitude_scale: f32,

    pub throttle: WidgetConfig,
    pub throttle_style: ThrottleStyle,

    pub home_latitude: WidgetConfig,
    pub home_longitude: WidgetConfig,
    pub gps: [GpsWidgets; 2],

    pub total_trip: WidgetConfig,
    pub time: WidgetConfig,

    pub home_distance: WidgetConfig,
    pub waypoint_distance: WidgetConfig,
    pub compass_rose: WidgetConfig,
    pub rose: CompassRoseConfig,
    /// Only the Y coordinate is used; the compass is always centered.
    pub linear_compass: WidgetConfig,

    pub climb_rate: WidgetConfig,
    pub rssi: WidgetConfig,
    pub rssi_signal: SignalConfig,
    pub link_state: WidgetConfig,
    pub link_quality: WidgetConfig,
    pub link_quality_signal: SignalConfig,
    pub efficiency: WidgetConfig,
    pub wind: WidgetConfig,

    /// Placement of the warning line. Warnings ignore the enable flag and
    /// panel mask; they are controlled by [`AlarmConfig`].
    pub warning: WidgetConfig,
    pub alarms: AlarmConfig,

    pub messages: WidgetConfig,
}

impl Default for OsdConfig {
    fn default() -> Self {
        let right = SCREEN_WIDTH as i32 - 8;
        Self {
            units: UnitSystem::Metric,
            max_panels: 2,

            flight_mode: WidgetConfig::at(8, 8),
            arm_state: WidgetConfig::at(8, 20),

            battery_voltage: WidgetConfig::at(8, 226),
            battery_current: WidgetConfig::at(8, 238),
            battery_remaining: WidgetConfig::at(8, 250),
            battery_consumed: WidgetConfig::at(64, 250),

            altitude_scale: WidgetConfig::at(right - 32, CENTER_Y).aligned(Alignment::Right),
            altitude_source: AltitudeSource::Relative,
            absolute_altitude: WidgetConfig::at(right, 8).aligned(Alignment::Right).on_panels(0x0002),
            relative_altitude: WidgetConfig::at(right, 8).aligned(Alignment::Right),

            speed_scale: WidgetConfig::at(40, CENTER_Y),
            speed_source: SpeedSource::Ground,
            ground_speed: WidgetConfig::at(8, 32),
            air_speed: WidgetConfig::at(8, 44).disabled(),

            home_direction: WidgetConfig::at(CENTER_X, 72),
            attitude: WidgetConfig::at(CENTER_X, CENTER_Y),
            attitude_style: AttitudeStyle::Radar,
            attitude_scale: 1.0,

            throttle: WidgetConfig::at(112, 214).sized(FontSize::Small),
            throttle_style: ThrottleStyle::VerticalBar,

            home_latitude: WidgetConfig::at(right, 226).aligned(Alignment::Right).on_panels(0x0002),
            home_longitude: WidgetConfig::at(right, 238).aligned(Alignment::Right).on_panels(0x0002),
            gps: [
                GpsWidgets {
                    status: WidgetConfig::at(8, 56).on_panels(0x0003),
                    hdop: WidgetConfig::at(8, 68),
                    latitude: WidgetConfig::at(right, 226).aligned(Alignment::Right),
                    longitude: WidgetConfig::at(right, 238).aligned(Alignment::Right),
                },
                GpsWidgets {
                    status: WidgetConfig::at(8, 80).on_panels(0x0002),
                    hdop: WidgetConfig::at(8, 92).on_panels(0x0002),
                    latitude: WidgetConfig::at(right, 202).aligned(Alignment::Right).on_panels(0x0002),
                    longitude: WidgetConfig::at(right, 214).aligned(Alignment::Right).on_panels(0x0002),
                },
            ],

            total_trip: WidgetConfig::at(CENTER_X, 250).aligned(Alignment::Center),
            time: WidgetConfig::at(right, 20).aligned(Alignment::Right),

            home_distance: WidgetConfig::at(8, 104),
            waypoint_distance: WidgetConfig::at(8, 116),
            compass_rose: WidgetConfig::at(right - 80, 72).on_panels(0x0002),
            rose: CompassRoseConfig { radius: 30, home_radius: 24.0, waypoint_radius: 18.0 },
            linear_compass: WidgetConfig::at(CENTER_X, 24),

            climb_rate: WidgetConfig::at(right - 110, CENTER_Y),
            rssi: WidgetConfig::at(120, 8),
            rssi_signal: SignalConfig {
                source: SignalSource::Telemetry,
                display: SignalDisplay::Percent,
                min: 0,
                max: 255,
            },
            link_state: WidgetConfig::at(120, 20),
            link_quality: WidgetConfig::at(120, 36).disabled(),
            link_quality_signal: SignalConfig {
                source: SignalSource::Channel(8),
                display: SignalDisplay::Percent,
                min: 1000,
                max: 2000,
            },
            efficiency: WidgetConfig::at(CENTER_X, 238).aligned(Alignment::Center).on_panels(0x0002),
            wind: WidgetConfig::at(right - 100, 226),

            warning: WidgetConfig::at(CENTER_X, 176).aligned(Alignment::Center).sized(FontSize::Large),
            alarms: AlarmConfig::default(),

            messages: WidgetConfig::at(128, 150),
        }
    }
}

impl OsdConfig {
    /// Check the record for values the renderer would have to clamp.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_panels == 0 || self.max_panels > MAX_PANEL_COUNT {
            return Err(ConfigError::PanelCount { got: self.max_panels, max: MAX_PANEL_COUNT });
        }

        validate_signal("RSSI", &self.rssi_signal)?;
        validate_signal("link quality", &self.link_quality_signal)?;

        if let (Some(low), Some(high)) = (self.alarms.low_speed, self.alarms.over_speed) {
            if low >= high {
                return Err(ConfigError::InvertedAlarm { what: "speed", low, high });
            }
        }
        if let (Some(low), Some(high)) = (self.alarms.low_altitude, self.alarms.high_altitude) {
            if low >= high {
                return Err(ConfigError::InvertedAlarm { what: "altitude", low, high });
            }
        }

        if !(self.attitude_scale > 0.0) {
            return Err(ConfigError::AttitudeScale(self.attitude_scale));
        }

        Ok(())
    }

    /// Clip window of the radar horizon, derived from the attitude anchor and
    /// scale.
    pub fn attitude_clip(&self) -> Viewport {
        let p = self.attitude.position;
        let s = self.attitude_scale;
        Viewport {
            min_x: p.x - (22.0 * s) as i32,
            min_y: p.y - (30.0 * s) as i32,
            max_x: p.x + (22.0 * s) as i32,
            max_y: p.y + (34.0 * s) as i32,
        }
    }
}

fn validate_signal(signal: &'static str, cfg: &SignalConfig) -> Result<(), ConfigError> {
    if let SignalSource::Channel(channel) = cfg.source {
        if !(SignalConfig::FIRST_CHANNEL..=SignalConfig::LAST_CHANNEL).contains(&channel) {
            return Err(ConfigError::InvalidChannel { signal, channel });
        }
    }
    if cfg.display == SignalDisplay::Percent {
        let (min, max) = cfg.effective_window();
        if min >= max {
            return Err(ConfigError::EmptyCalibration { signal, min, max });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(OsdConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_center_constants() {
        assert_eq!(CENTER_X, 240);
        assert_eq!(CENTER_Y, 135);
    }

    // -------------------------------------------------------------------------
    // WidgetConfig builders
    // -------------------------------------------------------------------------

    #[test]
    fn test_widget_builders() {
        let w = WidgetConfig::at(10, 20)
            .aligned(Alignment::Right)
            .sized(FontSize::Large)
            .on_panels(0b110);
        assert!(w.enabled);
        assert_eq!(w.position, Point::new(10, 20));
        assert_eq!(w.align, Alignment::Right);
        assert_eq!(w.font, FontSize::Large);
        assert_eq!(w.panel_mask, 0b110);
        assert!(!w.disabled().enabled);
    }

    #[test]
    fn test_widget_default_is_disabled() {
        assert!(!WidgetConfig::default().enabled);
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_validate_panel_count() {
        let mut cfg = OsdConfig::default();
        cfg.max_panels = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::PanelCount { got: 0, max: 16 }));
        cfg.max_panels = 17;
        assert!(cfg.validate().is_err());
        cfg.max_panels = 16;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_channel_range() {
        let mut cfg = OsdConfig::default();
        cfg.rssi_signal.source = SignalSource::Channel(4);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidChannel { signal: "RSSI", channel: 4 })
        );
        cfg.rssi_signal.source = SignalSource::Channel(16);
        cfg.rssi_signal.min = 1000;
        cfg.rssi_signal.max = 2000;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_calibration() {
        let mut cfg = OsdConfig::default();
        cfg.link_quality_signal.min = 2000;
        cfg.link_quality_signal.max = 2000;
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyCalibration { .. })));

        // raw display does not use the window
        cfg.link_quality_signal.display = SignalDisplay::Raw;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_alarm() {
        let mut cfg = OsdConfig::default();
        cfg.alarms.low_altitude = Some(100.0);
        cfg.alarms.high_altitude = Some(50.0);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvertedAlarm { what: "altitude", .. })));
    }

    #[test]
    fn test_validate_attitude_scale() {
        let mut cfg = OsdConfig::default();
        cfg.attitude_scale = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::AttitudeScale(0.0)));
        cfg.attitude_scale = f32::NAN;
        assert!(cfg.validate().is_err(), "NaN scale must be rejected");
    }

    #[test]
    fn test_error_messages() {
        let e = ConfigError::PanelCount { got: 0, max: 16 };
        assert_eq!(format!("{e}"), "panel count 0 outside 1..=16");
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    #[test]
    fn test_telemetry_rssi_window_is_trimmed() {
        let sig = SignalConfig {
            source: SignalSource::Telemetry,
            display: SignalDisplay::Percent,
            min: -10,
            max: 400,
        };
        assert_eq!(sig.effective_window(), (0, 255));

        let chan = SignalConfig { source: SignalSource::Channel(6), ..sig };
        assert_eq!(chan.effective_window(), (-10, 400));
    }

    #[test]
    fn test_attitude_clip() {
        let mut cfg = OsdConfig::default();
        cfg.attitude.position = Point::new(100, 100);
        cfg.attitude_scale = 2.0;
        let clip = cfg.attitude_clip();
        assert_eq!((clip.min_x, clip.max_x), (56, 144));
        assert_eq!((clip.min_y, clip.max_y), (40, 168));
    }
}
