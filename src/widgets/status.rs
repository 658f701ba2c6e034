//! Plain status texts: flight mode, arm state, battery, trip and clock.
//!
//! | Widget | Text | Warning color |
//! |--------|------|---------------|
//! | flight mode | label, `----` when empty | never |
//! | arm state | `ARMED` / `DISARMED` | disarmed |
//! | voltage | `12.6V` | never |
//! | current | `  3.2A` | never |
//! | remaining | ` 57%` | below 20 % |
//! | consumed | `850mah` | never |
//! | total trip | distance | never |
//! | time | `HH:MM:SS` | never |

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::canvas::TimeOfDay;
use crate::colors::ColorClass;
use crate::config::WidgetConfig;
use crate::telemetry::Battery;
use crate::thresholds::BATTERY_LOW_PERCENT;
use crate::units::UnitProfile;

use super::primitives::draw_widget_text;

// =============================================================================
// Flight Mode and Arm State
// =============================================================================

pub fn draw_flight_mode<D>(display: &mut D, widget: &WidgetConfig, label: &str)
where
    D: DrawTarget<Color = Rgb565>,
{
    let text = if label.is_empty() { "----" } else { label };
    draw_widget_text(display, widget, text, ColorClass::Normal);
}

pub fn draw_arm_state<D>(display: &mut D, widget: &WidgetConfig, armed: bool)
where
    D: DrawTarget<Color = Rgb565>,
{
    let (text, color) = if armed {
        ("ARMED", ColorClass::Normal)
    } else {
        ("DISARMED", ColorClass::Warning)
    };
    draw_widget_text(display, widget, text, color);
}

// =============================================================================
// Battery
// =============================================================================

pub fn format_voltage(battery: &Battery) -> String<12> {
    let mut s: String<12> = String::new();
    let _ = write!(s, "{:4.1}V", battery.voltage);
    s
}

pub fn format_current(battery: &Battery) -> String<12> {
    let mut s: String<12> = String::new();
    let _ = write!(s, "{:5.1}A", battery.current_centi_amps as f32 * 0.01);
    s
}

pub fn format_remaining(battery: &Battery) -> String<8> {
    let mut s: String<8> = String::new();
    let _ = write!(s, "{:3}%", battery.remaining_percent);
    s
}

pub fn format_consumed(battery: &Battery) -> String<16> {
    let mut s: String<16> = String::new();
    let _ = write!(s, "{}mah", battery.consumed_mah);
    s
}

pub fn draw_battery_voltage<D>(display: &mut D, widget: &WidgetConfig, battery: &Battery)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_widget_text(display, widget, &format_voltage(battery), ColorClass::Normal);
}

pub fn draw_battery_current<D>(display: &mut D, widget: &WidgetConfig, battery: &Battery)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_widget_text(display, widget, &format_current(battery), ColorClass::Normal);
}

/// Remaining capacity, red below [`BATTERY_LOW_PERCENT`].
pub fn draw_battery_remaining<D>(display: &mut D, widget: &WidgetConfig, battery: &Battery)
where
    D: DrawTarget<Color = Rgb565>,
{
    let color = ColorClass::alert_if(battery.remaining_percent < BATTERY_LOW_PERCENT);
    draw_widget_text(display, widget, &format_remaining(battery), color);
}

pub fn draw_battery_consumed<D>(display: &mut D, widget: &WidgetConfig, battery: &Battery)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_widget_text(display, widget, &format_consumed(battery), ColorClass::Normal);
}

// =============================================================================
// Trip and Clock
// =============================================================================

pub fn draw_total_trip<D>(display: &mut D, widget: &WidgetConfig, trip_m: f32, units: &UnitProfile)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_widget_text(display, widget, &units.format_distance("", trip_m), ColorClass::Normal);
}

pub fn format_time(time: &TimeOfDay) -> String<8> {
    let mut s: String<8> = String::new();
    let _ = write!(s, "{:02}:{:02}:{:02}", time.hours, time.minutes, time.seconds);
    s
}

/// Wall clock. Skipped while the host has no time-of-day source.
pub fn draw_time<D>(display: &mut D, widget: &WidgetConfig, time: Option<TimeOfDay>)
where
    D: DrawTarget<Color = Rgb565>,
{
    if let Some(time) = time {
        draw_widget_text(display, widget, &format_time(&time), ColorClass::Normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{RED, WHITE};
    use crate::testing::RecordingCanvas;
    use crate::units::{IMPERIAL, METRIC};

    fn widget() -> WidgetConfig { WidgetConfig::at(20, 20) }

    fn battery() -> Battery {
        Battery { voltage: 12.6, current_centi_amps: 1234, remaining_percent: 57, consumed_mah: 850 }
    }

    // -------------------------------------------------------------------------
    // Flight mode / arm state
    // -------------------------------------------------------------------------

    #[test]
    fn test_arm_state_colors() {
        let mut armed = RecordingCanvas::new();
        draw_arm_state(&mut armed, &widget(), true);
        assert!(armed.has_color(WHITE));
        assert!(!armed.has_color(RED));

        let mut disarmed = RecordingCanvas::new();
        draw_arm_state(&mut disarmed, &widget(), false);
        assert!(disarmed.has_color(RED));
    }

    #[test]
    fn test_empty_flight_mode_shows_placeholder() {
        let mut empty = RecordingCanvas::new();
        draw_flight_mode(&mut empty, &widget(), "");
        let mut dashes = RecordingCanvas::new();
        draw_widget_text(&mut dashes, &widget(), "----", ColorClass::Normal);
        assert_eq!(empty.lit_pixels(), dashes.lit_pixels());
    }

    // -------------------------------------------------------------------------
    // Battery
    // -------------------------------------------------------------------------

    #[test]
    fn test_battery_texts() {
        let b = battery();
        assert_eq!(format_voltage(&b).as_str(), "12.6V");
        assert_eq!(format_current(&b).as_str(), " 12.3A");
        assert_eq!(format_remaining(&b).as_str(), " 57%");
        assert_eq!(format_consumed(&b).as_str(), "850mah");
    }

    #[test]
    fn test_voltage_is_padded() {
        let b = Battery { voltage: 3.7, ..battery() };
        assert_eq!(format_voltage(&b).as_str(), " 3.7V");
    }

    #[test]
    fn test_low_remaining_is_red() {
        let mut ok = RecordingCanvas::new();
        draw_battery_remaining(&mut ok, &widget(), &Battery { remaining_percent: 20, ..battery() });
        assert!(!ok.has_color(RED), "20 % is not low yet");

        let mut low = RecordingCanvas::new();
        draw_battery_remaining(&mut low, &widget(), &Battery { remaining_percent: 19, ..battery() });
        assert!(low.has_color(RED));
    }

    // -------------------------------------------------------------------------
    // Trip / clock
    // -------------------------------------------------------------------------

    #[test]
    fn test_total_trip_uses_unit_profile() {
        assert_eq!(METRIC.format_distance("", 1500.0).as_str(), "1.50km");

        let mut metric = RecordingCanvas::new();
        draw_total_trip(&mut metric, &widget(), 1500.0, &METRIC);
        let mut imperial = RecordingCanvas::new();
        draw_total_trip(&mut imperial, &widget(), 1500.0, &IMPERIAL);
        assert_ne!(metric.lit_pixels(), imperial.lit_pixels());
    }

    #[test]
    fn test_time_format() {
        assert_eq!(format_time(&TimeOfDay::new(7, 5, 9)).as_str(), "07:05:09");
    }

    #[test]
    fn test_time_skipped_without_clock() {
        let mut canvas = RecordingCanvas::new();
        draw_time(&mut canvas, &widget(), None);
        assert!(canvas.is_blank());

        draw_time(&mut canvas, &widget(), Some(TimeOfDay::new(12, 0, 0)));
        assert!(!canvas.is_blank());
    }
}
