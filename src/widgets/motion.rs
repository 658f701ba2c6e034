//! Climb rate, wind and efficiency.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::{String, Vec};

use crate::colors::ColorClass;
use crate::config::{FontSize, WidgetConfig};
use crate::polygon::Polygon2D;
use crate::styles::{MIDDLE_LEFT, SMALL_FONT, font_for};
use crate::telemetry::{Battery, Wind};
use crate::thresholds::CLIMB_DEADBAND;
use crate::units::UnitProfile;

use super::primitives::{draw_segments, draw_text, draw_trend_arrow, draw_widget_text};

// =============================================================================
// Climb Rate
// =============================================================================

/// Climb rate rounded to 0.1 m/s.
#[inline]
pub fn rounded_climb(climb_rate: f32) -> f32 { libm::roundf(climb_rate * 10.0) / 10.0 }

/// Magnitude text, or `None` inside the dead band.
pub fn format_climb(climb_rate: f32) -> Option<String<16>> {
    let climb = rounded_climb(climb_rate);
    let magnitude = climb.abs();
    if magnitude < CLIMB_DEADBAND {
        return None;
    }
    let mut s: String<16> = String::new();
    if magnitude < 10.0 {
        let _ = write!(s, "{:2.1} m/s", magnitude);
    } else {
        let _ = write!(s, "{:2.0} m/s", magnitude);
    }
    Some(s)
}

/// Climb magnitude with an up or down arrow left of it.
pub fn draw_climb_rate<D>(display: &mut D, widget: &WidgetConfig, climb_rate: f32)
where
    D: DrawTarget<Color = Rgb565>,
{
    let Some(text) = format_climb(climb_rate) else {
        return;
    };
    let Point { x, y } = widget.position;
    draw_text(display, &text, Point::new(x + 8, y), font_for(widget.font), ColorClass::Normal, MIDDLE_LEFT);

    let half_length = if widget.font == FontSize::Small { 6 } else { 8 };
    draw_trend_arrow(display, widget.position, half_length, rounded_climb(climb_rate) > 0.0, ColorClass::Normal);
}

// =============================================================================
// Wind
// =============================================================================

/// Arrow rotated to the wind direction plus the wind speed.
pub fn draw_wind<D>(display: &mut D, widget: &WidgetConfig, arrow: &mut Polygon2D, wind: &Wind, units: &UnitProfile)
where
    D: DrawTarget<Color = Rgb565>,
{
    let t = arrow.reset().rotate(wind.direction_deg);
    let mut segments: Vec<(Point, Point), 4> = Vec::new();
    if let (Some(a), Some(b), Some(c)) = (t.point(0), t.point(1), t.point(2)) {
        segments.extend_from_slice(&[(a, b), (b, c), (c, a)]).ok();
    }
    if let (Some(tail), Some(head)) = (t.point(3), t.point(4)) {
        segments.push((tail, head)).ok();
    }
    draw_segments(display, &segments, ColorClass::Normal);

    let mut s: String<16> = String::new();
    let _ = write!(s, "{:.2}{}", units.speed(wind.speed_mps), units.speed_label);
    let Point { x, y } = widget.position;
    draw_text(display, &s, Point::new(x + 15, y), SMALL_FONT, ColorClass::Normal, MIDDLE_LEFT);
}

// =============================================================================
// Efficiency
// =============================================================================

/// Electrical power over ground speed; zero while standing still.
pub fn efficiency(battery: &Battery, ground_speed_mps: f32, units: &UnitProfile) -> f32 {
    let wattage = battery.voltage * battery.current_centi_amps as f32 * 0.01;
    let speed = units.speed(ground_speed_mps);
    if speed == 0.0 { 0.0 } else { wattage / speed }
}

pub fn draw_efficiency<D>(
    display: &mut D,
    widget: &WidgetConfig,
    battery: &Battery,
    ground_speed_mps: f32,
    units: &UnitProfile,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut s: String<24> = String::new();
    let _ = write!(s, "{:.1}W/{}", efficiency(battery, ground_speed_mps, units), units.long_label);
    draw_widget_text(display, widget, &s, ColorClass::Normal);
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::config::OsdConfig;
    use crate::shapes::ShapeSet;
    use crate::testing::RecordingCanvas;
    use crate::units::METRIC;

    // -------------------------------------------------------------------------
    // Climb rate
    // -------------------------------------------------------------------------

    #[test]
    fn test_climb_dead_band() {
        assert!(format_climb(0.0).is_none());
        assert!(format_climb(0.04).is_none(), "rounds to 0.0");
        assert!(format_climb(-0.04).is_none());
        assert_eq!(format_climb(0.06).as_deref(), Some("0.1 m/s"));
    }

    #[test]
    fn test_climb_texts_show_magnitude() {
        assert_eq!(format_climb(2.5).as_deref(), Some("2.5 m/s"));
        assert_eq!(format_climb(-2.5).as_deref(), Some("2.5 m/s"));
        assert_eq!(format_climb(12.0).as_deref(), Some("12 m/s"));
    }

    #[test]
    fn test_climb_arrow_direction() {
        let w = WidgetConfig::at(100, 100).sized(FontSize::Small);
        let above = Rectangle::new(Point::new(99, 93), Size::new(3, 2));
        let below = Rectangle::new(Point::new(99, 106), Size::new(3, 2));

        let mut up = RecordingCanvas::new();
        draw_climb_rate(&mut up, &w, 3.0);
        assert!(up.lit_in(above));

        let mut down = RecordingCanvas::new();
        draw_climb_rate(&mut down, &w, -3.0);
        assert!(down.lit_in(below));

        let mut level = RecordingCanvas::new();
        draw_climb_rate(&mut level, &w, 0.02);
        assert!(level.is_blank());
    }

    // -------------------------------------------------------------------------
    // Wind
    // -------------------------------------------------------------------------

    #[test]
    fn test_wind_arrow_rotates() {
        let cfg = OsdConfig::default();
        let mut shapes = ShapeSet::new(&cfg);

        let mut north = RecordingCanvas::new();
        draw_wind(&mut north, &cfg.wind, &mut shapes.wind_arrow, &Wind { speed_mps: 3.0, direction_deg: 0.0 }, &METRIC);
        let mut east = RecordingCanvas::new();
        draw_wind(&mut east, &cfg.wind, &mut shapes.wind_arrow, &Wind { speed_mps: 3.0, direction_deg: 90.0 }, &METRIC);

        assert_ne!(north.lit_pixels(), east.lit_pixels());
        let head = Point::new(cfg.wind.position.x, cfg.wind.position.y - 8);
        assert_eq!(north.pixel(head), Some(ColorClass::Normal.foreground()));
    }

    // -------------------------------------------------------------------------
    // Efficiency
    // -------------------------------------------------------------------------

    #[test]
    fn test_efficiency() {
        let battery = Battery { voltage: 12.0, current_centi_amps: 1000, ..Battery::default() };
        // 120 W at 10 m/s = 36 km/h
        let e = efficiency(&battery, 10.0, &METRIC);
        assert!((e - 120.0 / 36.0).abs() < 1e-4);
        assert_eq!(efficiency(&battery, 0.0, &METRIC), 0.0);
    }
}
