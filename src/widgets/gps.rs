//! GPS receiver widgets and the home coordinates.
//!
//! Two receivers share the same four widgets (status, HDOP, latitude,
//! longitude); the renderer passes the matching [`GpsInfo`] and
//! [`GpsWidgets`](crate::config::GpsWidgets) entry.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::colors::ColorClass;
use crate::config::WidgetConfig;
use crate::telemetry::{GpsFix, GpsInfo};

use super::primitives::draw_widget_text;

/// Status text and its color. Fixes without a label read as `NOGPS`.
pub fn gps_status(gps: &GpsInfo) -> (String<12>, ColorClass) {
    let mut s: String<12> = String::new();
    let color = match gps.fix {
        GpsFix::NoGps | GpsFix::NoFix => {
            let _ = s.push_str("NOFIX");
            ColorClass::Warning
        }
        GpsFix::Fix2D => {
            let _ = write!(s, "2D-{}", gps.satellites);
            ColorClass::Normal
        }
        GpsFix::Fix3D => {
            let _ = write!(s, "3D-{}", gps.satellites);
            ColorClass::Normal
        }
        GpsFix::Dgps => {
            let _ = write!(s, "D3D-{}", gps.satellites);
            ColorClass::Normal
        }
        GpsFix::Unsupported => {
            let _ = s.push_str("NOGPS");
            ColorClass::Warning
        }
    };
    (s, color)
}

pub fn draw_gps_status<D>(display: &mut D, widget: &WidgetConfig, gps: &GpsInfo)
where
    D: DrawTarget<Color = Rgb565>,
{
    let (text, color) = gps_status(gps);
    draw_widget_text(display, widget, &text, color);
}

pub fn format_hdop(gps: &GpsInfo) -> String<16> {
    let mut s: String<16> = String::new();
    let _ = write!(s, "HDOP {:.1}", f32::from(gps.hdop_centi) / 100.0);
    s
}

pub fn draw_gps_hdop<D>(display: &mut D, widget: &WidgetConfig, gps: &GpsInfo)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_widget_text(display, widget, &format_hdop(gps), ColorClass::Normal);
}

/// Coordinate with six decimals and an optional prefix (`"H "` for home).
pub fn format_coordinate(prefix: &str, degrees: f64) -> String<24> {
    let mut s: String<24> = String::new();
    let _ = write!(s, "{}{:.6}", prefix, degrees);
    s
}

pub fn draw_coordinate<D>(display: &mut D, widget: &WidgetConfig, prefix: &str, degrees: f64)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_widget_text(display, widget, &format_coordinate(prefix, degrees), ColorClass::Normal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{RED, WHITE};
    use crate::testing::RecordingCanvas;

    fn gps(fix: GpsFix, satellites: u8) -> GpsInfo { GpsInfo { fix, satellites, ..GpsInfo::default() } }

    #[test]
    fn test_status_texts() {
        assert_eq!(gps_status(&gps(GpsFix::NoGps, 0)).0.as_str(), "NOFIX");
        assert_eq!(gps_status(&gps(GpsFix::NoFix, 3)).0.as_str(), "NOFIX");
        assert_eq!(gps_status(&gps(GpsFix::Fix2D, 5)).0.as_str(), "2D-5");
        assert_eq!(gps_status(&gps(GpsFix::Fix3D, 11)).0.as_str(), "3D-11");
        assert_eq!(gps_status(&gps(GpsFix::Dgps, 14)).0.as_str(), "D3D-14");
        assert_eq!(gps_status(&gps(GpsFix::Unsupported, 20)).0.as_str(), "NOGPS");
    }

    #[test]
    fn test_status_colors() {
        let mut nofix = RecordingCanvas::new();
        draw_gps_status(&mut nofix, &WidgetConfig::at(10, 10), &gps(GpsFix::NoFix, 0));
        assert!(nofix.has_color(RED));

        let mut fix = RecordingCanvas::new();
        draw_gps_status(&mut fix, &WidgetConfig::at(10, 10), &gps(GpsFix::Fix3D, 9));
        assert!(fix.has_color(WHITE));
        assert!(!fix.has_color(RED));
    }

    #[test]
    fn test_hdop_scaled_down() {
        let g = GpsInfo { hdop_centi: 250, ..GpsInfo::default() };
        assert_eq!(format_hdop(&g).as_str(), "HDOP 2.5");
    }

    #[test]
    fn test_coordinates() {
        assert_eq!(format_coordinate("", 47.397742).as_str(), "47.397742");
        assert_eq!(format_coordinate("H ", -8.545594).as_str(), "H -8.545594");
    }
}
