//! Heading widgets: linear compass, compass rose, home and waypoint distance.
//!
//! # Linear Compass
//!
//! ```text
//!      |    |    |    |    |
//!      W   300 [012] 30   60
//!                 ┌─┐
//!                 │H│        home marker (or "-H" / "H-" at an edge)
//!                 └─┘
//! ```
//!
//! Ticks grow upwards from the anchor row, labels sit 8 px below it. The
//! heading readout box is drawn last so it covers whatever tick is under the
//! center.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::{String, Vec};

use crate::colors::ColorClass;
use crate::compass::{HomeMarker, TickKind, heading_readout, home_marker, layout_compass};
use crate::config::{
    COMPASS_MAJOR_LEN,
    COMPASS_MAJOR_STEP,
    COMPASS_MINOR_LEN,
    COMPASS_MINOR_STEP,
    COMPASS_RANGE,
    COMPASS_WIDTH,
    CompassRoseConfig,
    WidgetConfig,
};
use crate::navigation::{GreatCircle, wrap_degrees};
use crate::polygon::Polygon2D;
use crate::shapes::HEADING_ARROW_EDGES;
use crate::styles::{MIDDLE_CENTERED, NORMAL_FONT, SMALL_FONT, TOP_CENTERED};
use crate::telemetry::Waypoint;
use crate::thresholds::ROSE_MARKER_MIN_DISTANCE_M;
use crate::units::UnitProfile;

use super::primitives::{draw_box, draw_circle, draw_line, draw_segments, draw_text, draw_widget_text, fill_box};

const LABEL_OFFSET_Y: i32 = 8;
const MARKER_OFFSET_Y: i32 = 15;
const MARKER_SIZE: u32 = 10;
const READOUT_SIZE: Size = Size::new(24, 14);

/// Whole-degree heading in `0..360`.
#[inline]
fn whole_degrees(angle: f32) -> i32 { (libm::roundf(wrap_degrees(angle)) as i32).rem_euclid(360) }

// =============================================================================
// Linear Compass
// =============================================================================

/// Draw the tape compass centered on `center`.
///
/// `home_bearing` is `None` while home is unknown; no marker is drawn then.
pub fn draw_linear_compass<D>(display: &mut D, center: Point, heading: f32, home_bearing: Option<f32>)
where
    D: DrawTarget<Color = Rgb565>,
{
    let Point { x, y } = center;
    let current = whole_degrees(heading);

    let ticks = layout_compass(current, COMPASS_RANGE, COMPASS_WIDTH, COMPASS_MINOR_STEP, COMPASS_MAJOR_STEP);
    for tick in ticks {
        let xs = x + tick.offset;
        let len = match tick.kind {
            TickKind::Major => COMPASS_MAJOR_LEN,
            TickKind::Minor => COMPASS_MINOR_LEN,
        };
        draw_line(display, Point::new(xs, y), Point::new(xs, y - len), tick.color);
        if let Some(label) = &tick.label {
            draw_text(display, label, Point::new(xs + 1, y + LABEL_OFFSET_Y), SMALL_FONT, tick.color, MIDDLE_CENTERED);
        }
    }

    if let Some(home) = home_bearing {
        let marker_y = y + MARKER_OFFSET_Y;
        let text_y = marker_y + MARKER_SIZE as i32 / 2;
        let half_width = COMPASS_WIDTH / 2;
        match home_marker(current, whole_degrees(home), COMPASS_RANGE, COMPASS_WIDTH) {
            HomeMarker::InView(offset) => {
                let xs = x + offset;
                fill_box(display, Point::new(xs - 5, marker_y), Size::new(MARKER_SIZE, MARKER_SIZE));
                draw_text(display, "H", Point::new(xs + 1, text_y), SMALL_FONT, ColorClass::Normal, MIDDLE_CENTERED);
            }
            HomeMarker::OffLeft => draw_edge_marker(display, Point::new(x - half_width, marker_y), "-H"),
            HomeMarker::OffRight => draw_edge_marker(display, Point::new(x + half_width, marker_y), "H-"),
        }
    }

    let readout = heading_readout(current);
    let size = READOUT_SIZE;
    draw_box(
        display,
        Point::new(x - size.width as i32 / 2, y - size.height as i32 / 2),
        size,
        ColorClass::Normal,
    );
    draw_text(display, &readout, Point::new(x + 1, y), NORMAL_FONT, ColorClass::Normal, MIDDLE_CENTERED);
}

fn draw_edge_marker<D>(display: &mut D, edge: Point, text: &str)
where
    D: DrawTarget<Color = Rgb565>,
{
    fill_box(display, Point::new(edge.x - 10, edge.y), Size::new(2 * MARKER_SIZE, MARKER_SIZE));
    let at = Point::new(edge.x, edge.y + MARKER_SIZE as i32 / 2);
    draw_text(display, text, at, SMALL_FONT, ColorClass::Normal, MIDDLE_CENTERED);
}

// =============================================================================
// Compass Rose
// =============================================================================

/// North-up compass rose: heading arrow, home and waypoint markers.
#[allow(clippy::too_many_arguments)]
pub fn draw_compass_rose<D>(
    display: &mut D,
    widget: &WidgetConfig,
    rose: &CompassRoseConfig,
    arrow: &mut Polygon2D,
    heading: f32,
    home: Option<GreatCircle>,
    waypoint: &Waypoint,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let center = widget.position;
    let radius = rose.radius as i32;

    draw_circle(display, center, rose.radius, ColorClass::Normal);
    draw_text(display, "N", Point::new(center.x, center.y - radius + 2), SMALL_FONT, ColorClass::Normal, TOP_CENTERED);

    let t = arrow.reset().rotate(heading);
    let mut edges: Vec<(Point, Point), 4> = Vec::new();
    for (a, b) in HEADING_ARROW_EDGES {
        if let (Some(pa), Some(pb)) = (t.point(a), t.point(b)) {
            edges.push((pa, pb)).ok();
        }
    }
    draw_segments(display, &edges, ColorClass::Normal);

    if let Some(home) = home.filter(|h| h.distance_m > ROSE_MARKER_MIN_DISTANCE_M) {
        let at = polar(center, rose.home_radius, home.bearing_deg);
        draw_text(display, "H", at, SMALL_FONT, ColorClass::Normal, MIDDLE_CENTERED);
    }

    if waypoint.number != 0 && waypoint.distance_m > ROSE_MARKER_MIN_DISTANCE_M {
        let mut label: String<8> = String::new();
        let _ = write!(label, "{}", u32::from(waypoint.number) + 1);
        let at = polar(center, rose.waypoint_radius, waypoint.bearing_deg as f32);
        draw_text(display, &label, at, SMALL_FONT, ColorClass::Normal, MIDDLE_CENTERED);
    }
}

/// Screen point `radius` pixels from `center` at compass bearing `bearing_deg`.
fn polar(center: Point, radius: f32, bearing_deg: f32) -> Point {
    let rad = bearing_deg.to_radians();
    Point::new(
        center.x + libm::roundf(radius * libm::sinf(rad)) as i32,
        center.y - libm::roundf(radius * libm::cosf(rad)) as i32,
    )
}

// =============================================================================
// Distances
// =============================================================================

pub fn draw_home_distance<D>(display: &mut D, widget: &WidgetConfig, distance_m: f32, units: &UnitProfile)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_widget_text(display, widget, &units.format_distance("H: ", distance_m), ColorClass::Normal);
}

/// Distance to the active waypoint; nothing while no waypoint is active.
pub fn draw_waypoint_distance<D>(display: &mut D, widget: &WidgetConfig, waypoint: &Waypoint, units: &UnitProfile)
where
    D: DrawTarget<Color = Rgb565>,
{
    if waypoint.number == 0 {
        return;
    }
    draw_widget_text(display, widget, &units.format_distance("WP ", waypoint.distance_m), ColorClass::Normal);
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::testing::RecordingCanvas;
    use crate::units::METRIC;

    const CENTER: Point = Point::new(240, 40);

    fn marker_area(x: i32, width: u32) -> Rectangle {
        Rectangle::new(Point::new(x, CENTER.y + MARKER_OFFSET_Y), Size::new(width, MARKER_SIZE))
    }

    fn left_edge() -> Rectangle { marker_area(CENTER.x - COMPASS_WIDTH / 2 - 12, 24) }

    fn right_edge() -> Rectangle { marker_area(CENTER.x + COMPASS_WIDTH / 2 - 12, 24) }

    // -------------------------------------------------------------------------
    // Linear compass
    // -------------------------------------------------------------------------

    #[test]
    fn test_home_in_view_draws_single_boxed_marker() {
        let mut canvas = RecordingCanvas::new();
        draw_linear_compass(&mut canvas, CENTER, 350.0, Some(10.0));
        // 20 degrees right of center: 20 * 180 / 120 = 30 px
        assert!(canvas.lit_in(marker_area(CENTER.x + 30 - 5, MARKER_SIZE)));
        assert!(!canvas.lit_in(left_edge()));
        assert!(!canvas.lit_in(right_edge()));
    }

    #[test]
    fn test_home_out_of_view_uses_shorter_side() {
        let mut canvas = RecordingCanvas::new();
        draw_linear_compass(&mut canvas, CENTER, 0.0, Some(100.0));
        assert!(canvas.lit_in(right_edge()));
        assert!(!canvas.lit_in(left_edge()));

        let mut canvas = RecordingCanvas::new();
        draw_linear_compass(&mut canvas, CENTER, 0.0, Some(260.0));
        assert!(canvas.lit_in(left_edge()));
        assert!(!canvas.lit_in(right_edge()));
    }

    #[test]
    fn test_unknown_home_draws_no_marker() {
        let mut canvas = RecordingCanvas::new();
        draw_linear_compass(&mut canvas, CENTER, 0.0, None);
        let below = Rectangle::new(
            Point::new(CENTER.x - COMPASS_WIDTH / 2 - 12, CENTER.y + MARKER_OFFSET_Y),
            Size::new(COMPASS_WIDTH as u32 + 24, MARKER_SIZE),
        );
        assert!(!canvas.lit_in(below));
    }

    #[test]
    fn test_readout_box_covers_center_tick() {
        let mut canvas = RecordingCanvas::new();
        draw_linear_compass(&mut canvas, CENTER, 0.0, None);
        // the N tick would be lit straight above the anchor without the box
        assert_eq!(canvas.pixel(Point::new(CENTER.x, CENTER.y - 5)), Some(crate::colors::BLACK));
    }

    #[test]
    fn test_whole_degrees_wraps() {
        assert_eq!(whole_degrees(359.7), 0);
        assert_eq!(whole_degrees(-10.0), 350);
        assert_eq!(whole_degrees(725.0), 5);
    }

    // -------------------------------------------------------------------------
    // Rose and distances
    // -------------------------------------------------------------------------

    #[test]
    fn test_polar_bearings() {
        let c = Point::new(100, 100);
        assert_eq!(polar(c, 10.0, 0.0), Point::new(100, 90));
        assert_eq!(polar(c, 10.0, 90.0), Point::new(110, 100));
        assert_eq!(polar(c, 10.0, 180.0), Point::new(100, 110));
    }

    #[test]
    fn test_rose_home_marker_needs_distance() {
        let widget = WidgetConfig::at(100, 100);
        let rose = CompassRoseConfig { radius: 30, home_radius: 24.0, waypoint_radius: 18.0 };
        let mut arrow = Polygon2D::from_points(widget.position, &crate::shapes::HEADING_ARROW);
        let wp = Waypoint::default();
        // home due east, marker at (124, 100)
        let area = Rectangle::new(Point::new(120, 96), Size::new(9, 9));

        let near = GreatCircle { distance_m: 0.5, bearing_deg: 90.0 };
        let mut canvas = RecordingCanvas::new();
        draw_compass_rose(&mut canvas, &widget, &rose, &mut arrow, 0.0, Some(near), &wp);
        assert!(!canvas.lit_in(area));

        let far = GreatCircle { distance_m: 50.0, bearing_deg: 90.0 };
        let mut canvas = RecordingCanvas::new();
        draw_compass_rose(&mut canvas, &widget, &rose, &mut arrow, 0.0, Some(far), &wp);
        assert!(canvas.lit_in(area));
    }

    #[test]
    fn test_waypoint_distance_needs_active_waypoint() {
        let widget = WidgetConfig::at(10, 10);
        let mut canvas = RecordingCanvas::new();
        draw_waypoint_distance(&mut canvas, &widget, &Waypoint::default(), &METRIC);
        assert!(canvas.is_blank());

        let wp = Waypoint { number: 3, distance_m: 120.0, bearing_deg: 0 };
        draw_waypoint_distance(&mut canvas, &widget, &wp, &METRIC);
        assert!(!canvas.is_blank());
    }
}
