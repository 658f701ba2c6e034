//! Attitude indicators and the home direction arrow.
//!
//! Two attitude flavours share one widget slot:
//!
//! | Style | Content |
//! |-------|---------|
//! | radar | clipped horizon + pitch ladder, roll scale arc, fixed aircraft symbol, pitch and roll numbers |
//! | simple | fixed reticle, pitch ladder, `PT` / `RL` texts |
//!
//! Both ladders are shifted by pitch and then rotated by −roll, so the
//! horizon stays level with the real one while the aircraft banks.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::{String, Vec};

use crate::colors::{ColorClass, OUTLINE};
use crate::config::AttitudeStyle;
use crate::polygon::{MAX_POLY_VERTS, Polygon2D, Viewport};
use crate::shapes::{PITCH_PX_PER_DEG, ROLL_SCALE_RADIUS, ShapeSet};
use crate::styles::{BOTTOM_CENTERED, NORMAL_FONT, TOP_CENTERED};
use crate::telemetry::Attitude;

use super::primitives::{draw_circle, draw_segments, draw_text, fill_box, stroke_line};

type Segments = Vec<(Point, Point), MAX_POLY_VERTS>;

/// Roll beyond which the simple ladder is drawn as inverted.
const INVERTED_ROLL_DEG: f32 = 90.0;

fn signed_text(value: f32) -> String<12> {
    let mut s: String<12> = String::new();
    let _ = write!(s, "{}", value as i32);
    s
}

/// Draw the configured attitude indicator.
pub fn draw_attitude<D>(display: &mut D, style: AttitudeStyle, shapes: &mut ShapeSet, clip: &Viewport, attitude: &Attitude)
where
    D: DrawTarget<Color = Rgb565>,
{
    match style {
        AttitudeStyle::Radar => draw_radar(display, shapes, clip, attitude),
        AttitudeStyle::Simple => draw_simple_attitude(display, shapes, attitude),
    }
}

// =============================================================================
// Radar
// =============================================================================

pub fn draw_radar<D>(display: &mut D, shapes: &mut ShapeSet, clip: &Viewport, attitude: &Attitude)
where
    D: DrawTarget<Color = Rgb565>,
{
    let scale = shapes.scale();
    let shift = attitude.pitch * PITCH_PX_PER_DEG * scale;

    let horizon = shapes.radar_horizon.reset().shift_rotate(shift, -attitude.roll);
    let mut visible: Segments = Vec::new();
    for (a, b) in horizon.segments() {
        if let Some(seg) = clip.clip_line(a, b) {
            visible.push(seg).ok();
        }
    }
    draw_segments(display, &visible, ColorClass::Normal);

    let roll_scale = shapes.roll_scale.reset().rotate(-attitude.roll);
    let arc: Segments = roll_scale.polyline().collect();
    draw_segments(display, &arc, ColorClass::Normal);

    let Point { x, y } = shapes.radar_horizon.anchor();
    let wing_start = (12.0 * scale) as i32;
    let wing_end = (7.0 * scale) as i32;
    let center = Point::new(x, y);
    draw_segments(
        display,
        &[
            (center, Point::new(x - 9, y + 5)),
            (center, Point::new(x + 9, y + 5)),
            (Point::new(x - wing_start, y), Point::new(x - wing_end, y)),
            (Point::new(x + wing_end, y), Point::new(x + wing_start, y)),
        ],
        ColorClass::Normal,
    );

    fill_box(display, Point::new(x - 9, y + 6), Size::new(15, 9));
    let pitch = signed_text(attitude.pitch);
    draw_text(display, &pitch, Point::new(x, y + 5), NORMAL_FONT, ColorClass::Normal, TOP_CENTERED);

    // fixed roll pointer under the rotating arc
    let py = y - (ROLL_SCALE_RADIUS * scale) as i32;
    let tip = Point::new(x, py);
    let left = Point::new(x - 4, py + 8);
    let right = Point::new(x + 4, py + 8);
    draw_segments(display, &[(tip, left), (tip, right), (left, right)], ColorClass::Normal);
    let roll = signed_text(attitude.roll);
    draw_text(display, &roll, Point::new(x, py - 3), NORMAL_FONT, ColorClass::Normal, BOTTOM_CENTERED);
}

// =============================================================================
// Simple Attitude
// =============================================================================

pub fn draw_simple_attitude<D>(display: &mut D, shapes: &mut ShapeSet, attitude: &Attitude)
where
    D: DrawTarget<Color = Rgb565>,
{
    let scale = shapes.scale();
    let radius = (4.0 * scale) as i32;
    let Point { x, y } = shapes.simple_ladder.anchor();

    draw_segments(
        display,
        &[
            (Point::new(x - radius - 1, y), Point::new(x - 3 * radius - 1, y)),
            (Point::new(x + radius - 1, y), Point::new(x + 3 * radius + 1, y)),
            (Point::new(x, y - radius - 1), Point::new(x, y - 3 * radius)),
        ],
        ColorClass::Normal,
    );
    draw_circle(display, Point::new(x, y), radius.max(0) as u32, ColorClass::Normal);

    let inverted = attitude.roll.abs() >= INVERTED_ROLL_DEG;
    let color = ColorClass::alert_if(inverted);

    let shift = attitude.pitch * PITCH_PX_PER_DEG * scale;
    let ladder = shapes.simple_ladder.reset().shift_rotate(shift, -attitude.roll);
    let rungs: Segments = ladder.segments().collect();
    draw_segments(display, &rungs, color);

    let mut pt: String<12> = String::new();
    let _ = write!(pt, "PT {}", attitude.pitch as i32);
    draw_text(display, &pt, Point::new(x, y - 23), NORMAL_FONT, ColorClass::Normal, BOTTOM_CENTERED);

    let mut rl: String<12> = String::new();
    let _ = write!(rl, "RL {}", attitude.roll as i32);
    draw_text(display, &rl, Point::new(x, y + 20), NORMAL_FONT, color, TOP_CENTERED);
}

// =============================================================================
// Home Direction
// =============================================================================

/// Arrow pointing home relative to the nose: rotated by
/// `home_bearing - heading`.
pub fn draw_home_direction<D>(
    display: &mut D,
    arrow: &mut Polygon2D,
    outline: &mut Polygon2D,
    home_bearing: f32,
    heading: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let angle = home_bearing - heading;

    let shadow = outline.reset().rotate(angle);
    for (a, b) in shadow.segments() {
        stroke_line(display, a, b, OUTLINE);
    }

    let body = arrow.reset().rotate(angle);
    for (a, b) in body.segments() {
        stroke_line(display, a, b, ColorClass::Normal.foreground());
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::colors::{RED, WHITE};
    use crate::config::OsdConfig;
    use crate::testing::RecordingCanvas;

    fn level() -> Attitude { Attitude { roll: 0.0, pitch: 0.0, heading: 0.0 } }

    // -------------------------------------------------------------------------
    // Radar
    // -------------------------------------------------------------------------

    #[test]
    fn test_radar_rejects_offscreen_segments() {
        let cfg = OsdConfig::default();
        let mut shapes = ShapeSet::new(&cfg);
        let clip = cfg.attitude_clip();
        let c = cfg.attitude.position;
        let mut canvas = RecordingCanvas::new();

        // steep pitch pushes the whole ladder below the clip window
        let att = Attitude { roll: 30.0, pitch: 80.0, heading: 0.0 };
        draw_radar(&mut canvas, &mut shapes, &clip, &att);

        assert!(!canvas.is_blank(), "aircraft symbol and roll scale remain");
        let below = Rectangle::new(Point::new(c.x - 60, clip.max_y + 2), Size::new(120, 60));
        assert!(!canvas.lit_in(below));
    }

    #[test]
    fn test_radar_level_horizon_is_drawn() {
        let cfg = OsdConfig::default();
        let mut shapes = ShapeSet::new(&cfg);
        let clip = cfg.attitude_clip();
        let mut canvas = RecordingCanvas::new();
        draw_radar(&mut canvas, &mut shapes, &clip, &level());

        let c = cfg.attitude.position;
        // horizon segment runs through x = c.x - 20 on the anchor row
        assert_eq!(canvas.pixel(Point::new(c.x - 20, c.y)), Some(WHITE));
    }

    #[test]
    fn test_radar_roll_moves_horizon() {
        let cfg = OsdConfig::default();
        let clip = cfg.attitude_clip();

        let mut level_canvas = RecordingCanvas::new();
        draw_radar(&mut level_canvas, &mut ShapeSet::new(&cfg), &clip, &level());

        let mut banked = RecordingCanvas::new();
        let att = Attitude { roll: 20.0, ..level() };
        draw_radar(&mut banked, &mut ShapeSet::new(&cfg), &clip, &att);

        assert_ne!(level_canvas.lit_pixels(), banked.lit_pixels());
    }

    // -------------------------------------------------------------------------
    // Simple attitude
    // -------------------------------------------------------------------------

    #[test]
    fn test_simple_attitude_inverted_turns_red() {
        let cfg = OsdConfig::default();
        let mut shapes = ShapeSet::new(&cfg);

        let mut upright = RecordingCanvas::new();
        draw_simple_attitude(&mut upright, &mut shapes, &Attitude { roll: 45.0, ..level() });
        assert!(!upright.has_color(RED));

        let mut inverted = RecordingCanvas::new();
        draw_simple_attitude(&mut inverted, &mut shapes, &Attitude { roll: -120.0, ..level() });
        assert!(inverted.has_color(RED));
    }

    #[test]
    fn test_style_dispatch() {
        let cfg = OsdConfig::default();
        let clip = cfg.attitude_clip();

        let mut radar = RecordingCanvas::new();
        draw_attitude(&mut radar, AttitudeStyle::Radar, &mut ShapeSet::new(&cfg), &clip, &level());
        let mut simple = RecordingCanvas::new();
        draw_attitude(&mut simple, AttitudeStyle::Simple, &mut ShapeSet::new(&cfg), &clip, &level());

        assert_ne!(radar.lit_pixels(), simple.lit_pixels());
    }

    // -------------------------------------------------------------------------
    // Home direction
    // -------------------------------------------------------------------------

    #[test]
    fn test_home_arrow_points_at_home() {
        let cfg = OsdConfig::default();
        let mut shapes = ShapeSet::new(&cfg);
        let c = cfg.home_direction.position;

        let above = Rectangle::new(Point::new(c.x - 2, c.y - 12), Size::new(5, 5));
        let right = Rectangle::new(Point::new(c.x + 8, c.y - 2), Size::new(5, 5));

        let mut ahead = RecordingCanvas::new();
        draw_home_direction(&mut ahead, &mut shapes.home_arrow, &mut shapes.home_arrow_outline, 90.0, 90.0);
        assert!(ahead.lit_in(above));
        assert!(!ahead.lit_in(right));

        let mut starboard = RecordingCanvas::new();
        draw_home_direction(&mut starboard, &mut shapes.home_arrow, &mut shapes.home_arrow_outline, 180.0, 90.0);
        assert!(starboard.lit_in(right));
        assert!(!starboard.lit_in(above));
    }
}
