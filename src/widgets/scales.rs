//! Altitude and speed tapes plus their plain-text counterparts.
//!
//! # Tape Anatomy
//!
//! ```text
//!        AMSL          title (posY - 85)
//!   ┬                  boundary tick
//!   ├── 60
//!   ├─
//!  ◄┤[ 52 ]            readout pointer at the anchor
//!   ├── 50
//!   ┴
//!        [m]           footer (posY + 80)
//! ```
//!
//! Ticks extend to the right for left-aligned tapes and to the left for
//! right-aligned ones, so both tapes point towards the screen center.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Triangle};
use embedded_graphics::text::Alignment;
use heapless::String;

use crate::colors::{BLACK, ColorClass};
use crate::compass::TickKind;
use crate::config::{
    AltitudeSource,
    VSCALE_BOUND_LEN,
    VSCALE_HEIGHT,
    VSCALE_MAJOR_LEN,
    VSCALE_MAJOR_STEP,
    VSCALE_MINOR_LEN,
    VSCALE_MINOR_STEP,
    VSCALE_RANGE,
    WidgetConfig,
};
use crate::styles::{LARGE_FONT, MIDDLE_CENTERED, MIDDLE_LEFT, MIDDLE_RIGHT, SMALL_FONT, aligned, font_for};
use crate::telemetry::VehicleState;
use crate::thresholds::{AIRSPEED_FLOOR, ALTITUDE_FLOOR, GROUNDSPEED_FLOOR};
use crate::units::UnitProfile;
use crate::vscale::{ScaleFlags, ScaleSide, format_readout, layout_vscale, readout_color};

use super::primitives::{draw_box, draw_line, draw_text, draw_widget_text, stroke_line};

/// Gap between a major tick and its label.
const LABEL_GAP: i32 = 2;

/// Width of the boxed readout, excluding the pointer.
const READOUT_WIDTH: i32 = 40;
const READOUT_HALF_HEIGHT: i32 = 7;
/// Horizontal depth of the pointer triangle.
const POINTER_DEPTH: i32 = 7;

const TITLE_OFFSET_Y: i32 = -85;
const FOOTER_OFFSET_Y: i32 = 80;

// =============================================================================
// Vertical Scale
// =============================================================================

/// Draw a complete vertical tape centered on `anchor`.
pub fn draw_vertical_scale<D>(
    display: &mut D,
    anchor: Point,
    side: ScaleSide,
    value: f32,
    flags: ScaleFlags,
    min_val: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let dir = side.direction();
    let Point { x, y } = anchor;
    let half = VSCALE_HEIGHT / 2;
    let label_style = if dir > 0 { MIDDLE_LEFT } else { MIDDLE_RIGHT };

    draw_line(display, Point::new(x, y - half), Point::new(x, y + half), ColorClass::Normal);

    let ticks = layout_vscale(
        value,
        VSCALE_RANGE,
        VSCALE_HEIGHT,
        VSCALE_MINOR_STEP,
        VSCALE_MAJOR_STEP,
        flags,
        min_val,
    );
    for tick in ticks {
        let ty = y + tick.offset;
        let len = match tick.kind {
            TickKind::Major => VSCALE_MAJOR_LEN,
            TickKind::Minor => VSCALE_MINOR_LEN,
        };
        let end = x + dir * len;
        draw_line(display, Point::new(x, ty), Point::new(end, ty), tick.color);
        if let Some(label) = &tick.label {
            let at = Point::new(end + dir * LABEL_GAP, ty);
            draw_text(display, label, at, SMALL_FONT, tick.color, label_style);
        }
    }

    for by in [y - half, y + half] {
        draw_line(display, Point::new(x, by), Point::new(x + dir * VSCALE_BOUND_LEN, by), ColorClass::Normal);
    }

    let color = readout_color(value, flags, min_val);
    draw_readout(display, anchor, dir, &format_readout(value), color);
}

/// Boxed readout with a pointer touching the axis at `anchor`.
fn draw_readout<D>(display: &mut D, anchor: Point, dir: i32, text: &str, color: ColorClass)
where
    D: DrawTarget<Color = Rgb565>,
{
    let Point { x, y } = anchor;
    let tip = Point::new(x + dir, y);
    let near = x + dir * (1 + POINTER_DEPTH);
    let far = near + dir * READOUT_WIDTH;
    let top = y - READOUT_HALF_HEIGHT;
    let bottom = y + READOUT_HALF_HEIGHT;

    draw_box(
        display,
        Point::new(near.min(far), top),
        Size::new(READOUT_WIDTH as u32 + 1, (2 * READOUT_HALF_HEIGHT + 1) as u32),
        color,
    );

    // pointer fill swallows the box edge on the axis side
    Triangle::new(tip, Point::new(near, top), Point::new(near, bottom))
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();
    stroke_line(display, tip, Point::new(near, top), color.foreground());
    stroke_line(display, tip, Point::new(near, bottom), color.foreground());

    let center = Point::new(near + dir * READOUT_WIDTH / 2, y);
    draw_text(display, text, center, LARGE_FONT, color, MIDDLE_CENTERED);
}

/// Title above and unit footer below a tape.
fn draw_captions<D>(display: &mut D, widget: &WidgetConfig, title: &str, unit: &str)
where
    D: DrawTarget<Color = Rgb565>,
{
    let p = widget.position;
    let right = widget.align == Alignment::Right;
    let font = font_for(widget.font);
    let style = aligned(widget.align);

    let title_x = if right && p.x > 15 { p.x - 15 } else { p.x };
    draw_text(display, title, Point::new(title_x, p.y + TITLE_OFFSET_Y), font, ColorClass::Normal, style);

    let mut footer: String<12> = String::new();
    let _ = write!(footer, "[{unit}]");
    let footer_x = if right { p.x + 5 } else { p.x };
    draw_text(display, &footer, Point::new(footer_x, p.y + FOOTER_OFFSET_Y), font, ColorClass::Normal, style);
}

// =============================================================================
// Altitude
// =============================================================================

/// Value and title of the altitude tape.
///
/// Rangefinder clearance wins when present ("TALT"); otherwise the configured
/// source is used.
pub fn altitude_scale_input(state: &VehicleState, source: AltitudeSource, units: &UnitProfile) -> (f32, &'static str) {
    match (state.bottom_clearance, source) {
        (Some(clearance), _) => (units.distance(clearance), "TALT"),
        (None, AltitudeSource::Msl) => (units.distance(state.altitude_msl), "AMSL"),
        (None, AltitudeSource::Relative) => (units.distance(state.altitude_relative), "RALT"),
    }
}

pub fn draw_altitude_scale<D>(
    display: &mut D,
    widget: &WidgetConfig,
    state: &VehicleState,
    source: AltitudeSource,
    units: &UnitProfile,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let (value, title) = altitude_scale_input(state, source, units);
    let side = ScaleSide::from(widget.align);
    draw_vertical_scale(display, widget.position, side, value, ScaleFlags::NO_NEGATIVE, ALTITUDE_FLOOR);
    draw_captions(display, widget, title, units.short_label);
}

/// `"A 120m"` style altitude text.
pub fn draw_altitude<D>(display: &mut D, widget: &WidgetConfig, prefix: &str, meters: f32, units: &UnitProfile)
where
    D: DrawTarget<Color = Rgb565>,
{
    let text = units.format_distance(prefix, meters);
    draw_widget_text(display, widget, &text, ColorClass::Normal);
}

// =============================================================================
// Speed
// =============================================================================

/// Value, title and floor of the speed tape. Air speed is shown in forward
/// flight, ground speed otherwise.
pub fn speed_scale_input(state: &VehicleState, units: &UnitProfile) -> (f32, &'static str, i32) {
    if state.is_forward_flight() {
        (units.speed(state.air_speed), "AS", AIRSPEED_FLOOR)
    } else {
        (units.speed(state.ground_speed), "GS", GROUNDSPEED_FLOOR)
    }
}

pub fn draw_speed_scale<D>(display: &mut D, widget: &WidgetConfig, state: &VehicleState, units: &UnitProfile)
where
    D: DrawTarget<Color = Rgb565>,
{
    let (value, title, floor) = speed_scale_input(state, units);
    let side = ScaleSide::from(widget.align);
    draw_vertical_scale(display, widget.position, side, value, ScaleFlags::NO_NEGATIVE, floor);
    draw_captions(display, widget, title, units.speed_label);
}

pub fn format_ground_speed(state: &VehicleState, units: &UnitProfile) -> String<16> {
    let mut s: String<16> = String::new();
    let _ = write!(s, "GS: {}", units.speed(state.ground_speed) as i32);
    s
}

/// Ground speed text, shown only in forward flight.
pub fn draw_ground_speed<D>(display: &mut D, widget: &WidgetConfig, state: &VehicleState, units: &UnitProfile)
where
    D: DrawTarget<Color = Rgb565>,
{
    if !state.is_forward_flight() {
        return;
    }
    draw_widget_text(display, widget, &format_ground_speed(state, units), ColorClass::Normal);
}

pub fn format_air_speed(state: &VehicleState, units: &UnitProfile) -> String<16> {
    let mut s: String<16> = String::new();
    let _ = write!(s, "AS {}{}", units.speed(state.air_speed) as i32, units.speed_label);
    s
}

pub fn draw_air_speed<D>(display: &mut D, widget: &WidgetConfig, state: &VehicleState, units: &UnitProfile)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_widget_text(display, widget, &format_air_speed(state, units), ColorClass::Normal);
}
