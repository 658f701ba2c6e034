//! Low-level drawing primitives shared across widgets.
//!
//! Everything on the overlay is composited over live video, so foreground
//! elements are drawn with a dark outline: text gets an 8-direction outline,
//! lines are drawn over a 3 px black stroke. Readout boxes are filled black so
//! values stay legible over bright scenery.
//!
//! All functions discard draw errors with `.ok()`; a failed draw must never
//! abort the frame.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Text, TextStyle};

use crate::colors::{BLACK, ColorClass, OUTLINE};
use crate::config::WidgetConfig;
use crate::styles::{aligned, font_for};

const OUTLINE_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(OUTLINE, 3);
const BOX_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

// =============================================================================
// Text
// =============================================================================

/// Draw text with a dark outline for visibility over video.
///
/// # Performance Modes
///
/// - **Default**: full 8-direction outline (9 draw calls per text)
/// - **`simple-outline` feature**: 2-direction shadow (3 draw calls per text)
pub fn draw_text<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: ColorClass,
    text_style: TextStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let outline_char_style = MonoTextStyle::new(font, OUTLINE);
    let main_char_style = MonoTextStyle::new(font, color.foreground());

    #[cfg(feature = "simple-outline")]
    const OFFSETS: [(i32, i32); 2] = [(1, 1), (1, 0)];

    #[cfg(not(feature = "simple-outline"))]
    const OFFSETS: [(i32, i32); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1), // top row
        (-1, 0),
        (1, 0), // middle row (skip center)
        (-1, 1),
        (0, 1),
        (1, 1), // bottom row
    ];

    for (dx, dy) in OFFSETS {
        let offset_pos = Point::new(position.x + dx, position.y + dy);
        Text::with_text_style(text, offset_pos, outline_char_style, text_style)
            .draw(display)
            .ok();
    }

    Text::with_text_style(text, position, main_char_style, text_style)
        .draw(display)
        .ok();
}

/// Draw text at a widget's anchor using its font and alignment.
#[inline]
pub fn draw_widget_text<D>(display: &mut D, widget: &WidgetConfig, text: &str, color: ColorClass)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_text(display, text, widget.position, font_for(widget.font), color, aligned(widget.align));
}

// =============================================================================
// Lines and Shapes
// =============================================================================

/// Single-pixel line without outline.
#[inline]
pub fn stroke_line<D>(display: &mut D, start: Point, end: Point, color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(start, end)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
        .ok();
}

/// Line over a dark 3 px stroke.
pub fn draw_line<D>(display: &mut D, start: Point, end: Point, color: ColorClass)
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(start, end).into_styled(OUTLINE_STROKE).draw(display).ok();
    stroke_line(display, start, end, color.foreground());
}

/// Outlined segments. Outlines go first so no segment's outline covers
/// another's foreground.
pub fn draw_segments<D>(display: &mut D, segments: &[(Point, Point)], color: ColorClass)
where
    D: DrawTarget<Color = Rgb565>,
{
    for &(a, b) in segments {
        Line::new(a, b).into_styled(OUTLINE_STROKE).draw(display).ok();
    }
    for &(a, b) in segments {
        stroke_line(display, a, b, color.foreground());
    }
}

/// Black box with a colored 1 px border.
pub fn draw_box<D>(display: &mut D, top_left: Point, size: Size, border: ColorClass)
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(top_left, size)
        .into_styled(
            PrimitiveStyleBuilder::new()
                .fill_color(BLACK)
                .stroke_color(border.foreground())
                .stroke_width(1)
                .stroke_alignment(StrokeAlignment::Inside)
                .build(),
        )
        .draw(display)
        .ok();
}

/// Solid black rectangle used behind text.
#[inline]
pub fn fill_box<D>(display: &mut D, top_left: Point, size: Size)
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(top_left, size).into_styled(BOX_FILL).draw(display).ok();
}

/// Solid rectangle in a foreground color.
#[inline]
pub fn fill_rect<D>(display: &mut D, top_left: Point, size: Size, color: ColorClass)
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(top_left, size)
        .into_styled(PrimitiveStyle::with_fill(color.foreground()))
        .draw(display)
        .ok();
}

/// Outlined circle around `center`.
pub fn draw_circle<D>(display: &mut D, center: Point, radius: u32, color: ColorClass)
where
    D: DrawTarget<Color = Rgb565>,
{
    let diameter = radius * 2 + 1;
    Circle::with_center(center, diameter)
        .into_styled(OUTLINE_STROKE)
        .draw(display)
        .ok();
    Circle::with_center(center, diameter)
        .into_styled(PrimitiveStyle::with_stroke(color.foreground(), 1))
        .draw(display)
        .ok();
}

/// Vertical arrow: shaft reaching `half_length` pixels either side of
/// `center`, 3 px head at the top when `rising`.
pub fn draw_trend_arrow<D>(display: &mut D, center: Point, half_length: i32, rising: bool, color: ColorClass)
where
    D: DrawTarget<Color = Rgb565>,
{
    const HEAD: i32 = 3;
    let dir = if rising { -1 } else { 1 };
    let tip = Point::new(center.x, center.y + dir * half_length);
    let tail = Point::new(center.x, center.y - dir * half_length);
    let left = Point::new(center.x - HEAD, tip.y - dir * HEAD);
    let right = Point::new(center.x + HEAD, tip.y - dir * HEAD);
    draw_segments(display, &[(tail, tip), (left, tip), (right, tip)], color);
}
