//! Throttle widget.
//!
//! ```text
//!  vertical          horizontal         text
//!      ┌┐
//!      ││           THR 42%            THR  42%
//!   THR││42%        ┌──────────┐
//!      ██           █████     │
//!      ██           └──────────┘
//! ```
//!
//! Bars are 50 px long: one pixel per 2 % of throttle.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::colors::ColorClass;
use crate::config::{ThrottleStyle, WidgetConfig};
use crate::styles::{SMALL_FONT, TOP_CENTERED, TOP_RIGHT};

use super::primitives::{draw_box, draw_text, fill_rect, stroke_line};

const BAR_LENGTH: i32 = 50;
const BAR_WIDTH: u32 = 5;

/// Filled bar length in pixels, clamped to the bar.
pub fn bar_fill(throttle: f32) -> i32 { ((0.5 * throttle) as i32).clamp(0, BAR_LENGTH) }

pub fn format_throttle(throttle: f32, spaced: bool) -> String<12> {
    let mut s: String<12> = String::new();
    let sep = if spaced { " " } else { "" };
    let _ = write!(s, "THR{}{:3}%", sep, throttle as i32);
    s
}

pub fn draw_throttle<D>(display: &mut D, widget: &WidgetConfig, style: ThrottleStyle, throttle: f32)
where
    D: DrawTarget<Color = Rgb565>,
{
    let Point { x, y } = widget.position;
    let fill = bar_fill(throttle);

    if style == ThrottleStyle::Text {
        let text = format_throttle(throttle, true);
        draw_text(display, &text, Point::new(x, y), SMALL_FONT, ColorClass::Normal, TOP_RIGHT);
        return;
    }

    let text = format_throttle(throttle, false);
    draw_text(display, &text, Point::new(x, y - 3), SMALL_FONT, ColorClass::Normal, TOP_CENTERED);

    let fg = ColorClass::Normal.foreground();
    match style {
        ThrottleStyle::VerticalBar => {
            let half = BAR_LENGTH / 2;
            let level = y + half - fill;
            fill_rect(display, Point::new(x + 3, level), Size::new(BAR_WIDTH, fill as u32), ColorClass::Normal);
            // frame around the empty part
            stroke_line(display, Point::new(x + 3, y - half), Point::new(x + 7, y - half), fg);
            stroke_line(display, Point::new(x + 3, level), Point::new(x + 7, level), fg);
            stroke_line(display, Point::new(x + 3, y - half), Point::new(x + 3, level), fg);
            stroke_line(display, Point::new(x + 7, y - half), Point::new(x + 7, level), fg);
        }
        ThrottleStyle::HorizontalBar => {
            let origin = Point::new(x - BAR_LENGTH / 2, y + 10);
            draw_box(display, origin, Size::new(BAR_LENGTH as u32, BAR_WIDTH), ColorClass::Normal);
            fill_rect(display, origin, Size::new(fill as u32, BAR_WIDTH), ColorClass::Normal);
        }
        ThrottleStyle::Text => {}
    }
}
