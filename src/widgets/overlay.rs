//! Frame-level overlays drawn after every widget: panel indicator, warning
//! line and the status message log.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::colors::ColorClass;
use crate::config::{CENTER_X, MESSAGE_LINE_PITCH, PANEL_INDICATOR_Y, WidgetConfig};
use crate::messages::MessageLog;
use crate::styles::{NORMAL_FONT, SMALL_FONT, TOP_CENTERED, TOP_LEFT};

use super::primitives::{draw_text, draw_widget_text};

/// "P n" below the screen center after a panel switch.
pub fn draw_panel_indicator<D>(display: &mut D, panel: u8)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut s: String<8> = String::new();
    let _ = write!(s, "P {}", panel);
    draw_text(display, &s, Point::new(CENTER_X, PANEL_INDICATOR_Y), NORMAL_FONT, ColorClass::Normal, TOP_CENTERED);
}

/// Current warning text, always in the warning color.
pub fn draw_warning<D>(display: &mut D, widget: &WidgetConfig, text: &str)
where
    D: DrawTarget<Color = Rgb565>,
{
    if text.is_empty() {
        return;
    }
    draw_widget_text(display, widget, text, ColorClass::Warning);
}

/// Message log, oldest line at the anchor, one line every
/// [`MESSAGE_LINE_PITCH`] pixels below.
pub fn draw_messages<D>(display: &mut D, widget: &WidgetConfig, log: &MessageLog)
where
    D: DrawTarget<Color = Rgb565>,
{
    let Point { x, y } = widget.position;
    let mut line_y = y;
    for line in log.iter() {
        draw_text(display, line, Point::new(x, line_y), SMALL_FONT, ColorClass::Normal, TOP_LEFT);
        line_y += MESSAGE_LINE_PITCH;
    }
}
