//! Radio link widgets: RC RSSI, video link state and link quality.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::colors::ColorClass;
use crate::config::{SignalConfig, SignalDisplay, WidgetConfig};
use crate::signal::{link_quality_value, rc_lost, rssi_value};
use crate::styles::{font_for, middle_aligned};
use crate::telemetry::{LinkStatus, VehicleState};

use super::primitives::{draw_text, draw_widget_text};

fn format_signal(prefix: &str, value: i32, display: SignalDisplay) -> String<16> {
    let mut s: String<16> = String::new();
    let _ = write!(s, "{}{}", prefix, value);
    if display == SignalDisplay::Percent {
        let _ = s.push('%');
    }
    s
}

pub fn format_rssi(state: &VehicleState, cfg: &SignalConfig) -> String<16> {
    format_signal("RC: ", rssi_value(state, cfg), cfg.display)
}

/// RC signal strength, red while the RC link counts as lost.
pub fn draw_rssi<D>(display: &mut D, widget: &WidgetConfig, state: &VehicleState, cfg: &SignalConfig)
where
    D: DrawTarget<Color = Rgb565>,
{
    let color = ColorClass::alert_if(rc_lost(state, cfg));
    draw_widget_text(display, widget, &format_rssi(state, cfg), color);
}

pub fn format_link_quality(state: &VehicleState, cfg: &SignalConfig) -> String<16> {
    format_signal("LIQU ", link_quality_value(state, cfg), cfg.display)
}

/// Link quality, vertically centered on the anchor.
pub fn draw_link_quality<D>(display: &mut D, widget: &WidgetConfig, state: &VehicleState, cfg: &SignalConfig)
where
    D: DrawTarget<Color = Rgb565>,
{
    let text = format_link_quality(state, cfg);
    draw_text(
        display,
        &text,
        widget.position,
        font_for(widget.font),
        ColorClass::Normal,
        middle_aligned(widget.align),
    );
}

// =============================================================================
// Video Link State
// =============================================================================

/// Link state text; red when lost, jammed or reporting unrecovered packets.
pub fn link_state(link: &LinkStatus) -> (String<32>, ColorClass) {
    let mut s: String<32> = String::new();
    if link.lost {
        let _ = s.push_str("WFB LOST");
        return (s, ColorClass::Warning);
    }
    if link.jammed {
        let _ = write!(s, "WFB {:3} JAMMED", link.rssi);
        return (s, ColorClass::Warning);
    }
    let _ = write!(s, "WFB {:3} F{} L{}", link.rssi, link.fec_fixed, link.errors);
    (s, ColorClass::alert_if(link.errors > 0))
}

pub fn draw_link_state<D>(display: &mut D, widget: &WidgetConfig, link: &LinkStatus)
where
    D: DrawTarget<Color = Rgb565>,
{
    let (text, color) = link_state(link);
    draw_widget_text(display, widget, &text, color);
}
