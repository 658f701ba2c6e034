//! Color constants and logical color classes for the overlay.
//!
//! The overlay is composited over live video, so every element is drawn as a
//! light foreground with a dark outline. Widgets never pick raw colors; they
//! pick a [`ColorClass`] and let this module map it to Rgb565.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to most OSD chips and SPI displays and requires no
//! conversion when writing to the frame buffer.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Used for outlines and filled readout boxes.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Default foreground for text and lines.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Used for warnings, NOFIX, low battery, floor ticks.
pub const RED: Rgb565 = Rgb565::RED;

// =============================================================================
// Logical Color Classes
// =============================================================================

/// Logical color class attached to text, ticks and readouts.
///
/// Mirrors the two-level "normal / alert" scheme of analog OSD chips, which
/// only distinguish a regular and a highlighted foreground.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorClass {
    /// Regular foreground.
    #[default]
    Normal,
    /// Alert foreground (warnings, values below a floor).
    Warning,
}

impl ColorClass {
    /// Foreground color for this class.
    #[inline]
    pub const fn foreground(self) -> Rgb565 {
        match self {
            Self::Normal => WHITE,
            Self::Warning => RED,
        }
    }

    /// Select `Warning` when `alert` is true.
    #[inline]
    pub const fn alert_if(alert: bool) -> Self {
        if alert { Self::Warning } else { Self::Normal }
    }
}

/// Outline drawn around every foreground element.
pub const OUTLINE: Rgb565 = BLACK;
