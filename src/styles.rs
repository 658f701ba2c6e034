//! Fonts and text alignment styles of the overlay.
//!
//! Alignment styles are `const` so widgets never rebuild them per frame. Text
//! color changes with the warning state, so character styles are built at the
//! call site from a font reference and a [`ColorClass`](crate::colors::ColorClass).
//!
//! | Size | Font | Used for |
//! |------|------|----------|
//! | small | `FONT_5X8` | scale labels, throttle, messages |
//! | normal | `FONT_6X10` | most text widgets |
//! | large | `ProFont` 12pt | scale readouts, warnings |

use embedded_graphics::{
    mono_font::{
        MonoFont,
        ascii::{FONT_5X8, FONT_6X10},
    },
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_12_POINT;

use crate::config::FontSize;

// =============================================================================
// Fonts
// =============================================================================

pub const SMALL_FONT: &MonoFont = &FONT_5X8;
pub const NORMAL_FONT: &MonoFont = &FONT_6X10;
pub const LARGE_FONT: &MonoFont = &PROFONT_12_POINT;

/// Font for a configured size class.
#[inline]
pub const fn font_for(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Small => SMALL_FONT,
        FontSize::Normal => NORMAL_FONT,
        FontSize::Large => LARGE_FONT,
    }
}

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered both ways; used for tick labels and boxed readouts.
pub const MIDDLE_CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

pub const MIDDLE_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Middle)
    .build();

pub const MIDDLE_RIGHT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Middle)
    .build();

/// Text sitting on top of its anchor (roll readout, pitch text).
pub const BOTTOM_CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Bottom)
    .build();

/// Text hanging below its anchor. Widget anchors mark the top of the text.
pub const TOP_CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

pub const TOP_RIGHT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Top)
    .build();

/// Top-baseline style for a configured alignment.
#[inline]
pub const fn aligned(align: Alignment) -> TextStyle {
    match align {
        Alignment::Left => TOP_LEFT,
        Alignment::Right => TOP_RIGHT,
        _ => TOP_CENTERED,
    }
}

/// Middle-baseline style for a configured alignment.
#[inline]
pub const fn middle_aligned(align: Alignment) -> TextStyle {
    match align {
        Alignment::Left => MIDDLE_LEFT,
        Alignment::Right => MIDDLE_RIGHT,
        _ => MIDDLE_CENTERED,
    }
}
