//! Vertical (ticker tape) scale layout for altitude and speed.
//!
//! Unlike the compass the axis does not wrap. For each integer offset `r` in
//! `[-range/2, +range/2]`:
//!
//! ```text
//! rr = r + range/2 − floor(current)
//! rv = −rr + range/2            (value printed next to the tick)
//! y  = r · height / range
//! ```
//!
//! With [`ScaleFlags::NO_NEGATIVE`], ticks whose value would be negative are
//! skipped entirely and values at or below the floor `min_val` are flagged
//! with the warning color.
//!
//! # Readout Precision
//!
//! | Value | Format |
//! |-------|--------|
//! | `0` | `"  0"` |
//! | `0 < |v| < 10` | one decimal (`"3.5"`) |
//! | `|v| >= 10` | integer (`" 42"`) |
//!
//! The switch keeps the readout box width stable.

use core::fmt::Write;

use embedded_graphics::text::Alignment;
use heapless::String;

use crate::colors::ColorClass;
use crate::compass::{TickKind, TickMark, on_step, scale_offset};

/// Largest magnitude the scale follows; beyond it the tape stops moving.
const VALUE_LIMIT: f32 = 1.0e6;

/// Layout flags of a vertical scale.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ScaleFlags(u8);

impl ScaleFlags {
    pub const NONE: Self = Self(0);
    /// Skip negative values and color values at or below the floor.
    pub const NO_NEGATIVE: Self = Self(1 << 1);

    #[inline]
    pub const fn contains(self, other: Self) -> bool { self.0 & other.0 == other.0 }
}

/// Which side of the axis line the ticks and labels extend to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ScaleSide {
    /// Ticks grow to the right of the axis.
    #[default]
    Left,
    /// Ticks grow to the left of the axis.
    Right,
}

impl From<Alignment> for ScaleSide {
    fn from(align: Alignment) -> Self {
        match align {
            Alignment::Right => Self::Right,
            _ => Self::Left,
        }
    }
}

impl ScaleSide {
    /// +1 when ticks grow rightwards, -1 otherwise.
    #[inline]
    pub const fn direction(self) -> i32 {
        match self {
            Self::Left => 1,
            Self::Right => -1,
        }
    }
}

/// Lazy tick layout of a vertical scale.
#[derive(Clone, Debug)]
pub struct ScaleTicks {
    base: i32,
    range: i32,
    half: i32,
    height: i32,
    minor: i32,
    major: i32,
    flags: ScaleFlags,
    min_val: i32,
    r: i32,
    end: i32,
}

/// Integer part of the scale value, clamped so the tick arithmetic cannot
/// overflow. NaN maps to zero.
#[inline]
fn scale_base(current: f32) -> i32 {
    libm::floorf(current).clamp(-VALUE_LIMIT, VALUE_LIMIT) as i32
}

/// Lay out the ticks of a vertical scale centered on `current`.
///
/// A non-positive `range` yields no ticks.
pub fn layout_vscale(
    current: f32,
    range: i32,
    height: i32,
    minor: i32,
    major: i32,
    flags: ScaleFlags,
    min_val: i32,
) -> ScaleTicks {
    let half = range.max(0) / 2;
    ScaleTicks {
        base: scale_base(current),
        range,
        half,
        height,
        minor,
        major,
        flags,
        min_val,
        r: -half,
        end: if range > 0 { half } else { -half - 1 },
    }
}

impl Iterator for ScaleTicks {
    type Item = TickMark;

    fn next(&mut self) -> Option<TickMark> {
        while self.r <= self.end {
            let r = self.r;
            self.r += 1;

            let rr = r + self.half - self.base;
            let rv = -rr + self.half;

            let mut color = ColorClass::Normal;
            if self.flags.contains(ScaleFlags::NO_NEGATIVE) {
                if rv < 0 {
                    continue;
                }
                color = ColorClass::alert_if(rv <= self.min_val);
            }

            let kind = if on_step(rr, self.major) {
                TickKind::Major
            } else if on_step(rr, self.minor) {
                TickKind::Minor
            } else {
                continue;
            };

            let label = (kind == TickKind::Major).then(|| {
                let mut s: String<12> = String::new();
                let _ = write!(s, "{rv}");
                s
            });

            return Some(TickMark {
                offset: scale_offset(r, self.height, self.range),
                kind,
                value: rv,
                label,
                color,
            });
        }
        None
    }
}

/// Text of the boxed current-value readout.
pub fn format_readout(value: f32) -> String<12> {
    let mut s: String<12> = String::new();
    if value != 0.0 && value.abs() < 10.0 {
        let _ = write!(s, "{value:3.1}");
    } else {
        let _ = write!(s, "{:3}", value.clamp(-VALUE_LIMIT, VALUE_LIMIT) as i32);
    }
    s
}

/// Color of the current-value readout: warning while below the floor.
pub fn readout_color(value: f32, flags: ScaleFlags, min_val: i32) -> ColorClass {
    ColorClass::alert_if(flags.contains(ScaleFlags::NO_NEGATIVE) && value < min_val as f32)
}
