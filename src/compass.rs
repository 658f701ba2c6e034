//! Linear (tape) compass layout.
//!
//! The compass shows `range` degrees around the current heading across
//! `width` pixels. Ticks are produced lazily by [`CompassTicks`]; the caller
//! draws them and then the boxed heading readout on top.
//!
//! # Tick Classification
//!
//! For each integer offset `r` in `[-range/2, +range/2]`:
//!
//! ```text
//! rr = (current + r) mod 360      (Euclidean, always 0..360)
//! rr mod major == 0  → major tick, labelled (N/E/S/W on multiples of 90)
//! rr mod minor == 0  → minor tick
//! x = r · width / range
//! ```
//!
//! # Home Marker
//!
//! Home is drawn boxed at its offset while inside the window, otherwise as an
//! edge marker on the side of the shorter arc ([`HomeMarker`]).

use core::fmt::Write;

use heapless::String;

use crate::colors::ColorClass;

/// Major or minor tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickKind {
    Minor,
    Major,
}

/// Tick produced by a scale layout.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TickMark {
    /// Pixel offset from the scale anchor along the scale axis.
    pub offset: i32,
    pub kind: TickKind,
    /// Scale value under the tick.
    pub value: i32,
    /// Text drawn next to major ticks.
    pub label: Option<String<12>>,
    pub color: ColorClass,
}

/// Cardinal letter or numeric heading for a major compass tick.
pub fn heading_label(heading: i32) -> String<12> {
    let mut s: String<12> = String::new();
    match heading {
        0 => s.push('N').ok(),
        90 => s.push('E').ok(),
        180 => s.push('S').ok(),
        270 => s.push('W').ok(),
        _ => write!(s, "{heading}").ok(),
    };
    s
}

/// Zero-padded three digit heading readout ("007").
pub fn heading_readout(heading: i32) -> String<4> {
    let mut s: String<4> = String::new();
    let _ = write!(s, "{:03}", heading.rem_euclid(360));
    s
}

/// `value` is a multiple of `step`. Non-positive steps match nothing.
#[inline]
pub(crate) fn on_step(value: i32, step: i32) -> bool {
    step > 0 && value.rem_euclid(step) == 0
}

/// Linear position of offset `r` on a scale of `extent` pixels.
#[inline]
pub(crate) fn scale_offset(r: i32, extent: i32, range: i32) -> i32 {
    (i64::from(r) * i64::from(extent) / i64::from(range)) as i32
}

// =============================================================================
// Tick Iterator
// =============================================================================

/// Lazy tick layout of a linear compass.
#[derive(Clone, Debug)]
pub struct CompassTicks {
    current: i32,
    range: i32,
    width: i32,
    minor: i32,
    major: i32,
    r: i32,
    end: i32,
}

/// Lay out the ticks of a linear compass centered on `current` degrees.
///
/// A non-positive `range` yields no ticks.
pub fn layout_compass(current: i32, range: i32, width: i32, minor: i32, major: i32) -> CompassTicks {
    let half = range.max(0) / 2;
    CompassTicks {
        current: current.rem_euclid(360),
        range,
        width,
        minor,
        major,
        r: -half,
        end: if range > 0 { half } else { -half - 1 },
    }
}

impl Iterator for CompassTicks {
    type Item = TickMark;

    fn next(&mut self) -> Option<TickMark> {
        while self.r <= self.end {
            let r = self.r;
            self.r += 1;

            let rr = (self.current + r).rem_euclid(360);
            let kind = if on_step(rr, self.major) {
                TickKind::Major
            } else if on_step(rr, self.minor) {
                TickKind::Minor
            } else {
                continue;
            };

            return Some(TickMark {
                offset: scale_offset(r, self.width, self.range),
                kind,
                value: rr,
                label: (kind == TickKind::Major).then(|| heading_label(rr)),
                color: ColorClass::Normal,
            });
        }
        None
    }
}

// =============================================================================
// Home Marker
// =============================================================================

/// Where the home bearing lands on the compass.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HomeMarker {
    /// Inside the window, at this pixel offset from the center.
    InView(i32),
    /// Outside the window, home is reached by turning left.
    OffLeft,
    /// Outside the window, home is reached by turning right.
    OffRight,
}

/// Shorter-arc side of `home` as seen from `current`, both in degrees.
///
/// Exactly antipodal bearings resolve to the right.
pub fn home_is_left(current: i32, home: i32) -> bool {
    let v = current.rem_euclid(360);
    let h = home.rem_euclid(360);
    (v > h && v - h < 180) || (v < h && h - v > 180)
}

/// Place the home bearing on a compass of `range` degrees across `width`
/// pixels.
pub fn home_marker(current: i32, home: i32, range: i32, width: i32) -> HomeMarker {
    let half = range.max(0) / 2;
    let d = (home - current).rem_euclid(360);

    // scan order matches the tick layout: leftmost match wins
    let offset = if d - 360 >= -half {
        Some(d - 360)
    } else if d <= half {
        Some(d)
    } else {
        None
    };

    match offset {
        Some(r) if range > 0 => HomeMarker::InView(scale_offset(r, width, range)),
        _ if home_is_left(current, home) => HomeMarker::OffLeft,
        _ => HomeMarker::OffRight,
    }
}
