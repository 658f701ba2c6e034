//! Frame buffer abstraction and frame timing.
//!
//! The renderer draws into anything implementing [`OsdCanvas`]: an
//! `embedded-graphics` [`DrawTarget`] with `Rgb565` pixels plus the two
//! frame-level hooks the host provides, clearing the overlay and presenting
//! it. On an analog OSD chip black is the transparent key color, so clearing
//! to black lets the video show through.
//!
//! [`FrameClock`] carries the monotonic time of the frame and the optional
//! wall-clock time used by the time widget.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::BLACK;

/// Frame buffer the overlay is drawn into.
pub trait OsdCanvas: DrawTarget<Color = Rgb565> {
    /// Reset the frame buffer before a new frame is drawn.
    fn clear_frame(&mut self) { self.clear(BLACK).ok(); }

    /// Present the finished frame. Single-buffered targets need nothing.
    fn flip(&mut self) {}
}

/// Wall-clock time of day.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self { Self { hours, minutes, seconds } }

    /// Split seconds since midnight, wrapping past 24 h.
    pub const fn from_seconds(total: u32) -> Self {
        let total = total % 86_400;
        Self {
            hours: (total / 3600) as u8,
            minutes: (total / 60 % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
}

/// Timing inputs of one frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FrameClock {
    /// Monotonic milliseconds, used by the warning and panel timers.
    pub now_ms: u64,
    /// Local time, `None` when the host has no clock.
    pub time_of_day: Option<TimeOfDay>,
}

impl FrameClock {
    /// Clock without a time-of-day source.
    pub const fn at(now_ms: u64) -> Self { Self { now_ms, time_of_day: None } }

    pub const fn with_time(mut self, time: TimeOfDay) -> Self {
        self.time_of_day = Some(time);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_from_seconds() {
        assert_eq!(TimeOfDay::from_seconds(0), TimeOfDay::new(0, 0, 0));
        assert_eq!(TimeOfDay::from_seconds(3661), TimeOfDay::new(1, 1, 1));
        assert_eq!(TimeOfDay::from_seconds(86_399), TimeOfDay::new(23, 59, 59));
        assert_eq!(TimeOfDay::from_seconds(86_400), TimeOfDay::new(0, 0, 0), "wraps at midnight");
    }

    #[test]
    fn test_clock_builders() {
        let c = FrameClock::at(1234);
        assert_eq!(c.now_ms, 1234);
        assert_eq!(c.time_of_day, None);
        let c = c.with_time(TimeOfDay::new(12, 0, 0));
        assert_eq!(c.time_of_day, Some(TimeOfDay::new(12, 0, 0)));
    }
}
