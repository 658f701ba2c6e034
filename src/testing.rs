//! Recording draw target for widget and render tests.

use core::convert::Infallible;
use std::collections::HashMap;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::OsdCanvas;
use crate::colors::BLACK;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Screen-sized canvas that remembers every pixel written since the last
/// clear, plus how often the frame hooks ran.
#[derive(Default)]
pub struct RecordingCanvas {
    pixels: HashMap<(i32, i32), Rgb565>,
    pub clears: usize,
    pub flips: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self { Self::default() }

    /// Nothing at all was written.
    pub fn is_blank(&self) -> bool { self.pixels.is_empty() }

    pub fn count_color(&self, color: Rgb565) -> usize { self.pixels.values().filter(|c| **c == color).count() }

    pub fn has_color(&self, color: Rgb565) -> bool { self.count_color(color) > 0 }

    pub fn pixel(&self, p: Point) -> Option<Rgb565> { self.pixels.get(&(p.x, p.y)).copied() }

    /// Any non-black pixel inside `area`.
    pub fn lit_in(&self, area: Rectangle) -> bool {
        self.pixels
            .iter()
            .any(|(&(x, y), c)| *c != BLACK && area.contains(Point::new(x, y)))
    }

    /// Non-black pixels as a sorted list, for comparing two drawings.
    pub fn lit_pixels(&self) -> Vec<(i32, i32, u16)> {
        let mut v: Vec<(i32, i32, u16)> = self
            .pixels
            .iter()
            .filter(|(_, c)| **c != BLACK)
            .map(|(&(x, y), c)| (x, y, c.into_storage()))
            .collect();
        v.sort_unstable();
        v
    }
}

impl DrawTarget for RecordingCanvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(p, color) in pixels {
            if bounds.contains(p) {
                self.pixels.insert((p.x, p.y), color);
            }
        }
        Ok(())
    }
}

impl OriginDimensions for RecordingCanvas {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl OsdCanvas for RecordingCanvas {
    fn clear_frame(&mut self) {
        self.pixels.clear();
        self.clears += 1;
    }

    fn flip(&mut self) { self.flips += 1; }
}
