//! 2D polygon transform pipeline.
//!
//! Every rotating glyph (attitude ladder, radar horizon, roll scale, heading
//! and wind arrows, home arrow) is a [`Polygon2D`]: a fixed list of local
//! vertices around the origin plus a screen anchor. Each frame the widget
//! calls [`Polygon2D::reset`], which copies the local vertices into the
//! polygon's own transform buffer and hands back a [`Transform`] guard. All
//! rotation and read-back goes through the guard, so transformed vertices
//! can never be read without a fresh reset.
//!
//! # Conventions
//!
//! Screen Y grows downwards, so a positive angle turns a shape clockwise on
//! screen:
//!
//! ```text
//! x' = x·cos(a) − y·sin(a)
//! y' = x·sin(a) + y·cos(a)
//! ```
//!
//! Trigonometry uses `micromath`'s fast approximations; sub-pixel error is
//! invisible once vertices are rounded to pixels.

use embedded_graphics::prelude::Point;
use heapless::Vec;
use micromath::F32;

/// Maximum vertices per shape.
pub const MAX_POLY_VERTS: usize = 32;

/// One vertex in shape-local coordinates.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vertex2D {
    pub x: f32,
    pub y: f32,
}

impl Vertex2D {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

    fn rotated(self, sin: f32, cos: f32) -> Self {
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

/// Shape with immutable local vertices and a private transform buffer.
#[derive(Clone, Debug)]
pub struct Polygon2D {
    local: Vec<Vertex2D, MAX_POLY_VERTS>,
    transformed: Vec<Vertex2D, MAX_POLY_VERTS>,
    anchor: Point,
}

impl Polygon2D {
    /// Build a shape. Vertices beyond [`MAX_POLY_VERTS`] are dropped.
    pub fn new(anchor: Point, vertices: &[Vertex2D]) -> Self {
        let mut local = Vec::new();
        for v in vertices.iter().take(MAX_POLY_VERTS) {
            local.push(*v).ok();
        }
        Self { local, transformed: Vec::new(), anchor }
    }

    /// Build a shape from `(x, y)` pairs.
    pub fn from_points(anchor: Point, points: &[(f32, f32)]) -> Self {
        let mut local = Vec::new();
        for &(x, y) in points.iter().take(MAX_POLY_VERTS) {
            local.push(Vertex2D::new(x, y)).ok();
        }
        Self { local, transformed: Vec::new(), anchor }
    }

    #[inline]
    pub const fn anchor(&self) -> Point { self.anchor }

    #[inline]
    pub fn set_anchor(&mut self, anchor: Point) { self.anchor = anchor; }

    #[inline]
    pub fn local(&self) -> &[Vertex2D] { &self.local }

    #[inline]
    pub fn len(&self) -> usize { self.local.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.local.is_empty() }

    /// Drop the previous frame's transform.
    pub fn invalidate(&mut self) { self.transformed.clear(); }

    /// Copy the local vertices into the transform buffer and start a new
    /// transform.
    pub fn reset(&mut self) -> Transform<'_> {
        self.transformed.clear();
        for v in &self.local {
            self.transformed.push(*v).ok();
        }
        Transform { poly: self }
    }
}

/// Exclusive access to a freshly reset transform buffer.
pub struct Transform<'a> {
    poly: &'a mut Polygon2D,
}

impl Transform<'_> {
    /// Rotate every vertex about the local origin, clockwise-positive.
    pub fn rotate(self, angle_deg: f32) -> Self {
        let (sin, cos) = sin_cos(angle_deg);
        for v in &mut self.poly.transformed {
            *v = v.rotated(sin, cos);
        }
        self
    }

    /// Shift every vertex down by `shift_y` pixels, then rotate by
    /// `angle_deg`. Used for the pitch-shifted, roll-rotated ladders.
    pub fn shift_rotate(self, shift_y: f32, angle_deg: f32) -> Self {
        let (sin, cos) = sin_cos(angle_deg);
        for v in &mut self.poly.transformed {
            let shifted = Vertex2D::new(v.x, v.y + shift_y);
            *v = shifted.rotated(sin, cos);
        }
        self
    }

    /// Transformed vertex `index` in screen coordinates.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.poly.transformed.get(index).map(|v| to_screen(*v, self.poly.anchor))
    }

    /// All transformed vertices in screen coordinates.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let anchor = self.poly.anchor;
        self.poly.transformed.iter().map(move |v| to_screen(*v, anchor))
    }

    /// Vertices taken as independent segments: (0, 1), (2, 3), ...
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let anchor = self.poly.anchor;
        self.poly
            .transformed
            .chunks_exact(2)
            .map(move |pair| (to_screen(pair[0], anchor), to_screen(pair[1], anchor)))
    }

    /// Vertices taken as a connected polyline: (0, 1), (1, 2), ...
    pub fn polyline(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let anchor = self.poly.anchor;
        self.poly
            .transformed
            .windows(2)
            .map(move |pair| (to_screen(pair[0], anchor), to_screen(pair[1], anchor)))
    }
}

#[inline]
fn sin_cos(angle_deg: f32) -> (f32, f32) {
    let rad = F32(angle_deg.to_radians());
    (rad.sin().0, rad.cos().0)
}

#[inline]
fn to_screen(v: Vertex2D, anchor: Point) -> Point {
    Point::new(anchor.x + libm::roundf(v.x) as i32, anchor.y + libm::roundf(v.y) as i32)
}

// =============================================================================
// Line Clipping
// =============================================================================

/// Inclusive rectangular clip window in screen coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Viewport {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

impl Viewport {
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    fn outcode(&self, x: f32, y: f32) -> u8 {
        let mut code = INSIDE;
        if x < self.min_x as f32 {
            code |= LEFT;
        } else if x > self.max_x as f32 {
            code |= RIGHT;
        }
        if y < self.min_y as f32 {
            code |= TOP;
        } else if y > self.max_y as f32 {
            code |= BOTTOM;
        }
        code
    }

    /// Cohen-Sutherland clip of segment `a`-`b`.
    ///
    /// Returns the visible part, or `None` when the segment lies entirely
    /// outside the window.
    pub fn clip_line(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let (mut x0, mut y0) = (a.x as f32, a.y as f32);
        let (mut x1, mut y1) = (b.x as f32, b.y as f32);
        let mut code0 = self.outcode(x0, y0);
        let mut code1 = self.outcode(x1, y1);

        // each pass moves one endpoint onto an edge, four edges per endpoint
        for _ in 0..8 {
            if code0 | code1 == INSIDE {
                return Some((
                    Point::new(libm::roundf(x0) as i32, libm::roundf(y0) as i32),
                    Point::new(libm::roundf(x1) as i32, libm::roundf(y1) as i32),
                ));
            }
            if code0 & code1 != INSIDE {
                return None;
            }

            let out = if code0 != INSIDE { code0 } else { code1 };
            let (x, y) = if out & BOTTOM != 0 {
                let y = self.max_y as f32;
                (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
            } else if out & TOP != 0 {
                let y = self.min_y as f32;
                (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
            } else if out & RIGHT != 0 {
                let x = self.max_x as f32;
                (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
            } else {
                let x = self.min_x as f32;
                (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
            };

            if out == code0 {
                x0 = x;
                y0 = y;
                code0 = self.outcode(x0, y0);
            } else {
                x1 = x;
                y1 = y;
                code1 = self.outcode(x1, y1);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow() -> Polygon2D {
        Polygon2D::from_points(Point::new(100, 50), &[(0.0, -10.0), (5.0, 5.0)])
    }

    // -------------------------------------------------------------------------
    // Transform
    // -------------------------------------------------------------------------

    #[test]
    fn test_reset_restores_local_vertices() {
        let mut p = arrow();
        {
            let t = p.reset().rotate(90.0);
            assert_eq!(t.point(0), Some(Point::new(110, 50)));
        }
        let t = p.reset();
        assert_eq!(t.point(0), Some(Point::new(100, 40)), "reset must discard earlier rotation");
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        let mut p = arrow();
        // nose points up; rotated 90 it must point right, 180 down, 270 left
        assert_eq!(p.reset().rotate(90.0).point(0), Some(Point::new(110, 50)));
        assert_eq!(p.reset().rotate(180.0).point(0), Some(Point::new(100, 60)));
        assert_eq!(p.reset().rotate(270.0).point(0), Some(Point::new(90, 50)));
    }

    #[test]
    fn test_full_turn_is_identity() {
        let mut p = arrow();
        let pts: std::vec::Vec<Point> = p.reset().rotate(360.0).points().collect();
        assert_eq!(pts, vec![Point::new(100, 40), Point::new(105, 55)]);
    }

    #[test]
    fn test_shift_rotate_shifts_before_rotating() {
        let mut p = Polygon2D::from_points(Point::zero(), &[(-10.0, 0.0), (10.0, 0.0)]);
        // pitch shift only
        let pts: std::vec::Vec<Point> = p.reset().shift_rotate(7.0, 0.0).points().collect();
        assert_eq!(pts, vec![Point::new(-10, 7), Point::new(10, 7)]);

        // shifted line rotated 90: (x, 7) -> (-7, x)
        let pts: std::vec::Vec<Point> = p.reset().shift_rotate(7.0, 90.0).points().collect();
        assert_eq!(pts, vec![Point::new(-7, -10), Point::new(-7, 10)]);
    }

    #[test]
    fn test_segments_and_polyline() {
        let mut p = Polygon2D::from_points(Point::zero(), &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
        let t = p.reset();
        assert_eq!(t.segments().count(), 2, "odd trailing vertex is ignored");
        assert_eq!(t.polyline().count(), 4);
    }

    #[test]
    fn test_invalidate_clears_buffer() {
        let mut p = arrow();
        let _ = p.reset();
        p.invalidate();
        assert_eq!(p.transformed.len(), 0);
        assert_eq!(p.len(), 2, "local vertices are untouched");
    }

    #[test]
    fn test_capacity_truncates() {
        let verts = [Vertex2D::new(1.0, 1.0); MAX_POLY_VERTS + 5];
        let p = Polygon2D::new(Point::zero(), &verts);
        assert_eq!(p.len(), MAX_POLY_VERTS);
    }

    // -------------------------------------------------------------------------
    // Clipping
    // -------------------------------------------------------------------------

    const VIEW: Viewport = Viewport { min_x: 0, min_y: 0, max_x: 100, max_y: 50 };

    #[test]
    fn test_clip_inside_is_unchanged() {
        let a = Point::new(10, 10);
        let b = Point::new(90, 40);
        assert_eq!(VIEW.clip_line(a, b), Some((a, b)));
    }

    #[test]
    fn test_clip_outside_is_rejected() {
        assert_eq!(VIEW.clip_line(Point::new(-10, -10), Point::new(-1, 60)), None);
        assert_eq!(VIEW.clip_line(Point::new(110, 10), Point::new(200, 20)), None);
    }

    #[test]
    fn test_clip_crossing_line() {
        let clipped = VIEW.clip_line(Point::new(-50, 25), Point::new(150, 25));
        assert_eq!(clipped, Some((Point::new(0, 25), Point::new(100, 25))));
    }

    #[test]
    fn test_clip_diagonal_endpoints_on_edges() {
        let (a, b) = VIEW.clip_line(Point::new(-20, -20), Point::new(120, 120)).unwrap();
        assert!(VIEW.contains(a) && VIEW.contains(b));
        assert_eq!(a, Point::new(0, 0));
        assert_eq!(b, Point::new(50, 50));
    }
}
