//! Named shapes of the transform pipeline.
//!
//! Each shape is defined once in local coordinates and owned by the
//! [`ShapeSet`] inside the render context. Attitude shapes are built for the
//! configured attitude scale and rebuilt only when that scale changes.
//!
//! | Shape | Drawn as | Transform |
//! |-------|----------|-----------|
//! | radar horizon | segments, clipped | shift by pitch, rotate by −roll |
//! | roll scale | polyline | rotate by −roll |
//! | simple ladder | segments | shift by pitch, rotate by −roll |
//! | home arrow (+ outline) | segments | rotate by home bearing − heading |
//! | heading arrow | fixed edge list | rotate by heading |
//! | wind arrow | triangle + tail | rotate by wind direction |

use embedded_graphics::prelude::Point;
use heapless::Vec;

use crate::config::OsdConfig;
use crate::polygon::{MAX_POLY_VERTS, Polygon2D, Vertex2D};

/// Radius of the roll scale arc at scale 1.0.
pub const ROLL_SCALE_RADIUS: f32 = 38.0;

/// Horizon shift per degree of pitch at scale 1.0.
pub const PITCH_PX_PER_DEG: f32 = 1.0;

#[rustfmt::skip]
const RADAR_HORIZON: [(f32, f32); 10] = [
    (-40.0, 0.0), (40.0, 0.0),
    (-8.0, -10.0), (8.0, -10.0),
    (-8.0, 10.0), (8.0, 10.0),
    (-5.0, -20.0), (5.0, -20.0),
    (-5.0, 20.0), (5.0, 20.0),
];

#[rustfmt::skip]
const SIMPLE_LADDER: [(f32, f32); 12] = [
    (-30.0, 0.0), (-10.0, 0.0),
    (10.0, 0.0), (30.0, 0.0),
    (-15.0, -10.0), (-5.0, -10.0),
    (5.0, -10.0), (15.0, -10.0),
    (-15.0, 10.0), (-5.0, 10.0),
    (5.0, 10.0), (15.0, 10.0),
];

#[rustfmt::skip]
const HOME_ARROW: [(f32, f32); 6] = [
    (0.0, -10.0), (0.0, 10.0),
    (0.0, -10.0), (-5.0, -4.0),
    (0.0, -10.0), (5.0, -4.0),
];

#[rustfmt::skip]
const HOME_ARROW_OUTLINE: [(f32, f32); 10] = [
    (-1.0, -7.0), (-1.0, 11.0),
    (1.0, -7.0), (1.0, 11.0),
    (-1.0, 11.0), (1.0, 11.0),
    (0.0, -12.0), (-7.0, -4.0),
    (0.0, -12.0), (7.0, -4.0),
];

/// Nose, left tail, right tail, tail notch.
pub const HEADING_ARROW: [(f32, f32); 4] = [(0.0, -14.0), (-6.0, 14.0), (6.0, 14.0), (0.0, 10.0)];

/// Edges of [`HEADING_ARROW`] as vertex index pairs.
pub const HEADING_ARROW_EDGES: [(usize, usize); 4] = [(0, 1), (0, 2), (3, 1), (3, 2)];

/// Arrow head triangle (0, 1, 2) and tail line (3, 4).
pub const WIND_ARROW: [(f32, f32); 5] = [(-3.0, -2.0), (0.0, -8.0), (3.0, -2.0), (0.0, 8.0), (0.0, -2.0)];

fn scaled(anchor: Point, points: &[(f32, f32)], scale: f32) -> Polygon2D {
    let mut verts: Vec<Vertex2D, MAX_POLY_VERTS> = Vec::new();
    for &(x, y) in points {
        verts.push(Vertex2D::new(x * scale, y * scale)).ok();
    }
    Polygon2D::new(anchor, &verts)
}

/// Roll scale arc from −60° to +60° every 10°, centered above the origin.
fn roll_scale(anchor: Point, scale: f32) -> Polygon2D {
    let radius = ROLL_SCALE_RADIUS * scale;
    let mut verts: Vec<Vertex2D, MAX_POLY_VERTS> = Vec::new();
    for step in -6..=6 {
        let rad = (step as f32 * 10.0).to_radians();
        verts.push(Vertex2D::new(radius * libm::sinf(rad), -radius * libm::cosf(rad))).ok();
    }
    Polygon2D::new(anchor, &verts)
}

/// Every rotating shape of the overlay.
pub struct ShapeSet {
    pub radar_horizon: Polygon2D,
    pub roll_scale: Polygon2D,
    pub simple_ladder: Polygon2D,
    pub home_arrow: Polygon2D,
    pub home_arrow_outline: Polygon2D,
    pub heading_arrow: Polygon2D,
    pub wind_arrow: Polygon2D,
    scale: f32,
}

impl ShapeSet {
    pub fn new(config: &OsdConfig) -> Self {
        let scale = config.attitude_scale;
        let atti = config.attitude.position;
        let home = config.home_direction.position;
        Self {
            radar_horizon: scaled(atti, &RADAR_HORIZON, scale),
            roll_scale: roll_scale(atti, scale),
            simple_ladder: scaled(atti, &SIMPLE_LADDER, scale),
            home_arrow: scaled(home, &HOME_ARROW, 1.0),
            home_arrow_outline: scaled(home, &HOME_ARROW_OUTLINE, 1.0),
            heading_arrow: scaled(config.compass_rose.position, &HEADING_ARROW, 1.0),
            wind_arrow: scaled(config.wind.position, &WIND_ARROW, 1.0),
            scale,
        }
    }

    /// Attitude scale the shapes were built for.
    #[inline]
    pub const fn scale(&self) -> f32 { self.scale }

    /// Follow the configured anchors, rebuilding when the attitude scale
    /// changed.
    pub fn sync(&mut self, config: &OsdConfig) {
        if self.scale != config.attitude_scale {
            log::debug!("attitude scale {} -> {}, rebuilding shapes", self.scale, config.attitude_scale);
            *self = Self::new(config);
            return;
        }
        let atti = config.attitude.position;
        self.radar_horizon.set_anchor(atti);
        self.roll_scale.set_anchor(atti);
        self.simple_ladder.set_anchor(atti);
        self.home_arrow.set_anchor(config.home_direction.position);
        self.home_arrow_outline.set_anchor(config.home_direction.position);
        self.heading_arrow.set_anchor(config.compass_rose.position);
        self.wind_arrow.set_anchor(config.wind.position);
    }

    /// Drop every transform left over from the previous frame.
    pub fn invalidate(&mut self) {
        self.radar_horizon.invalidate();
        self.roll_scale.invalidate();
        self.simple_ladder.invalidate();
        self.home_arrow.invalidate();
        self.home_arrow_outline.invalidate();
        self.heading_arrow.invalidate();
        self.wind_arrow.invalidate();
    }
}
