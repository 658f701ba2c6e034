//! Widget components of the overlay.
//!
//! - `attitude`: radar / simple attitude indicator and the home direction arrow
//! - `gps`: GPS status, HDOP and coordinates
//! - `heading`: linear compass, compass rose, home and waypoint distance
//! - `link`: RC RSSI, video link state, link quality
//! - `motion`: climb rate, wind, efficiency
//! - `overlay`: panel indicator, warning line, message log
//! - `scales`: altitude and speed tapes and texts
//! - `status`: flight mode, arm state, battery, trip, clock
//! - `throttle`: throttle bar or text
//! - `primitives`: shared outlined drawing utilities
//!
//! Every widget is a free function generic over
//! `DrawTarget<Color = Rgb565>`. Widgets do not check their own enable flag or
//! panel mask; [`render_frame`](crate::render_frame) does that before calling
//! them, so a widget function always draws when called.

mod attitude;
mod gps;
mod heading;
mod link;
mod motion;
mod overlay;
mod primitives;
mod scales;
mod status;
mod throttle;

pub use attitude::{draw_attitude, draw_home_direction};
pub use gps::{draw_coordinate, draw_gps_hdop, draw_gps_status};
pub use heading::{draw_compass_rose, draw_home_distance, draw_linear_compass, draw_waypoint_distance};
pub use link::{draw_link_quality, draw_link_state, draw_rssi};
pub use motion::{draw_climb_rate, draw_efficiency, draw_wind};
pub use overlay::{draw_messages, draw_panel_indicator, draw_warning};
pub use scales::{draw_air_speed, draw_altitude, draw_altitude_scale, draw_ground_speed, draw_speed_scale};
pub use status::{
    draw_arm_state,
    draw_battery_consumed,
    draw_battery_current,
    draw_battery_remaining,
    draw_battery_voltage,
    draw_flight_mode,
    draw_time,
    draw_total_trip,
};
pub use throttle::draw_throttle;
