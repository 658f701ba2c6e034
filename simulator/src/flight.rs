//! Synthetic flight used to drive the overlay.
//!
//! Every value is a slow sine or cosine of the simulation time, so a few
//! minutes of running sweep all widgets through their ranges: the aircraft
//! circles home, climbs and descends, the battery drains and the links drop
//! out now and then to exercise the warning line.

use osd_render::VehicleState;
use osd_render::telemetry::{Battery, GeoPoint, GpsFix, GpsInfo, LinkStatus, VehicleClass, Waypoint, Wind};

/// Home position of the synthetic flight.
const HOME: GeoPoint = GeoPoint { latitude: 47.397_742, longitude: 8.545_594 };

/// Degrees of latitude per meter, close enough for a small circle.
const DEG_PER_M: f64 = 1.0 / 111_320.0;

/// Radius of the circle flown around home, in meters.
const ORBIT_M: f64 = 400.0;

/// Value oscillating between `min` and `max`.
fn fake_signal(t: f32, min: f32, max: f32, freq: f32) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// True for the `on` fraction of every `period` seconds.
fn duty(t: f32, period: f32, on: f32) -> bool { (t % period) < on }

/// Build the telemetry snapshot at simulation time `t` (seconds).
pub fn vehicle_state(t: f32) -> VehicleState {
    let mut s = VehicleState::default();

    // Orbit around home, clockwise, one lap per 120 s.
    let angle = f64::from(t) * std::f64::consts::TAU / 120.0;
    let north = ORBIT_M * angle.cos();
    let east = ORBIT_M * angle.sin();
    s.latitude = HOME.latitude + north * DEG_PER_M;
    s.longitude = HOME.longitude + east * DEG_PER_M / HOME.latitude.to_radians().cos();
    s.home = (t > 3.0).then_some(HOME);

    let track = (angle.to_degrees() + 90.0) as f32;
    s.attitude.heading = track.rem_euclid(360.0);
    s.attitude.roll = fake_signal(t, -35.0, 35.0, 0.4);
    s.attitude.pitch = fake_signal(t, -15.0, 20.0, 0.23);

    s.altitude_relative = fake_signal(t, 2.0, 180.0, 0.05);
    s.altitude_msl = 408.0 + s.altitude_relative;
    s.bottom_clearance = (s.altitude_relative < 30.0).then_some(s.altitude_relative);
    // derivative of the altitude sine above
    s.climb_rate = 89.0 * 0.05 * (t * 0.05).cos();

    s.vehicle_class = VehicleClass::FixedWing;
    s.air_speed = fake_signal(t, 9.0, 28.0, 0.11);
    s.ground_speed = s.air_speed + fake_signal(t, -4.0, 4.0, 0.07);
    s.throttle = fake_signal(t, 20.0, 100.0, 0.3);

    s.wind = Wind { speed_mps: fake_signal(t, 0.5, 9.0, 0.02), direction_deg: fake_signal(t, 200.0, 280.0, 0.01) };

    let fix = if t < 2.0 { GpsFix::NoFix } else { GpsFix::Fix3D };
    s.gps[0] = GpsInfo {
        fix,
        satellites: fake_signal(t, 8.0, 16.0, 0.03) as u8,
        hdop_centi: fake_signal(t, 70.0, 180.0, 0.05) as u16,
        latitude: s.latitude,
        longitude: s.longitude,
    };
    s.gps[1] = GpsInfo { fix: GpsFix::Fix2D, satellites: 6, hdop_centi: 240, ..s.gps[0] };

    let remaining = (100.0 - t * 0.25).max(0.0);
    s.battery = Battery {
        voltage: 12.6 + 4.2 * remaining / 100.0,
        current_centi_amps: (s.throttle * 35.0) as i32,
        remaining_percent: remaining as u8,
        consumed_mah: (t * 6.0) as i32,
    };

    s.rssi = fake_signal(t, 0.0, 255.0, 0.06) as u16;
    s.rc_channels[7] = fake_signal(t, 1000.0, 2000.0, 0.09) as u16;
    s.link = LinkStatus {
        lost: duty(t, 90.0, 4.0) && t > 60.0,
        jammed: false,
        rssi: fake_signal(t, -85.0, -40.0, 0.1) as i16,
        fec_fixed: (t * 3.0) as u32 % 50,
        errors: u32::from(duty(t, 25.0, 1.0)),
    };

    s.armed = t > 5.0;
    s.set_flight_mode(if s.armed { "LOITER" } else { "MANUAL" });

    let wp_number = ((t / 30.0) as u16 % 4) + 1;
    s.waypoint = Waypoint {
        number: wp_number,
        distance_m: fake_signal(t, 20.0, 1500.0, 0.04),
        bearing_deg: (i32::from(wp_number) * 90 + 15).rem_euclid(360),
    };
    s.total_trip_m = t * s.ground_speed.max(0.0);

    s
}
