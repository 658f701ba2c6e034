//! Frame orchestration.
//!
//! [`render_frame`] draws one complete overlay frame. Everything that has to
//! survive between frames lives in [`RenderContext`]; the renderer keeps no
//! other state.
//!
//! # Frame Order
//!
//! | Step | Content |
//! |------|---------|
//! | 1 | clear, unit profile, panel clamp, shape reset, home vector |
//! | 2 | flight mode, arm state, battery |
//! | 3 | altitude tape and texts, speed tape and texts |
//! | 4 | home arrow, attitude, throttle |
//! | 5 | home and GPS coordinates, GPS status and HDOP |
//! | 6 | trip, clock, home / waypoint distance, compass rose, linear compass |
//! | 7 | climb, RSSI, link state, link quality, efficiency, wind |
//! | 8 | panel indicator, warning, message log, flip |
//!
//! Later steps draw over earlier ones. Widgets are skipped when disabled or
//! not on the current panel; the warning line is controlled by the alarm
//! configuration only.

use embedded_graphics::prelude::Point;

use crate::canvas::{FrameClock, OsdCanvas};
use crate::config::{CENTER_X, GpsWidgets, OsdConfig};
use crate::messages::MessageLog;
use crate::navigation::{GreatCircle, great_circle};
use crate::panels::{PanelChangeIndicator, PanelCursor};
use crate::shapes::ShapeSet;
use crate::telemetry::{GpsInfo, VehicleState};
use crate::units::UnitProfile;
use crate::warnings::{self, WarningMachine, WarningSlot};
use crate::widgets::{
    draw_air_speed,
    draw_altitude,
    draw_altitude_scale,
    draw_arm_state,
    draw_attitude,
    draw_battery_consumed,
    draw_battery_current,
    draw_battery_remaining,
    draw_battery_voltage,
    draw_climb_rate,
    draw_compass_rose,
    draw_coordinate,
    draw_efficiency,
    draw_flight_mode,
    draw_gps_hdop,
    draw_gps_status,
    draw_ground_speed,
    draw_home_direction,
    draw_home_distance,
    draw_link_quality,
    draw_link_state,
    draw_linear_compass,
    draw_messages,
    draw_panel_indicator,
    draw_rssi,
    draw_speed_scale,
    draw_throttle,
    draw_time,
    draw_total_trip,
    draw_warning,
    draw_waypoint_distance,
    draw_wind,
};

/// State carried from one frame to the next.
pub struct RenderContext {
    /// Active panel. The host moves it (e.g. from an RC switch); the renderer
    /// only clamps it.
    pub panels: PanelCursor,
    /// Status messages shown under the widgets.
    pub messages: MessageLog,
    indicator: PanelChangeIndicator,
    warnings: WarningMachine,
    shapes: ShapeSet,
    units: UnitProfile,
    home: Option<GreatCircle>,
}

impl RenderContext {
    pub fn new(config: &OsdConfig) -> Self {
        Self {
            panels: PanelCursor::new(),
            messages: MessageLog::new(),
            indicator: PanelChangeIndicator::new(),
            warnings: WarningMachine::new(),
            shapes: ShapeSet::new(config),
            units: config.units.select(),
            home: None,
        }
    }

    /// Unit profile of the last frame.
    #[inline]
    pub const fn units(&self) -> &UnitProfile { &self.units }

    /// Distance and bearing from the vehicle to home, as of the last frame.
    #[inline]
    pub const fn home(&self) -> Option<GreatCircle> { self.home }

    /// Warning on screen, `None` while idle.
    #[inline]
    pub const fn warning(&self) -> Option<WarningSlot> { self.warnings.current() }
}

/// Draw one overlay frame into `canvas` and present it.
pub fn render_frame<C>(ctx: &mut RenderContext, canvas: &mut C, state: &VehicleState, config: &OsdConfig, clock: &FrameClock)
where
    C: OsdCanvas,
{
    canvas.clear_frame();

    ctx.units = config.units.select();
    ctx.panels.clamp(config.max_panels);
    ctx.shapes.sync(config);
    ctx.shapes.invalidate();
    ctx.home = state
        .home
        .map(|home| great_circle(state.latitude, state.longitude, home.latitude, home.longitude));

    let panels = ctx.panels;
    let units = ctx.units;
    let home = ctx.home;
    let heading = state.attitude.heading;

    // -------------------------------------------------------------------------
    // Status
    // -------------------------------------------------------------------------

    if panels.visible(&config.flight_mode) {
        draw_flight_mode(canvas, &config.flight_mode, &state.flight_mode);
    }
    if panels.visible(&config.arm_state) {
        draw_arm_state(canvas, &config.arm_state, state.armed);
    }
    if panels.visible(&config.battery_voltage) {
        draw_battery_voltage(canvas, &config.battery_voltage, &state.battery);
    }
    if panels.visible(&config.battery_current) {
        draw_battery_current(canvas, &config.battery_current, &state.battery);
    }
    if panels.visible(&config.battery_remaining) {
        draw_battery_remaining(canvas, &config.battery_remaining, &state.battery);
    }
    if panels.visible(&config.battery_consumed) {
        draw_battery_consumed(canvas, &config.battery_consumed, &state.battery);
    }

    // -------------------------------------------------------------------------
    // Altitude and speed
    // -------------------------------------------------------------------------

    if panels.visible(&config.altitude_scale) {
        draw_altitude_scale(canvas, &config.altitude_scale, state, config.altitude_source, &units);
    }
    if panels.visible(&config.absolute_altitude) {
        draw_altitude(canvas, &config.absolute_altitude, "AA ", state.altitude_msl, &units);
    }
    if panels.visible(&config.relative_altitude) {
        draw_altitude(canvas, &config.relative_altitude, "A ", state.altitude_relative, &units);
    }
    if panels.visible(&config.speed_scale) {
        draw_speed_scale(canvas, &config.speed_scale, state, &units);
    }
    if panels.visible(&config.ground_speed) {
        draw_ground_speed(canvas, &config.ground_speed, state, &units);
    }
    if panels.visible(&config.air_speed) {
        draw_air_speed(canvas, &config.air_speed, state, &units);
    }

    // -------------------------------------------------------------------------
    // Attitude
    // -------------------------------------------------------------------------

    if let Some(home) = home
        && panels.visible(&config.home_direction)
    {
        let shapes = &mut ctx.shapes;
        draw_home_direction(canvas, &mut shapes.home_arrow, &mut shapes.home_arrow_outline, home.bearing_deg, heading);
    }
    if panels.visible(&config.attitude) {
        let clip = config.attitude_clip();
        draw_attitude(canvas, config.attitude_style, &mut ctx.shapes, &clip, &state.attitude);
    }
    if panels.visible(&config.throttle) {
        draw_throttle(canvas, &config.throttle, config.throttle_style, state.throttle);
    }

    // -------------------------------------------------------------------------
    // Position
    // -------------------------------------------------------------------------

    if let Some(home_point) = state.home {
        if panels.visible(&config.home_latitude) {
            draw_coordinate(canvas, &config.home_latitude, "H ", home_point.latitude);
        }
        if panels.visible(&config.home_longitude) {
            draw_coordinate(canvas, &config.home_longitude, "H ", home_point.longitude);
        }
    }
    for (widgets, gps) in config.gps.iter().zip(state.gps.iter()) {
        draw_gps(canvas, &panels, widgets, gps);
    }

    if panels.visible(&config.total_trip) {
        draw_total_trip(canvas, &config.total_trip, state.total_trip_m, &units);
    }
    if panels.visible(&config.time) {
        draw_time(canvas, &config.time, clock.time_of_day);
    }

    // -------------------------------------------------------------------------
    // Heading
    // -------------------------------------------------------------------------

    if let Some(home) = home
        && panels.visible(&config.home_distance)
    {
        draw_home_distance(canvas, &config.home_distance, home.distance_m, &units);
    }
    if panels.visible(&config.waypoint_distance) {
        draw_waypoint_distance(canvas, &config.waypoint_distance, &state.waypoint, &units);
    }
    if panels.visible(&config.compass_rose) {
        draw_compass_rose(
            canvas,
            &config.compass_rose,
            &config.rose,
            &mut ctx.shapes.heading_arrow,
            heading,
            home,
            &state.waypoint,
        );
    }
    if panels.visible(&config.linear_compass) {
        let center = Point::new(CENTER_X, config.linear_compass.position.y);
        draw_linear_compass(canvas, center, heading, home.map(|h| h.bearing_deg));
    }

    // -------------------------------------------------------------------------
    // Motion and link
    // -------------------------------------------------------------------------

    if panels.visible(&config.climb_rate) {
        draw_climb_rate(canvas, &config.climb_rate, state.climb_rate);
    }
    if panels.visible(&config.rssi) {
        draw_rssi(canvas, &config.rssi, state, &config.rssi_signal);
    }
    if panels.visible(&config.link_state) {
        draw_link_state(canvas, &config.link_state, &state.link);
    }
    if panels.visible(&config.link_quality) {
        draw_link_quality(canvas, &config.link_quality, state, &config.link_quality_signal);
    }
    if panels.visible(&config.efficiency) {
        draw_efficiency(canvas, &config.efficiency, &state.battery, state.ground_speed, &units);
    }
    if panels.visible(&config.wind) {
        draw_wind(canvas, &config.wind, &mut ctx.shapes.wind_arrow, &state.wind, &units);
    }

    // -------------------------------------------------------------------------
    // Overlays
    // -------------------------------------------------------------------------

    if let Some(panel) = ctx.indicator.update(panels.current(), clock.now_ms) {
        draw_panel_indicator(canvas, panel);
    }

    let active = warnings::evaluate(state, config, &units);
    ctx.warnings.update(&active, clock.now_ms);
    draw_warning(canvas, &config.warning, ctx.warnings.text());

    if panels.visible(&config.messages) {
        draw_messages(canvas, &config.messages, &ctx.messages);
    }

    canvas.flip();
}

fn draw_gps<C>(canvas: &mut C, panels: &PanelCursor, widgets: &GpsWidgets, gps: &GpsInfo)
where
    C: OsdCanvas,
{
    if panels.visible(&widgets.status) {
        draw_gps_status(canvas, &widgets.status, gps);
    }
    if panels.visible(&widgets.hdop) {
        draw_gps_hdop(canvas, &widgets.hdop, gps);
    }
    if panels.visible(&widgets.latitude) {
        draw_coordinate(canvas, &widgets.latitude, "", gps.latitude);
    }
    if panels.visible(&widgets.longitude) {
        draw_coordinate(canvas, &widgets.longitude, "", gps.longitude);
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::colors::RED;
    use crate::config::{PANEL_INDICATOR_Y, WidgetConfig};
    use crate::telemetry::{GeoPoint, GpsFix};
    use crate::testing::RecordingCanvas;
    use crate::thresholds::{PANEL_INDICATOR_MS, WARNING_ROTATION_MS};
    use crate::units::UnitSystem;

    /// State that raises no warning with the default alarm configuration.
    fn healthy_state() -> VehicleState {
        let mut s = VehicleState::default();
        s.gps[0] = GpsInfo { fix: GpsFix::Fix3D, satellites: 12, ..GpsInfo::default() };
        s.latitude = 47.3977;
        s.longitude = 8.5456;
        s.home = Some(GeoPoint { latitude: 47.3967, longitude: 8.5456 });
        s.rssi = 255;
        s.battery.remaining_percent = 100;
        s.battery.voltage = 16.4;
        s
    }

    /// Three panels; panel 3 carries no widget in the default layout.
    fn three_panels() -> OsdConfig {
        OsdConfig { max_panels: 3, ..OsdConfig::default() }
    }

    fn indicator_area() -> Rectangle { Rectangle::new(Point::new(CENTER_X - 12, PANEL_INDICATOR_Y), Size::new(24, 10)) }

    // -------------------------------------------------------------------------
    // Frame lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_frame_cleared_and_flipped_once() {
        let cfg = OsdConfig::default();
        let mut ctx = RenderContext::new(&cfg);
        let mut canvas = RecordingCanvas::new();
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(0));
        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.flips, 1);
        assert!(!canvas.is_blank());
    }

    #[test]
    fn test_previous_frame_is_cleared() {
        let cfg = three_panels();
        let mut ctx = RenderContext::new(&cfg);
        let mut canvas = RecordingCanvas::new();
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(0));
        assert!(!canvas.is_blank());

        ctx.panels.set(3);
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(10));
        // only the panel indicator is left
        assert!(canvas.lit_in(indicator_area()));
        let above = Rectangle::new(Point::zero(), Size::new(480, PANEL_INDICATOR_Y as u32));
        assert!(!canvas.lit_in(above));
    }

    // -------------------------------------------------------------------------
    // Panels
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_panel_is_blank_after_indicator() {
        let cfg = three_panels();
        let mut ctx = RenderContext::new(&cfg);
        ctx.panels.set(3);
        let mut canvas = RecordingCanvas::new();

        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(0));
        assert!(canvas.lit_in(indicator_area()));

        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(PANEL_INDICATOR_MS));
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_panel_cursor_clamped() {
        let cfg = OsdConfig::default();
        let mut ctx = RenderContext::new(&cfg);
        ctx.panels.set(9);
        let mut canvas = RecordingCanvas::new();
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(0));
        assert_eq!(ctx.panels.current(), 1);
    }

    #[test]
    fn test_disabled_widget_not_drawn() {
        let mut cfg = three_panels();
        let mut ctx = RenderContext::new(&cfg);
        ctx.panels.set(3);
        let mut canvas = RecordingCanvas::new();
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(0));

        cfg.arm_state = WidgetConfig::at(10, 10).on_panels(0x0004);
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(PANEL_INDICATOR_MS + 10));
        assert!(canvas.has_color(RED), "DISARMED on panel 3");

        cfg.arm_state = cfg.arm_state.disabled();
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(PANEL_INDICATOR_MS + 20));
        assert!(canvas.is_blank());
    }

    // -------------------------------------------------------------------------
    // Warnings
    // -------------------------------------------------------------------------

    #[test]
    fn test_warning_ignores_panels() {
        let cfg = three_panels();
        let mut ctx = RenderContext::new(&cfg);
        ctx.panels.set(3);
        let mut state = healthy_state();
        state.home = None;

        let mut canvas = RecordingCanvas::new();
        render_frame(&mut ctx, &mut canvas, &state, &cfg, &FrameClock::at(PANEL_INDICATOR_MS));
        assert_eq!(ctx.warning(), Some(WarningSlot::NoHome));
        assert!(canvas.has_color(RED));
    }

    #[test]
    fn test_warning_clears_with_condition() {
        let cfg = OsdConfig::default();
        let mut ctx = RenderContext::new(&cfg);
        let mut canvas = RecordingCanvas::new();

        let mut low = healthy_state();
        low.battery.remaining_percent = 10;
        render_frame(&mut ctx, &mut canvas, &low, &cfg, &FrameClock::at(0));
        assert_eq!(ctx.warning(), Some(WarningSlot::LowBattery));

        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(WARNING_ROTATION_MS / 2));
        assert_eq!(ctx.warning(), None);
    }

    // -------------------------------------------------------------------------
    // Per-frame derived values
    // -------------------------------------------------------------------------

    #[test]
    fn test_home_vector_follows_state() {
        let cfg = OsdConfig::default();
        let mut ctx = RenderContext::new(&cfg);
        let mut canvas = RecordingCanvas::new();

        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(0));
        let home = ctx.home().expect("home is set");
        // home lies ~111 m due south
        assert!((home.distance_m - 111.2).abs() < 1.0, "distance {}", home.distance_m);
        assert!((home.bearing_deg - 180.0).abs() < 0.5, "bearing {}", home.bearing_deg);

        let mut lost = healthy_state();
        lost.home = None;
        render_frame(&mut ctx, &mut canvas, &lost, &cfg, &FrameClock::at(20));
        assert!(ctx.home().is_none());
    }

    #[test]
    fn test_units_follow_config() {
        let mut cfg = OsdConfig::default();
        let mut ctx = RenderContext::new(&cfg);
        let mut canvas = RecordingCanvas::new();
        assert_eq!(ctx.units().short_label, "m");

        cfg.units = UnitSystem::Imperial;
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(0));
        assert_eq!(ctx.units().short_label, "ft");
    }

    #[test]
    fn test_messages_drawn_on_their_panel() {
        let cfg = OsdConfig::default();
        let area = Rectangle::new(cfg.messages.position, Size::new(60, 8));

        let mut ctx = RenderContext::new(&cfg);
        let mut canvas = RecordingCanvas::new();
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(0));
        let without = canvas.lit_in(area);

        ctx.messages.push("PreArm: Compass not calibrated");
        render_frame(&mut ctx, &mut canvas, &healthy_state(), &cfg, &FrameClock::at(10));
        assert!(!without);
        assert!(canvas.lit_in(area));
    }
}
