//! FPV On-Screen Display Simulator for Desktop.
//!
//! Renders the overlay into an `embedded-graphics-simulator` window, fed by
//! a synthetic flight.
//!
//! | Key | Action |
//! |-----|--------|
//! | `P` | next panel |
//! | `U` | toggle metric / imperial units |
//! | `A` | toggle radar / simple attitude |
//! | `T` | cycle throttle style |
//! | `M` | push a status message |
//! | `S` | pause the flight |
//!
//! Set `RUST_LOG=debug` to see panel clamping and warning transitions.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod flight;
mod timing;

use std::convert::Infallible;
use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use osd_render::config::{AttitudeStyle, SCREEN_HEIGHT, SCREEN_WIDTH, ThrottleStyle};
use osd_render::units::UnitSystem;
use osd_render::{FrameClock, OsdCanvas, OsdConfig, RenderContext, TimeOfDay, render_frame};

use crate::flight::vehicle_state;
use crate::timing::{FRAME_TIME, SIM_STEP};

/// Status messages cycled by the `M` key.
const MESSAGES: [&str; 4] = ["EKF3 IMU0 is using GPS", "Mission: 2 WP", "PreArm: Hardware safety switch", "Reached command #3"];

/// Simulator window as an overlay canvas.
struct OverlayDisplay(SimulatorDisplay<Rgb565>);

impl DrawTarget for OverlayDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.0.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> { self.0.clear(color) }
}

impl OriginDimensions for OverlayDisplay {
    fn size(&self) -> Size { self.0.size() }
}

impl OsdCanvas for OverlayDisplay {}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = OsdConfig::default();
    if let Err(e) = config.validate() {
        log::warn!("configuration: {e}");
    }

    let mut display = OverlayDisplay(SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("FPV OSD Sim", &output_settings);

    let mut ctx = RenderContext::new(&config);
    let start = Instant::now();
    let mut t = 0.0f32;
    let mut paused = false;
    let mut message_index = 0usize;

    window.update(&display.0);
    log::info!("simulator started, {} panels", config.max_panels);

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::P => ctx.panels.advance(config.max_panels),
                        Keycode::U => {
                            config.units = match config.units {
                                UnitSystem::Metric => UnitSystem::Imperial,
                                UnitSystem::Imperial => UnitSystem::Metric,
                            };
                            log::info!("units: {:?}", config.units);
                        }
                        Keycode::A => {
                            config.attitude_style = match config.attitude_style {
                                AttitudeStyle::Radar => AttitudeStyle::Simple,
                                AttitudeStyle::Simple => AttitudeStyle::Radar,
                            };
                        }
                        Keycode::T => {
                            config.throttle_style = match config.throttle_style {
                                ThrottleStyle::VerticalBar => ThrottleStyle::HorizontalBar,
                                ThrottleStyle::HorizontalBar => ThrottleStyle::Text,
                                ThrottleStyle::Text => ThrottleStyle::VerticalBar,
                            };
                        }
                        Keycode::M => {
                            ctx.messages.push(MESSAGES[message_index % MESSAGES.len()]);
                            message_index += 1;
                        }
                        Keycode::S => paused = !paused,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let state = vehicle_state(t);
        let elapsed = start.elapsed();
        let clock = FrameClock::at(elapsed.as_millis() as u64)
            .with_time(TimeOfDay::from_seconds(12 * 3600 + elapsed.as_secs() as u32));
        render_frame(&mut ctx, &mut display, &state, &config, &clock);
        window.update(&display.0);

        if !paused {
            t += SIM_STEP;
        }

        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
