use std::marker::PhantomData;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use common::*;
use config::Config;

use crate::car::Car;
use crate::error::CarError;
use crate::input::{Controller, DriveInput, InputCommand};
use crate::render::{draw_car, DrawOptions, Renderer};

pub const TICKS_PER_SECOND: usize = 60;

/// Simulated time covered by one tick
pub const TICK_DURATION: Duration = Duration::from_micros(1_000_000 / TICKS_PER_SECOND as u64);

/// Motor steps per tick
const STEPS_PER_TICK: u32 = 1;

static TICK: AtomicU32 = AtomicU32::new(0);

/// Ticks since the current simulation was created
pub fn current_tick() -> u32 {
    TICK.load(Ordering::Relaxed)
}

pub struct Simulation<R: Renderer> {
    car: Car,
    controller: Controller,
    draw_options: DrawOptions,

    renderer: PhantomData<R>,
}

impl<R: Renderer> Simulation<R> {
    pub fn new(config: &Config) -> Result<Self, CarError> {
        let car = Car::new(&config.car)?;
        TICK.store(0, Ordering::Relaxed);

        Ok(Self {
            car,
            controller: Controller::new(&config.input),
            draw_options: DrawOptions::from(&config.display),
            renderer: PhantomData,
        })
    }

    pub fn tick(&mut self, commands: &[InputCommand]) {
        for command in commands {
            self.controller.handle(*command);
        }

        self.controller.advance(TICK_DURATION);

        let DriveInput { throttle, steering } = self.controller.input();
        self.car.set_car_speed(throttle as F, steering as F);
        self.car.tick(STEPS_PER_TICK);

        TICK.fetch_add(1, Ordering::Relaxed);
    }

    // target is for this frame only
    pub fn render(&mut self, target: R::Target, renderer: &mut R, interpolation: f64) -> R::Target {
        // positions only change in ticks, nothing to interpolate
        let _ = interpolation;

        renderer.init(target);
        renderer.clear(self.draw_options.background);

        draw_car(renderer, &self.car, &self.draw_options);

        if let Err(e) = renderer.finish() {
            warn!("render finish() failed"; "error" => ?e);
        }

        renderer.deinit()
    }

    pub fn set_draw_options(&mut self, options: DrawOptions) {
        self.draw_options = options;
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn input(&self) -> DriveInput {
        self.controller.input()
    }
}
