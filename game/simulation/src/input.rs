//! Turns held drive keys into throttle and steering values, one repeat timer per axis

use std::time::Duration;

use common::input::{DriveAxis, DriveKey};
use common::*;

/// Input from the backend, consumed on the next tick
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputCommand {
    Key { key: DriveKey, down: bool },
}

/// Snapshot of the controller read by each tick
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DriveInput {
    pub throttle: i32,
    pub steering: i32,
}

#[derive(Debug)]
struct Axis {
    /// Most recently pressed key, `None` while the timer is idle
    held: Option<DriveKey>,
    since_fire: Duration,
    value: i32,
    /// Zero fires on every advance
    interval: Duration,
    max: i32,
}

#[derive(Debug)]
pub struct Controller {
    steering: Axis,
    throttle: Axis,
}

impl Axis {
    fn new(interval_ms: u64, max: i32) -> Self {
        Self {
            held: None,
            since_fire: Duration::ZERO,
            value: 0,
            interval: Duration::from_millis(interval_ms),
            max: max.abs(),
        }
    }

    fn press(&mut self, key: DriveKey) {
        if self.held.is_none() {
            self.since_fire = Duration::ZERO;
        }

        self.held = Some(key);
    }

    fn release(&mut self) {
        self.held = None;
        self.since_fire = Duration::ZERO;
        self.value = 0;
    }

    fn advance(&mut self, elapsed: Duration) {
        let key = match self.held {
            Some(key) => key,
            None => return,
        };

        if self.interval.is_zero() {
            self.fire(key);
            return;
        }

        self.since_fire += elapsed;
        while self.since_fire >= self.interval {
            self.since_fire -= self.interval;
            self.fire(key);
        }
    }

    fn fire(&mut self, key: DriveKey) {
        self.value = clamp(self.value + key.delta(), -self.max, self.max);
    }
}

impl Controller {
    pub fn new(config: &config::Input) -> Self {
        Self {
            steering: Axis::new(config.steering_repeat_ms, config.max_steering),
            throttle: Axis::new(config.throttle_repeat_ms, config.max_throttle),
        }
    }

    pub fn handle(&mut self, command: InputCommand) {
        match command {
            InputCommand::Key { key, down } => {
                trace!("drive key"; "key" => ?key, "down" => down);
                let axis = self.axis_mut(key.axis());
                if down {
                    axis.press(key);
                } else {
                    axis.release();
                }
            }
        }
    }

    /// Runs the repeat timers forward
    pub fn advance(&mut self, elapsed: Duration) {
        self.steering.advance(elapsed);
        self.throttle.advance(elapsed);
    }

    pub fn input(&self) -> DriveInput {
        DriveInput {
            throttle: self.throttle.value,
            steering: self.steering.value,
        }
    }

    fn axis_mut(&mut self, axis: DriveAxis) -> &mut Axis {
        match axis {
            DriveAxis::Steering => &mut self.steering,
            DriveAxis::Throttle => &mut self.throttle,
        }
    }
}
