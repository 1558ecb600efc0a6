use std::path::PathBuf;

use color::ColorRgb;
use common::input::DriveKey;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub display: Display,
    pub car: Car,
    pub input: Input,
    pub simulation: Simulation,
    pub headless: Headless,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Display {
    pub resolution: (u32, u32),
    pub background: ColorRgb,
    pub draw_labels: bool,
    pub draw_directions: bool,
    pub draw_speed_vectors: bool,
    /// TTF font used for stick labels, labels are not drawn without one
    pub font: Option<PathBuf>,
    pub font_size: f32,
    pub vsync: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Car {
    /// Position of the front-left motor
    pub origin: (f32, f32),
    /// Distance between adjacent motors
    pub spacing: f32,
    pub motor_radius: f32,
    /// Index of the chassis stick whose direction every motor is driven along
    pub reference_edge: usize,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Input {
    pub steering_repeat_ms: u64,
    /// 0 repeats once per tick
    pub throttle_repeat_ms: u64,
    pub max_steering: i32,
    pub max_throttle: i32,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Simulation {
    /// Sleep before the first tick, in ms
    pub start_delay: u32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Headless {
    pub run_for_ms: u64,
    /// Log the car's position every n ticks, 0 to disable
    pub report_every_ticks: u32,
    pub script: Vec<ScriptedKey>,
}

/// Key press or release injected by the headless backend
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ScriptedKey {
    pub at_ms: u64,
    pub key: DriveKey,
    pub down: bool,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            resolution: (800, 1000),
            background: ColorRgb::WHITE,
            draw_labels: true,
            draw_directions: true,
            draw_speed_vectors: true,
            font: None,
            font_size: 14.0,
            vsync: true,
        }
    }
}

impl Default for Car {
    fn default() -> Self {
        Self {
            origin: (300.0, 350.0),
            spacing: 150.0,
            motor_radius: 5.0,
            reference_edge: 1,
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self {
            steering_repeat_ms: 100,
            throttle_repeat_ms: 0,
            max_steering: 5,
            max_throttle: 5,
        }
    }
}

impl Default for Headless {
    fn default() -> Self {
        Self {
            run_for_ms: 5000,
            report_every_ticks: 60,
            script: Vec::new(),
        }
    }
}
