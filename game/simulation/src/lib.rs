//! Stick-constraint car: point masses joined by distance constraints, driven by four motors

pub use crate::backend::{Exit, SimulationBackend};
pub use crate::body::{Body, PointHandle, StickHandle};
pub use crate::car::{Car, CHASSIS, MOTOR_COUNT};
pub use crate::error::{BodyError, CarError};
pub use crate::point::{Point, DEFAULT_POINT_RADIUS, STEP_SIZE};
pub use crate::render::{draw_arrow, draw_car, draw_point, draw_stick, DrawOptions, Renderer};
pub use crate::simulation::{current_tick, Simulation, TICKS_PER_SECOND, TICK_DURATION};
pub use crate::stick::Stick;
pub use perf::{Perf, PerfSummary};

mod backend;
mod body;
mod car;
mod error;
pub mod input;
mod perf;
mod point;
mod render;
mod simulation;
mod stick;
