use common::*;

use crate::body::{Body, PointHandle, StickHandle};

/// Multiplier applied to a point's velocity each step
pub const STEP_SIZE: F = 1.0;

pub const DEFAULT_POINT_RADIUS: F = 5.0;

/// Massless particle, see [Body::tick_point]
#[derive(Debug, Clone)]
pub struct Point {
    pub(crate) position: Vector2,
    pub(crate) velocity: Vector2,
    /// Sticks referencing this point, in attachment order
    sticks: SmallVec<[StickHandle; 4]>,
    radius: F,
}

impl Point {
    pub(crate) fn new(position: Vector2, radius: F) -> Self {
        Self {
            position,
            velocity: Vector2::zero(),
            sticks: SmallVec::new(),
            radius,
        }
    }

    pub(crate) fn attach(&mut self, stick: StickHandle) {
        if !self.sticks.contains(&stick) {
            self.sticks.push(stick);
        }
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn sticks(&self) -> &[StickHandle] {
        &self.sticks
    }

    pub fn radius(&self) -> F {
        self.radius
    }
}

impl Body {
    /// Moves the point by its velocity `steps` times, then resolves every attached stick once,
    /// which may move the other endpoints too
    pub fn tick_point(&mut self, handle: PointHandle, steps: u32) {
        let point = self.point_mut(handle);
        for _ in 0..steps {
            point.position += point.velocity * STEP_SIZE;
        }

        let sticks = point.sticks.clone();
        for stick in sticks {
            self.resolve_free(stick);
        }
    }
}
