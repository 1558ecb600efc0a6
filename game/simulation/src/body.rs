//! Arena owning every [Point] and [Stick] of a body. Points and sticks refer to each other by
//! handle only, a point keeps the handles of the sticks attached to it.

use common::*;

use crate::point::{Point, DEFAULT_POINT_RADIUS};
use crate::stick::Stick;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PointHandle(usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StickHandle(usize);

common::logging::slog_value_debug!(PointHandle);
common::logging::slog_value_debug!(StickHandle);

/// Handles are only valid for the body that created them, and stay valid for its lifetime
#[derive(Default, Debug, Clone)]
pub struct Body {
    points: Vec<Point>,
    sticks: Vec<Stick>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, position: Vector2, radius: F) -> PointHandle {
        let handle = PointHandle(self.points.len());
        self.points.push(Point::new(position, radius));
        handle
    }

    /// Creates a new point at each position and a stick between them
    pub fn stick_between_positions(
        &mut self,
        a: Vector2,
        b: Vector2,
        label: Option<&str>,
    ) -> StickHandle {
        let a = self.add_point(a, DEFAULT_POINT_RADIUS);
        let b = self.add_point(b, DEFAULT_POINT_RADIUS);
        self.stick_between_points(a, b, label)
    }

    /// The rest length is the current distance between the two points
    pub fn stick_between_points(
        &mut self,
        a: PointHandle,
        b: PointHandle,
        label: Option<&str>,
    ) -> StickHandle {
        let handle = StickHandle(self.sticks.len());
        let rest_length = self.point(a).position().distance(self.point(b).position());

        self.sticks
            .push(Stick::new([a, b], rest_length, label.map(str::to_owned)));
        self.point_mut(a).attach(handle);
        if a != b {
            self.point_mut(b).attach(handle);
        }

        trace!("created stick"; "stick" => handle, "from" => a, "to" => b, "rest_length" => rest_length);
        handle
    }

    /// Panics if the handle is from another body
    pub fn point(&self, handle: PointHandle) -> &Point {
        &self.points[handle.0]
    }

    pub(crate) fn point_mut(&mut self, handle: PointHandle) -> &mut Point {
        &mut self.points[handle.0]
    }

    /// Panics if the handle is from another body
    pub fn stick(&self, handle: StickHandle) -> &Stick {
        &self.sticks[handle.0]
    }

    pub fn points(&self) -> impl Iterator<Item = (PointHandle, &Point)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (PointHandle(i), p))
    }

    pub fn sticks(&self) -> impl Iterator<Item = (StickHandle, &Stick)> + '_ {
        self.sticks
            .iter()
            .enumerate()
            .map(|(i, s)| (StickHandle(i), s))
    }

    pub fn set_position(&mut self, handle: PointHandle, position: Vector2) {
        self.point_mut(handle).position = position;
    }

    pub fn set_velocity(&mut self, handle: PointHandle, velocity: Vector2) {
        self.point_mut(handle).velocity = velocity;
    }
}
