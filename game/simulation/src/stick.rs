use common::*;

use crate::body::{Body, PointHandle, StickHandle};
use crate::error::BodyError;

/// Distance constraint between two points of a [Body]
#[derive(Debug, Clone)]
pub struct Stick {
    points: [PointHandle; 2],
    /// Distance between the points at creation, never changes
    rest_length: F,
    label: Option<String>,
}

impl Stick {
    pub(crate) fn new(points: [PointHandle; 2], rest_length: F, label: Option<String>) -> Self {
        Self {
            points,
            rest_length,
            label,
        }
    }

    pub fn points(&self) -> [PointHandle; 2] {
        self.points
    }

    pub fn rest_length(&self) -> F {
        self.rest_length
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Body {
    /// Moves the stick's endpoints back to its rest length. With no `fixed` point the
    /// correction is split evenly between both ends, otherwise only the other end moves.
    ///
    /// Coincident endpoints have no direction to correct along and are left untouched.
    pub fn update_stick(
        &mut self,
        handle: StickHandle,
        fixed: Option<PointHandle>,
    ) -> Result<(), BodyError> {
        match fixed {
            None => self.resolve_free(handle),
            Some(fixed) => {
                let [a, b] = self.stick(handle).points();
                let movable = if fixed == a {
                    b
                } else if fixed == b {
                    a
                } else {
                    return Err(BodyError::NotAnEndpoint {
                        stick: handle,
                        point: fixed,
                    });
                };

                self.resolve_anchored(handle, fixed, movable);
            }
        }

        Ok(())
    }

    pub(crate) fn resolve_free(&mut self, handle: StickHandle) {
        let stick = self.stick(handle);
        let [a, b] = stick.points();
        let rest_length = stick.rest_length();

        let pa = self.point(a).position();
        let pb = self.point(b).position();
        let length = pa.distance(pb);
        if length <= F::EPSILON {
            trace!("skipping resolution of collapsed stick"; "stick" => handle);
            return;
        }

        let correction = (pa - pb) / length * ((rest_length - length) / 2.0);
        self.point_mut(a).position += correction;
        self.point_mut(b).position -= correction;
    }

    fn resolve_anchored(&mut self, handle: StickHandle, fixed: PointHandle, movable: PointHandle) {
        let rest_length = self.stick(handle).rest_length();

        let fixed_pos = self.point(fixed).position();
        let movable_pos = self.point(movable).position();
        let length = fixed_pos.distance(movable_pos);
        if length <= F::EPSILON {
            trace!("skipping resolution of collapsed stick"; "stick" => handle);
            return;
        }

        let correction = (fixed_pos - movable_pos) / length * (rest_length - length);
        self.point_mut(movable).position -= correction;
    }

    /// Current distance between the endpoints
    pub fn stick_length(&self, handle: StickHandle) -> F {
        let [a, b] = self.stick(handle).points();
        self.point(a).position().distance(self.point(b).position())
    }

    /// Unit vector from the first point towards the second, zero if they coincide
    pub fn stick_direction(&self, handle: StickHandle) -> Vector2 {
        let [a, b] = self.stick(handle).points();
        let delta = self.point(b).position() - self.point(a).position();
        if delta.magnitude2() <= F::EPSILON * F::EPSILON {
            Vector2::zero()
        } else {
            delta.normalize()
        }
    }

    /// Half the rest length along the stick from its first point. This drifts from the real
    /// midpoint while the stick is stretched or compressed.
    pub fn stick_mid_point(&self, handle: StickHandle) -> Vector2 {
        let stick = self.stick(handle);
        let [a, _] = stick.points();
        self.point(a).position() + self.stick_direction(handle) * (stick.rest_length() / 2.0)
    }
}
