//! Four motors braced by five sticks, driven along one shared chassis edge

use common::*;

use crate::body::{Body, PointHandle, StickHandle};
use crate::error::CarError;
use crate::point::Point;

pub const MOTOR_COUNT: usize = 4;

/// Motor indices of each chassis stick: front, left, rear, right, diagonal
pub const CHASSIS: [(usize, usize); 5] = [(0, 1), (0, 2), (2, 3), (3, 1), (0, 3)];

const CHASSIS_LABELS: [&str; 5] = ["S0", "S1", "S2", "S3", "S4"];

/// Motors driven by `throttle - steering`
const LEFT_MOTORS: [usize; 2] = [0, 2];

/// Motors 0 front-left, 1 front-right, 2 rear-left, 3 rear-right
pub struct Car {
    body: Body,
    motors: [PointHandle; MOTOR_COUNT],
    chassis: [StickHandle; CHASSIS.len()],
    reference_edge: usize,
    /// Last commanded scalar speed per motor
    speeds: [F; MOTOR_COUNT],
}

impl Car {
    pub fn new(config: &config::Car) -> Result<Self, CarError> {
        if config.reference_edge >= CHASSIS.len() {
            return Err(CarError::BadReferenceEdge {
                index: config.reference_edge,
                max: CHASSIS.len(),
            });
        }

        let mut body = Body::new();
        let (x, y) = config.origin;
        let motors = [0, 1, 2, 3].map(|i| {
            let pos = Vector2::new(
                x + config.spacing * (i % 2) as F,
                y + if i < 2 { 0.0 } else { config.spacing },
            );
            body.add_point(pos, config.motor_radius)
        });

        let mut labels = CHASSIS_LABELS.iter();
        let chassis = CHASSIS.map(|(a, b)| {
            body.stick_between_points(motors[a], motors[b], labels.next().copied())
        });

        debug!("created car"; "origin" => ?config.origin, "spacing" => config.spacing,
            "reference_edge" => config.reference_edge);

        Ok(Self {
            body,
            motors,
            chassis,
            reference_edge: config.reference_edge,
            speeds: [0.0; MOTOR_COUNT],
        })
    }

    /// Drives every motor along the reference edge at its given speed
    pub fn set_motor_speed(&mut self, speeds: [F; MOTOR_COUNT]) {
        self.speeds = speeds;

        let direction = self.heading();
        for (motor, speed) in self.motors.iter().zip(speeds) {
            self.body.set_velocity(*motor, direction * speed);
        }
    }

    pub fn set_car_speed(&mut self, throttle: F, steering: F) {
        let speeds = [0, 1, 2, 3].map(|i| {
            if LEFT_MOTORS.contains(&i) {
                throttle - steering
            } else {
                throttle + steering
            }
        });

        self.set_motor_speed(speeds);
    }

    /// Refreshes motor velocities against the current heading then moves each motor in order
    pub fn tick(&mut self, steps: u32) {
        self.set_motor_speed(self.speeds);

        for motor in self.motors {
            self.body.tick_point(motor, steps);
        }
    }

    pub fn motor_speeds(&self) -> [F; MOTOR_COUNT] {
        self.speeds
    }

    /// Panics if `index` >= [MOTOR_COUNT]
    pub fn motor(&self, index: usize) -> &Point {
        self.body.point(self.motors[index])
    }

    pub fn motors(&self) -> impl Iterator<Item = &Point> + '_ {
        self.motors.iter().map(move |h| self.body.point(*h))
    }

    pub fn chassis(&self) -> &[StickHandle] {
        &self.chassis
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mean motor position
    pub fn centroid(&self) -> Vector2 {
        let sum = self
            .motors()
            .fold(Vector2::zero(), |acc, motor| acc + motor.position());
        sum / MOTOR_COUNT as F
    }

    /// Direction of the reference edge
    pub fn heading(&self) -> Vector2 {
        self.body.stick_direction(self.chassis[self.reference_edge])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_car() -> Car {
        Car::new(&config::Car::default()).expect("default car")
    }

    fn assert_vec_eq(a: Vector2, b: Vector2) {
        assert!(
            a.x.approx_eq(b.x, (1e-4, 4)) && a.y.approx_eq(b.y, (1e-4, 4)),
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn layout() {
        let car = default_car();

        let positions = car.motors().map(Point::position).collect_vec();
        assert_eq!(
            positions,
            vec![
                Vector2::new(300.0, 350.0),
                Vector2::new(450.0, 350.0),
                Vector2::new(300.0, 500.0),
                Vector2::new(450.0, 500.0),
            ]
        );

        for (stick, (a, b)) in car.chassis().iter().zip(CHASSIS) {
            let stick = car.body().stick(*stick);
            assert_eq!(stick.points(), [car.motors[a], car.motors[b]]);
        }

        let diagonal = car.body().stick(car.chassis()[4]);
        assert_eq!(diagonal.label(), Some("S4"));
        assert!(diagonal
            .rest_length()
            .approx_eq(150.0 * std::f32::consts::SQRT_2, (1e-3, 4)));

        assert_eq!(car.motor(0).radius(), 5.0);
        assert_vec_eq(car.centroid(), Vector2::new(375.0, 425.0));
    }

    #[test]
    fn bad_reference_edge() {
        let config = config::Car {
            reference_edge: 5,
            ..Default::default()
        };

        assert_eq!(
            Car::new(&config).err(),
            Some(CarError::BadReferenceEdge { index: 5, max: 5 })
        );
    }

    #[test]
    fn straight_throttle() {
        let mut car = default_car();
        car.set_car_speed(2.0, 0.0);

        assert_eq!(car.motor_speeds(), [2.0; 4]);

        let velocity = car.motor(0).velocity();
        assert_vec_eq(velocity, car.heading() * 2.0);
        for motor in car.motors() {
            assert_eq!(motor.velocity(), velocity);
        }
    }

    #[test]
    fn steering_splits_sides() {
        let mut car = default_car();
        car.set_car_speed(0.0, 1.0);

        assert_eq!(car.motor_speeds(), [-1.0, 1.0, -1.0, 1.0]);

        let heading = car.heading();
        assert_vec_eq(car.motor(0).velocity(), -heading);
        assert_vec_eq(car.motor(2).velocity(), -heading);
        assert_vec_eq(car.motor(1).velocity(), heading);
        assert_vec_eq(car.motor(3).velocity(), heading);
    }

    #[test]
    fn every_motor_uses_reference_edge() {
        let config = config::Car {
            reference_edge: 0,
            ..Default::default()
        };
        let mut car = Car::new(&config).unwrap();
        car.set_car_speed(3.0, 0.0);

        // S0 points from front-left to front-right
        assert_vec_eq(car.heading(), Vector2::new(1.0, 0.0));
        for motor in car.motors() {
            assert_vec_eq(motor.velocity(), Vector2::new(3.0, 0.0));
        }
    }

    #[test]
    fn straight_drive_translates() {
        let mut car = default_car();
        let before = car.centroid();

        car.set_car_speed(2.0, 0.0);
        for _ in 0..30 {
            car.tick(1);
        }

        // S1 runs front to rear, so positive speed moves down the screen
        let moved = car.centroid() - before;
        assert!(moved.x.abs() < 1.0, "{:?}", moved);
        assert!(moved.y > 50.0, "{:?}", moved);
    }

    #[test]
    fn chassis_holds_shape() {
        common::logging::for_tests();
        let mut car = default_car();
        let heading_before = car.heading();

        car.set_car_speed(1.0, 2.0);
        for _ in 0..120 {
            car.tick(1);
        }

        for stick in car.chassis() {
            let rest = car.body().stick(*stick).rest_length();
            let length = car.body().stick_length(*stick);
            assert!(
                (length - rest).abs() < rest * 0.1,
                "stick {:?} drifted to {} from {}",
                stick,
                length,
                rest
            );
        }

        // opposing sides turn the car
        assert!(car.heading().angle(heading_before).0.abs() > 0.01);
    }

    #[test]
    fn tick_reapplies_heading() {
        let mut car = default_car();
        let initial = car.heading();
        car.set_car_speed(0.0, 1.0);
        car.tick(1);

        let turned = car.heading();
        assert_ne!(turned, initial);

        // velocities follow the rotated reference edge, not the one at command time
        car.tick(1);
        assert_vec_eq(car.motor(1).velocity(), turned);
        assert_eq!(car.motor_speeds(), [-1.0, 1.0, -1.0, 1.0]);
    }
}
