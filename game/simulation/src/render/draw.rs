use color::ColorRgb;
use common::*;

use crate::body::{Body, StickHandle};
use crate::car::Car;
use crate::point::Point;
use crate::render::Renderer;

pub const ARROW_WIDTH: F = 3.0;
pub const ARROW_HEAD_SIZE: F = 7.0;
pub const DIRECTION_ARROW_LENGTH: F = 30.0;
/// Velocities are tiny per tick, scale them up to be visible
pub const SPEED_ARROW_SCALE: F = 10.0;

pub const ARROW_COLOR: ColorRgb = ColorRgb::GREEN;
pub const MOTOR_COLOR: ColorRgb = ColorRgb::ORANGE;
pub const STICK_COLOR: ColorRgb = ColorRgb::BLACK;
pub const LABEL_COLOR: ColorRgb = ColorRgb::GREY;
pub const DIRECTION_COLOR: ColorRgb = ColorRgb::BLUE;
pub const SPEED_COLOR: ColorRgb = ColorRgb::RED;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    pub background: ColorRgb,
    pub labels: bool,
    pub directions: bool,
    pub speed_vectors: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        (&config::Display::default()).into()
    }
}

impl From<&config::Display> for DrawOptions {
    fn from(display: &config::Display) -> Self {
        Self {
            background: display.background,
            labels: display.draw_labels,
            directions: display.draw_directions,
            speed_vectors: display.draw_speed_vectors,
        }
    }
}

/// Line from `base` to `base + vec` with a triangular head on the end. A zero vector draws
/// nothing.
pub fn draw_arrow<R: Renderer>(renderer: &mut R, base: Vector2, vec: Vector2, color: ColorRgb) {
    let length = vec.magnitude();
    if length <= F::EPSILON {
        return;
    }

    let tip = base + vec;
    renderer.line(base, tip, color, ARROW_WIDTH);

    let direction = vec / length;
    let back = tip - direction * ARROW_HEAD_SIZE;
    let across = Vector2::new(-direction.y, direction.x) * (ARROW_HEAD_SIZE / 2.0);
    renderer.filled_triangle([tip, back + across, back - across], color);
}

pub fn draw_point<R: Renderer>(renderer: &mut R, point: &Point) {
    renderer.filled_circle(point.position(), point.radius(), MOTOR_COLOR);
}

pub fn draw_stick<R: Renderer>(
    renderer: &mut R,
    body: &Body,
    stick: StickHandle,
    options: &DrawOptions,
) {
    let [a, b] = body.stick(stick).points();
    let (a, b) = (body.point(a), body.point(b));
    draw_point(renderer, a);
    draw_point(renderer, b);
    renderer.line(a.position(), b.position(), STICK_COLOR, 1.0);

    let mid_point = body.stick_mid_point(stick);
    if options.labels {
        if let Some(label) = body.stick(stick).label() {
            renderer.text(label, mid_point, LABEL_COLOR);
        }
    }

    if options.directions {
        let direction = body.stick_direction(stick) * DIRECTION_ARROW_LENGTH;
        draw_arrow(renderer, mid_point, direction, DIRECTION_COLOR);
    }
}

pub fn draw_car<R: Renderer>(renderer: &mut R, car: &Car, options: &DrawOptions) {
    for motor in car.motors() {
        draw_point(renderer, motor);

        if options.speed_vectors {
            let speed = motor.velocity() * SPEED_ARROW_SCALE;
            draw_arrow(renderer, motor.position(), speed, SPEED_COLOR);
        }
    }

    for stick in car.chassis() {
        draw_stick(renderer, car.body(), *stick, options);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Clear(ColorRgb),
        Line(Vector2, Vector2, ColorRgb, F),
        Circle(Vector2, F, ColorRgb),
        Triangle([Vector2; 3], ColorRgb),
        Text(String, Vector2, ColorRgb),
    }

    /// Records every draw call of a frame
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub calls: Vec<Call>,
        pub frames: usize,
    }

    impl Renderer for RecordingRenderer {
        type Target = ();
        type Error = ();

        fn init(&mut self, _: Self::Target) {
            self.calls.clear();
        }

        fn clear(&mut self, color: ColorRgb) {
            self.calls.push(Call::Clear(color));
        }

        fn line(&mut self, from: Vector2, to: Vector2, color: ColorRgb, width: F) {
            self.calls.push(Call::Line(from, to, color, width));
        }

        fn filled_circle(&mut self, centre: Vector2, radius: F, color: ColorRgb) {
            self.calls.push(Call::Circle(centre, radius, color));
        }

        fn filled_triangle(&mut self, points: [Vector2; 3], color: ColorRgb) {
            self.calls.push(Call::Triangle(points, color));
        }

        fn text(&mut self, text: &str, pos: Vector2, color: ColorRgb) {
            self.calls.push(Call::Text(text.to_owned(), pos, color));
        }

        fn finish(&mut self) -> Result<(), Self::Error> {
            self.frames += 1;
            Ok(())
        }

        fn deinit(&mut self) -> Self::Target {}
    }

    impl RecordingRenderer {
        pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }
    }

    fn close(a: Vector2, b: Vector2) -> bool {
        a.x.approx_eq(b.x, (1e-4, 4)) && a.y.approx_eq(b.y, (1e-4, 4))
    }

    #[test]
    fn zero_arrow_draws_nothing() {
        let mut r = RecordingRenderer::default();
        draw_arrow(&mut r, Vector2::new(5.0, 5.0), Vector2::zero(), ARROW_COLOR);
        assert!(r.calls.is_empty());
    }

    #[test]
    fn arrow_shape() {
        let mut r = RecordingRenderer::default();
        let base = Vector2::new(10.0, 10.0);
        draw_arrow(&mut r, base, Vector2::new(20.0, 0.0), ARROW_COLOR);

        assert_eq!(r.calls.len(), 2);
        assert_eq!(
            r.calls[0],
            Call::Line(base, Vector2::new(30.0, 10.0), ARROW_COLOR, ARROW_WIDTH)
        );

        match &r.calls[1] {
            Call::Triangle([tip, left, right], color) => {
                assert_eq!(*color, ARROW_COLOR);
                assert!(close(*tip, Vector2::new(30.0, 10.0)));
                assert!(close(*left, Vector2::new(23.0, 13.5)));
                assert!(close(*right, Vector2::new(23.0, 6.5)));
            }
            other => panic!("expected triangle, got {:?}", other),
        }
    }

    #[test]
    fn stick_drawing_follows_options() {
        let mut body = Body::new();
        let stick =
            body.stick_between_positions(Vector2::new(0.0, 0.0), Vector2::new(0.0, 100.0), Some("S"));

        let mut r = RecordingRenderer::default();
        let mut options = DrawOptions::default();
        draw_stick(&mut r, &body, stick, &options);

        assert_eq!(r.count(|c| matches!(c, Call::Circle(..))), 2);
        assert_eq!(
            r.calls[2],
            Call::Line(Vector2::new(0.0, 0.0), Vector2::new(0.0, 100.0), STICK_COLOR, 1.0)
        );
        assert_eq!(
            r.calls[3],
            Call::Text("S".to_owned(), Vector2::new(0.0, 50.0), LABEL_COLOR)
        );
        assert_eq!(
            r.count(|c| matches!(c, Call::Triangle(_, col) if *col == DIRECTION_COLOR)),
            1
        );

        options.labels = false;
        options.directions = false;
        r.calls.clear();
        draw_stick(&mut r, &body, stick, &options);
        assert_eq!(r.calls.len(), 3);
    }

    #[test]
    fn car_speed_vectors() {
        let mut car = Car::new(&config::Car::default()).unwrap();
        let mut r = RecordingRenderer::default();
        let options = DrawOptions::default();

        // stationary motors have no arrow
        draw_car(&mut r, &car, &options);
        assert_eq!(r.count(|c| matches!(c, Call::Line(_, _, col, _) if *col == SPEED_COLOR)), 0);
        assert_eq!(r.count(|c| matches!(c, Call::Text(..))), 5);
        assert_eq!(r.count(|c| matches!(c, Call::Circle(..))), 4 + 5 * 2);

        car.set_car_speed(1.0, 0.0);
        r.calls.clear();
        draw_car(&mut r, &car, &options);

        let speed_lines = r
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Line(from, to, col, _) if *col == SPEED_COLOR => Some(*to - *from),
                _ => None,
            })
            .collect_vec();
        assert_eq!(speed_lines.len(), 4);
        for line in speed_lines {
            assert!(close(line, car.heading() * SPEED_ARROW_SCALE));
        }
    }
}
