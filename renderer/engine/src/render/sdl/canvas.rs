use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Point;
use sdl2::render::WindowCanvas;

use color::ColorRgb;
use common::*;
use simulation::Renderer;

use crate::render::sdl::backend::SdlBackendError;
use crate::render::sdl::text::{self, TextRenderer};

/// Draws through SDL2_gfx primitives on the window canvas
pub struct CanvasRenderer {
    canvas: Option<WindowCanvas>,
    text: Option<TextRenderer>,
    background: ColorRgb,
    /// First draw error of the frame, reported by `finish`
    error: Option<String>,
}

impl CanvasRenderer {
    pub fn new(text: Option<TextRenderer>) -> Self {
        Self {
            canvas: None,
            text,
            background: ColorRgb::WHITE,
            error: None,
        }
    }

    /// Runs `draw` on the canvas of the current frame, keeping the first error
    fn draw(&mut self, draw: impl FnOnce(&mut WindowCanvas) -> Result<(), String>) {
        let result = match self.canvas.as_mut() {
            Some(canvas) => draw(canvas),
            None => {
                debug_assert!(false, "draw outside of frame");
                return;
            }
        };

        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }
}

fn sdl_color(color: ColorRgb) -> Color {
    let (r, g, b): (u8, u8, u8) = color.into();
    Color::RGB(r, g, b)
}

/// gfx takes i16 coordinates, anything off screen is clipped anyway
fn gfx_coords(v: Vector2) -> (i16, i16) {
    let clamp_i16 = |f: F| f.round().clamp(i16::MIN as F, i16::MAX as F) as i16;
    (clamp_i16(v.x), clamp_i16(v.y))
}

impl Renderer for CanvasRenderer {
    type Target = WindowCanvas;
    type Error = SdlBackendError;

    fn init(&mut self, target: Self::Target) {
        self.canvas = Some(target);
        self.error = None;
    }

    fn clear(&mut self, color: ColorRgb) {
        self.background = color;
        self.draw(|canvas| {
            canvas.set_draw_color(sdl_color(color));
            canvas.clear();
            Ok(())
        });
    }

    fn line(&mut self, from: Vector2, to: Vector2, color: ColorRgb, width: F) {
        let (x1, y1) = gfx_coords(from);
        let (x2, y2) = gfx_coords(to);
        let width = width.round().clamp(1.0, u8::MAX as F) as u8;
        self.draw(|canvas| canvas.thick_line(x1, y1, x2, y2, width, sdl_color(color)));
    }

    fn filled_circle(&mut self, centre: Vector2, radius: F, color: ColorRgb) {
        let (x, y) = gfx_coords(centre);
        let radius = radius.round().max(0.0) as i16;
        self.draw(|canvas| canvas.filled_circle(x, y, radius, sdl_color(color)));
    }

    fn filled_triangle(&mut self, points: [Vector2; 3], color: ColorRgb) {
        let [(x1, y1), (x2, y2), (x3, y3)] = points.map(gfx_coords);
        self.draw(|canvas| canvas.filled_trigon(x1, y1, x2, y2, x3, y3, sdl_color(color)));
    }

    fn text(&mut self, label: &str, pos: Vector2, color: ColorRgb) {
        let background = self.background;
        let (canvas, renderer) = match (self.canvas.as_mut(), self.text.as_mut()) {
            (Some(canvas), Some(text)) => (canvas, text),
            _ => return,
        };

        let result = renderer
            .rasterize(label, pos)
            .iter()
            .try_for_each(|&(x, y, coverage)| {
                canvas.set_draw_color(sdl_color(text::blend(background, color, coverage)));
                canvas.draw_point(Point::new(x, y))
            });

        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.present();
        }

        match self.error.take() {
            Some(e) => Err(SdlBackendError::Sdl(e)),
            None => Ok(()),
        }
    }

    fn deinit(&mut self) -> Self::Target {
        match self.canvas.take() {
            Some(canvas) => canvas,
            None => unreachable!("deinit without init"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_round_and_clamp() {
        assert_eq!(gfx_coords(Vector2::new(10.4, 10.6)), (10, 11));
        assert_eq!(gfx_coords(Vector2::new(-1e9, 1e9)), (i16::MIN, i16::MAX));
    }
}
