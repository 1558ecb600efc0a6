pub(crate) mod draw;
mod renderer;

pub use draw::{draw_arrow, draw_car, draw_point, draw_stick, DrawOptions};
pub use renderer::Renderer;
