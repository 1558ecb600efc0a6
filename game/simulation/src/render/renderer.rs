use color::ColorRgb;
use common::*;

/// Drawing surface of a backend. Coordinates are in window pixels, y pointing down.
pub trait Renderer {
    type Target;
    type Error: Debug;

    /// Initialize frame rendering
    fn init(&mut self, target: Self::Target);

    fn clear(&mut self, color: ColorRgb);

    fn line(&mut self, from: Vector2, to: Vector2, color: ColorRgb, width: F);

    fn filled_circle(&mut self, centre: Vector2, radius: F, color: ColorRgb);

    fn filled_triangle(&mut self, points: [Vector2; 3], color: ColorRgb);

    /// `pos` is the start of the text's baseline. Backends without a font draw nothing
    #[allow(unused_variables)]
    fn text(&mut self, text: &str, pos: Vector2, color: ColorRgb) {}

    /// Flush everything drawn since `init`
    fn finish(&mut self) -> Result<(), Self::Error>;

    /// End rendering frame
    fn deinit(&mut self) -> Self::Target;
}
