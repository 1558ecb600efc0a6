use std::path::Path;

use color::ColorRgb;
use common::*;
use rusttype::{point, Font, Point, Scale};

/// CPU rasterized label text
pub struct TextRenderer {
    font: Font<'static>,
    scale: Scale,
    /// Reused between calls
    pixels: Vec<(i32, i32, f32)>,
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to read font: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a valid font file")]
    InvalidFont,
}

impl TextRenderer {
    pub fn load(path: &Path, size: F) -> Result<Self, FontError> {
        trace!("loading font"; "path" => %path.display());
        let bytes = std::fs::read(path)?;
        let font = Font::try_from_vec(bytes).ok_or(FontError::InvalidFont)?;

        Ok(Self {
            font,
            scale: Scale::uniform(size),
            pixels: Vec::with_capacity(512),
        })
    }

    /// Pixel positions and coverage of `text` with its baseline starting at `pos`
    pub fn rasterize(&mut self, text: &str, pos: Vector2) -> &[(i32, i32, f32)] {
        self.pixels.clear();

        let start = baseline_origin(pos);
        for glyph in self.font.layout(text, self.scale, start) {
            if let Some(bounds) = glyph.pixel_bounding_box() {
                let pixels = &mut self.pixels;
                glyph.draw(|x, y, coverage| {
                    if coverage > 0.05 {
                        pixels.push((bounds.min.x + x as i32, bounds.min.y + y as i32, coverage));
                    }
                });
            }
        }

        &self.pixels
    }
}

/// Text is laid out from the left end of its baseline, so labels sit on top of `pos`
fn baseline_origin(pos: Vector2) -> Point<f32> {
    point(pos.x, pos.y)
}

/// Blends text over the background, the canvas has no alpha
pub fn blend(background: ColorRgb, color: ColorRgb, coverage: f32) -> ColorRgb {
    background.lerp(color, coverage)
}
