use serde::Deserialize;

/// Deserializes from a `(r, g, b)` tuple
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(from = "(u8, u8, u8)")]
pub struct ColorRgb {
    r: u8,
    g: u8,
    b: u8,
}

impl ColorRgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const GREY: Self = Self::new(128, 128, 128);
    pub const ORANGE: Self = Self::new(255, 165, 0);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 128, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`, `t` is clamped to 0..=1
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<ColorRgb> for (u8, u8, u8) {
    fn from(c: ColorRgb) -> Self {
        (c.r, c.g, c.b)
    }
}

impl From<(u8, u8, u8)> for ColorRgb {
    fn from(tup: (u8, u8, u8)) -> Self {
        let (r, g, b) = tup;
        Self { r, g, b }
    }
}
