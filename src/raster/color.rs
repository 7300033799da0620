//! RGB colors with float channels, palettes and HSV conversion

use serde::{Deserialize, Serialize};

/// Color with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
    pub const YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.0);
    pub const MAGENTA: Rgb = Rgb::new(1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Per-channel comparison within `eps`
    pub fn approx_eq(&self, other: Rgb, eps: f32) -> bool {
        (self.r - other.r).abs() <= eps
            && (self.g - other.g).abs() <= eps
            && (self.b - other.b).abs() <= eps
    }

    /// Quantize to 8-bit channels
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn with_alpha(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }

    /// Source-over blend of `self` onto `dst`
    pub fn blend_over(self, dst: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        Rgb::new(
            self.r * a + dst.r * (1.0 - a),
            self.g * a + dst.g * (1.0 - a),
            self.b * a + dst.b * (1.0 - a),
        )
    }
}

impl From<[f32; 4]> for Rgb {
    fn from(c: [f32; 4]) -> Self {
        Rgb::new(c[0], c[1], c[2])
    }
}

/// Seven-band rainbow used by the concentric circle lab
pub const RAINBOW: [Rgb; 7] = [
    Rgb::new(1.0, 0.0, 0.0),
    Rgb::new(1.0, 0.5, 0.0),
    Rgb::new(1.0, 1.0, 0.0),
    Rgb::new(0.0, 1.0, 0.0),
    Rgb::new(0.0, 0.0, 1.0),
    Rgb::new(0.29, 0.0, 0.51),
    Rgb::new(0.93, 0.51, 0.93),
];

/// Muted palette cycled by the falling circle demos
pub const PASTEL_31: [Rgb; 31] = [
    Rgb::new(0.9, 0.2, 0.3),
    Rgb::new(0.2, 0.9, 0.4),
    Rgb::new(0.3, 0.4, 0.95),
    Rgb::new(0.95, 0.85, 0.3),
    Rgb::new(0.7, 0.4, 0.5),
    Rgb::new(0.4, 0.8, 0.7),
    Rgb::new(0.5, 0.3, 0.7),
    Rgb::new(0.6, 0.7, 0.2),
    Rgb::new(0.3, 0.6, 0.9),
    Rgb::new(0.85, 0.5, 0.2),
    Rgb::new(0.7, 0.9, 0.3),
    Rgb::new(0.2, 0.5, 0.4),
    Rgb::new(0.6, 0.2, 0.3),
    Rgb::new(0.5, 0.5, 0.5),
    Rgb::new(0.3, 0.3, 0.6),
    Rgb::new(0.9, 0.7, 0.4),
    Rgb::new(0.7, 0.2, 0.5),
    Rgb::new(0.4, 0.6, 0.8),
    Rgb::new(0.6, 0.3, 0.3),
    Rgb::new(0.2, 0.7, 0.6),
    Rgb::new(0.5, 0.4, 0.2),
    Rgb::new(0.8, 0.4, 0.4),
    Rgb::new(0.6, 0.8, 0.5),
    Rgb::new(0.4, 0.3, 0.5),
    Rgb::new(0.3, 0.7, 0.3),
    Rgb::new(0.7, 0.3, 0.6),
    Rgb::new(0.8, 0.6, 0.7),
    Rgb::new(0.6, 0.5, 0.9),
    Rgb::new(0.9, 0.6, 0.3),
    Rgb::new(0.4, 0.5, 0.3),
    Rgb::new(0.5, 0.8, 0.6),
];

/// Convert hue (degrees), saturation and value to RGB
///
/// Zero saturation yields the grey level `v`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    if s <= 0.0 {
        return Rgb::grey(v);
    }
    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as i32 % 6 {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}
