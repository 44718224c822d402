//! Color conversion for the raster canvas.

use polytension_core::FillStyle;
use ratatui::style::Color;

/// RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }

    /// Source-over compositing of `src` at `alpha` onto `self`.
    pub fn blend(self, src: Rgb, alpha: f32) -> Rgb {
        let keep = 1.0 - alpha;
        Rgb {
            r: src.r * alpha + self.r * keep,
            g: src.g * alpha + self.g * keep,
            b: src.b * alpha + self.b * keep,
        }
    }

    pub fn to_u8(self) -> (u8, u8, u8) {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.to_u8();
        Color::Rgb(r, g, b)
    }
}

/// Resolve a fill style to a color and an alpha in `0.0..=1.0`.
pub fn resolve_fill(style: FillStyle) -> (Rgb, f32) {
    match style {
        FillStyle::Rgb(r, g, b) => (Rgb::from_u8(r, g, b), 1.0),
        FillStyle::Hsla(c) => (
            hsl_to_rgb(
                c.hue as f32,
                c.saturation as f32 / 100.0,
                c.lightness as f32 / 100.0,
            ),
            (c.alpha as f32).clamp(0.0, 1.0),
        ),
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in `0.0..=1.0`).
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        return Rgb { r: l, g: l, b: l };
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    Rgb {
        r: hue_to_rgb(p, q, h + 1.0 / 3.0),
        g: hue_to_rgb(p, q, h),
        b: hue_to_rgb(p, q, h - 1.0 / 3.0),
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
