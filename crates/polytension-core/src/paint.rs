//! Drawing surface abstraction and fill styles.

use std::fmt;

/// Color with hue in degrees and saturation/lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

/// Fill style accepted by a [`DrawingContext`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStyle {
    Rgb(u8, u8, u8),
    Hsla(Hsla),
}

impl FillStyle {
    pub const BLACK: FillStyle = FillStyle::Rgb(0, 0, 0);
}

/// Formats as a CSS color string, e.g. `hsla(120, 100%, 36%, 0.2)`.
impl fmt::Display for FillStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStyle::Rgb(r, g, b) => write!(f, "rgb({r}, {g}, {b})"),
            FillStyle::Hsla(c) => write!(
                f,
                "hsla({}, {}%, {}%, {})",
                c.hue, c.saturation, c.lightness, c.alpha
            ),
        }
    }
}

/// A 2D drawing surface with canvas-style path primitives.
///
/// Coordinates are in pixels with the origin at the top left.
pub trait DrawingContext {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_style(&mut self, style: FillStyle);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
}
