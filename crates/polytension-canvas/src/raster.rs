//! Software raster implementing [`DrawingContext`].

use polytension_core::{DrawingContext, FillStyle};

use crate::color::{Rgb, resolve_fill};

/// RGB pixel surface with canvas-style path filling.
///
/// Pixels are sampled at their centers and paths are filled with the even-odd
/// rule, blending the current fill style over what is already there.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    fill: (Rgb, f32),
    subpaths: Vec<Vec<(f64, f64)>>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
            fill: (Rgb::BLACK, 1.0),
            subpaths: Vec::new(),
        }
    }

    /// Resize the surface, clearing it to black if the size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgb::BLACK; width as usize * height as usize];
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Pixel indices whose centers fall in `[from, to)`, clipped to `limit`.
    fn covered(from: f64, to: f64, limit: u32) -> std::ops::Range<u32> {
        let start = (from - 0.5).ceil().clamp(0.0, f64::from(limit)) as u32;
        let end = (to - 0.5).ceil().clamp(0.0, f64::from(limit)) as u32;
        start..end.max(start)
    }

    fn blend_span(&mut self, y: u32, xs: std::ops::Range<u32>) {
        let (color, alpha) = self.fill;
        let row = y as usize * self.width as usize;
        for x in xs {
            let pixel = &mut self.pixels[row + x as usize];
            *pixel = pixel.blend(color, alpha);
        }
    }

    /// X positions where the path's edges cross the horizontal line `y`.
    fn crossings(&self, y: f64) -> Vec<f64> {
        let mut xs = Vec::new();
        for subpath in &self.subpaths {
            if subpath.len() < 3 {
                continue;
            }
            let closing = (subpath[subpath.len() - 1], subpath[0]);
            let edges = subpath.windows(2).map(|w| (w[0], w[1])).chain([closing]);
            for ((x0, y0), (x1, y1)) in edges {
                if (y0 <= y && y < y1) || (y1 <= y && y < y0) {
                    xs.push(x0 + (y - y0) / (y1 - y0) * (x1 - x0));
                }
            }
        }
        xs.sort_by(f64::total_cmp);
        xs
    }
}

impl DrawingContext for RasterCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let xs = Self::covered(x, x + width, self.width);
        for row in Self::covered(y, y + height, self.height) {
            self.blend_span(row, xs.clone());
        }
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.fill = resolve_fill(style);
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push((x, y)),
            None => self.subpaths.push(vec![(x, y)]),
        }
    }

    fn close_path(&mut self) {
        // Fills close every subpath implicitly; a closed subpath only has to
        // start the next one at its first point.
        if let Some(&start) = self.subpaths.last().and_then(|s| s.first()) {
            self.subpaths.push(vec![start]);
        }
    }

    fn fill(&mut self) {
        for row in 0..self.height {
            let xs = self.crossings(f64::from(row) + 0.5);
            for pair in xs.chunks_exact(2) {
                let span = Self::covered(pair[0], pair[1], self.width);
                self.blend_span(row, span);
            }
        }
    }
}
