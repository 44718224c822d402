//! Recursive triangle subdivision and per-frame morphing.
//!
//! Every random decision is drawn from one [`SeededRandom`] in a fixed order,
//! so the same seed always produces the same tree of shapes.

use crate::geometry::{PointArena, PointId, clamp01, rotate};
use crate::paint::{DrawingContext, FillStyle, Hsla};
use crate::rng::SeededRandom;

/// Center of rotation for the root anchors.
const CENTER: (f64, f64) = (0.5, 0.5);

/// Saturation and alpha shared by every shape fill.
const SHAPE_SATURATION: f64 = 100.0;
const SHAPE_ALPHA: f64 = 0.2;

/// Initial layout of root triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// One triangle pointing up before rotation.
    Single,
    /// Two triangles sharing a horizontal edge before rotation.
    Twin,
}

/// Global parameters drawn at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Deepest generation that still spawns children (4 or 5).
    pub generations: u32,
    /// Per-frame perturbation magnitude.
    pub jitter: f64,
    /// Rotation of the root anchors in degrees.
    pub angle: f64,
    pub topology: Topology,
}

impl Params {
    /// Draw parameters in their fixed order.
    fn draw(rng: &mut SeededRandom) -> Self {
        let generations = (rng.next_f64() * 2.0).floor() as u32 + 4;
        let jitter = rng.next_f64() * 0.02 + 0.001;
        let angle = rng.next_f64() * 360.0;
        let topology = if rng.next_f64() <= 0.5 {
            Topology::Single
        } else {
            Topology::Twin
        };
        Self {
            generations,
            jitter,
            angle,
            topology,
        }
    }
}

/// A colored triangle over three shared points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub a: PointId,
    pub b: PointId,
    pub c: PointId,
    /// Hue in degrees, `0..=360`.
    pub hue: u16,
    pub generation: u32,
}

/// How a shape picks the point its children meet at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitMode {
    /// Jittered centroid of all three vertices; three children.
    Center,
    /// Jittered midpoint of the first edge; two children.
    Bisect,
}

impl SplitMode {
    fn for_generation(generation: u32) -> Self {
        if generation % 2 == 0 {
            SplitMode::Center
        } else {
            SplitMode::Bisect
        }
    }

    fn branching(self) -> usize {
        match self {
            SplitMode::Center => 3,
            SplitMode::Bisect => 2,
        }
    }

    /// Half-width of the scale jitter applied to the split point.
    fn spread(self) -> f64 {
        match self {
            SplitMode::Center => 0.2,
            SplitMode::Bisect => 0.075,
        }
    }
}

/// Number of shapes one root triangle expands into.
pub fn shapes_per_root(generations: u32) -> usize {
    (0..generations)
        .rev()
        .fold(1, |below, g| 1 + SplitMode::for_generation(g).branching() * below)
}

/// State of one tessellation run.
#[derive(Debug, Clone)]
pub struct Tessellation {
    seed: String,
    params: Params,
    points: PointArena,
    shapes: Vec<Shape>,
    rng: SeededRandom,
}

impl Tessellation {
    /// Build the full shape tree for a seed.
    pub fn generate(seed: &str) -> Self {
        let mut rng = SeededRandom::new(seed);
        let params = Params::draw(&mut rng);
        let mut tessellation = Self::with_params(seed, params, rng);

        for [a, b, c] in tessellation.root_triangles() {
            tessellation.subdivide(a, b, c, 0);
        }

        tracing::debug!(
            seed,
            generations = params.generations,
            jitter = params.jitter,
            angle = params.angle,
            topology = ?params.topology,
            shapes = tessellation.shapes.len(),
            points = tessellation.points.len(),
            "generated tessellation"
        );
        tessellation
    }

    fn with_params(seed: &str, params: Params, rng: SeededRandom) -> Self {
        Self {
            seed: seed.to_string(),
            params,
            points: PointArena::new(),
            shapes: Vec::new(),
            rng,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn points(&self) -> &PointArena {
        &self.points
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn anchor(&mut self, x: f64, y: f64) -> PointId {
        let (x, y) = rotate(CENTER.0, CENTER.1, x, y, self.params.angle);
        self.points.create(x, y)
    }

    /// Create the rotated anchor points and return the root triangles.
    fn root_triangles(&mut self) -> Vec<[PointId; 3]> {
        match self.params.topology {
            Topology::Single => {
                let apex = self.anchor(0.5, 0.1);
                let right = self.anchor(0.9, 0.75);
                let left = self.anchor(0.1, 0.75);
                vec![[apex, right, left]]
            }
            Topology::Twin => {
                let right = self.anchor(0.9, 0.5);
                let left = self.anchor(0.1, 0.5);
                let top = self.anchor(0.5, 0.1);
                let bottom = self.anchor(0.5, 0.9);
                vec![[right, left, top], [right, left, bottom]]
            }
        }
    }

    /// Record a shape and recurse into its children.
    ///
    /// The split point is created even at the last generation. The order of
    /// draws and child calls fixes the seed to output mapping.
    fn subdivide(&mut self, a: PointId, b: PointId, c: PointId, generation: u32) {
        let hue = (self.rng.next_f64() * 360.0).round() as u16;
        self.shapes.push(Shape {
            a,
            b,
            c,
            hue,
            generation,
        });

        let mode = SplitMode::for_generation(generation);
        let spread = mode.spread();
        let rx = self.rng.next_f64() * (2.0 * spread) - spread + 1.0;
        let ry = self.rng.next_f64() * (2.0 * spread) - spread + 1.0;

        let (pa, pb, pc) = (self.points.point(a), self.points.point(b), self.points.point(c));
        let split = match mode {
            SplitMode::Center => self.points.create(
                (pa.x + pb.x + pc.x) / 3.0 * rx,
                (pa.y + pb.y + pc.y) / 3.0 * ry,
            ),
            SplitMode::Bisect => {
                self.points
                    .create((pa.x + pb.x) / 2.0 * rx, (pa.y + pb.y) / 2.0 * ry)
            }
        };

        if generation >= self.params.generations {
            return;
        }

        self.subdivide(a, c, split, generation + 1);
        self.subdivide(b, c, split, generation + 1);
        if mode == SplitMode::Center {
            self.subdivide(a, b, split, generation + 1);
        }
    }

    /// Nudge every point by a small random factor, keeping it on the canvas.
    pub fn morph(&mut self) {
        let jitter = self.params.jitter;
        let base = 1.0 - jitter * 0.5;
        for point in self.points.iter_mut() {
            point.x = clamp01(point.x * (self.rng.next_f64() * jitter + base));
            point.y = clamp01(point.y * (self.rng.next_f64() * jitter + base));
        }
    }

    /// Fill style for a shape, lighter for deeper generations.
    pub fn fill_style(&self, shape: &Shape) -> FillStyle {
        let depth = f64::from(shape.generation) / f64::from(self.params.generations);
        FillStyle::Hsla(Hsla {
            hue: f64::from(shape.hue),
            saturation: SHAPE_SATURATION,
            lightness: depth * 40.0 + 20.0,
            alpha: SHAPE_ALPHA,
        })
    }

    /// Clear the surface and draw every shape at its current position.
    pub fn paint<C: DrawingContext + ?Sized>(&self, ctx: &mut C) {
        let width = f64::from(ctx.width());
        let height = f64::from(ctx.height());

        ctx.set_fill_style(FillStyle::BLACK);
        ctx.fill_rect(0.0, 0.0, width, height);

        for shape in &self.shapes {
            let a = self.points.point(shape.a);
            let b = self.points.point(shape.b);
            let c = self.points.point(shape.c);

            ctx.set_fill_style(self.fill_style(shape));
            ctx.begin_path();
            ctx.move_to(a.x * width, a.y * height);
            ctx.line_to(b.x * width, b.y * height);
            ctx.line_to(c.x * width, c.y * height);
            ctx.close_path();
            ctx.fill();
        }
    }
}
