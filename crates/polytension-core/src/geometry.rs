//! Normalized points and the helpers that move them.

/// Identifier of a point within one run, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u32);

/// A vertex in normalized `[0, 1]` canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
}

/// Arena of points in creation order.
///
/// Shapes refer to points by id, so one point can be a vertex of several
/// triangles and every one of them follows it when it moves.
#[derive(Debug, Clone, Default)]
pub struct PointArena {
    points: Vec<Point>,
}

impl PointArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a point with the next id.
    pub fn create(&mut self, x: f64, y: f64) -> PointId {
        let id = PointId(self.points.len() as u32 + 1);
        self.points.push(Point { id, x, y });
        id
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.points.get(index)
    }

    /// Look up a point the caller knows to exist.
    ///
    /// Ids are only handed out by [`PointArena::create`], so a miss means the
    /// id came from another arena.
    pub fn point(&self, id: PointId) -> Point {
        self.points[id.0 as usize - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Point> {
        self.points.iter_mut()
    }
}

/// Clamp a coordinate to the unit interval.
pub fn clamp01(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// Rotate `(x, y)` about `(cx, cy)` by `angle` degrees.
///
/// Positive angles turn clockwise on a y-down canvas.
pub fn rotate(cx: f64, cy: f64, x: f64, y: f64, angle: f64) -> (f64, f64) {
    let radians = angle.to_radians();
    let (sin, cos) = radians.sin_cos();
    let nx = cos * (x - cx) + sin * (y - cy) + cx;
    let ny = cos * (y - cy) - sin * (x - cx) + cy;
    (nx, ny)
}
