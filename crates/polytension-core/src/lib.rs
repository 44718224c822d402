//! Core of the polytension generator.
//!
//! A string seed drives a deterministic random stream, which in turn picks
//! the starting geometry, subdivides it into a tree of colored triangles and
//! jitters the shared vertices on every frame. Drawing and frame scheduling
//! are left to the host through the [`DrawingContext`] and [`FrameScheduler`]
//! traits.

mod engine;
mod geometry;
mod paint;
mod rng;
mod seed;
mod session;

pub use engine::{Params, Shape, Tessellation, Topology, shapes_per_root};
pub use geometry::{Point, PointArena, PointId, clamp01, rotate};
pub use paint::{DrawingContext, FillStyle, Hsla};
pub use rng::SeededRandom;
pub use seed::{SEED_PARAM, SeedError, SeedLocation, get_and_save_seed, timestamp_seed};
pub use session::{FrameHandle, FrameScheduler, Session};
