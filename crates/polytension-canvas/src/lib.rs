//! Terminal drawing surface for polytension.
//!
//! [`RasterCanvas`] implements the core [`polytension_core::DrawingContext`]
//! over an RGB framebuffer, and renders into a ratatui buffer with half-block
//! characters so each terminal cell shows two pixels.

mod color;
mod raster;
mod widget;

pub use color::{Rgb, hsl_to_rgb, resolve_fill};
pub use raster::RasterCanvas;
pub use widget::raster_size;
