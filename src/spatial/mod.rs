//! Spatial view of a shape
//!
//! Rasterizes a shape into a dense cell grid and maps cells to pixels.

/// Cell grid, pixel geometry and hit-testing
pub mod grid;

pub use grid::{CellGrid, CellState, PixelRect};
