//! C-shape layout engine
//!
//! Turns a cell count into an ordered sequence of rows that reads as a "C":
//! - Row-count search scoring candidates by squareness
//! - Shape construction and symmetry repair
//! - Stable per-cell identifiers assigned at generation time

/// Row-count search and arm/spine split
pub mod search;
/// Shape types and generation
pub mod shape;

pub use search::{RowPlan, select_row_plan};
pub use shape::{CellId, Row, RowRole, Shape, generate_shape};
