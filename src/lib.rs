//! Symmetrical C-shape box layout with click marking and timed reverse unmarking
//!
//! A validated count of boxes is laid out as a "C": a top arm, a spine of
//! single-cell rows and a bottom arm of equal length. Clicking marks boxes; once
//! every box is marked, the marks are undone in reverse click order on a timer.

#![forbid(unsafe_code)]

/// Click/revert state machine, marked set and task scheduler
pub mod interaction;
/// Input validation, errors, configuration and export
pub mod io;
/// C-shape layout engine
pub mod layout;
/// Cell grid rasterization and pixel geometry
pub mod spatial;

pub use io::error::{Result, ShapeError};
pub use layout::{CellId, Shape, generate_shape};
