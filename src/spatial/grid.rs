//! Rasterized cell grid with pixel geometry and pointer hit-testing
//!
//! Row i, column j of the grid is present iff row i of the shape has a cell at
//! column j. Rows are left-aligned, so the open side of the C faces right.

use std::fmt;

use ndarray::Array2;

use crate::io::configuration::{BOX_GAP_PX, BOX_SIZE_PX};
use crate::layout::{CellId, Shape};

/// Display state of one grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// No cell at this position
    #[default]
    Absent,
    /// Cell present, not marked
    Unmarked,
    /// Cell present and marked
    Marked,
}

/// Pixel rectangle occupied by a rendered cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Edge length
    pub size: u32,
}

impl PixelRect {
    /// Check if a pixel lies inside the rectangle
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.size && y >= self.y && y < self.y + self.size
    }
}

/// Dense grid of cell states sized to the shape's bounding box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    states: Array2<CellState>,
}

impl CellGrid {
    /// Rasterize a shape with every cell unmarked
    pub fn from_shape(shape: &Shape) -> Self {
        let mut states = Array2::from_elem((shape.row_count(), shape.width()), CellState::Absent);
        for id in shape.cell_ids() {
            if let Some(state) = states.get_mut([id.row, id.col]) {
                *state = CellState::Unmarked;
            }
        }
        Self { states }
    }

    /// Rasterize a shape and mark the given cells
    pub fn with_marks(shape: &Shape, marked: impl IntoIterator<Item = CellId>) -> Self {
        let mut grid = Self::from_shape(shape);
        for id in marked {
            grid.set_marked(id, true);
        }
        grid
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.states.nrows()
    }

    /// Number of columns (length of the widest row)
    pub fn cols(&self) -> usize {
        self.states.ncols()
    }

    /// State at the given id; positions outside the grid are absent
    pub fn state(&self, id: CellId) -> CellState {
        self.states
            .get([id.row, id.col])
            .copied()
            .unwrap_or_default()
    }

    /// Set the marked flag of a present cell
    ///
    /// Returns false when no cell exists at `id`.
    pub fn set_marked(&mut self, id: CellId, marked: bool) -> bool {
        match self.states.get_mut([id.row, id.col]) {
            Some(state) if *state != CellState::Absent => {
                *state = if marked {
                    CellState::Marked
                } else {
                    CellState::Unmarked
                };
                true
            }
            _ => false,
        }
    }

    /// Count of cells currently marked
    pub fn marked_count(&self) -> usize {
        self.states
            .iter()
            .filter(|&&state| state == CellState::Marked)
            .count()
    }

    /// Count of present cells
    pub fn cell_count(&self) -> usize {
        self.states
            .iter()
            .filter(|&&state| state != CellState::Absent)
            .count()
    }

    /// Present cells with their states in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellId, CellState)> + '_ {
        self.states
            .indexed_iter()
            .filter(|(_, state)| **state != CellState::Absent)
            .map(|((row, col), state)| (CellId::new(row, col), *state))
    }

    /// Pixel rectangle of a present cell
    pub fn cell_rect(&self, id: CellId) -> Option<PixelRect> {
        (self.state(id) != CellState::Absent).then(|| PixelRect {
            x: id.col as u32 * (BOX_SIZE_PX + BOX_GAP_PX),
            y: id.row as u32 * (BOX_SIZE_PX + BOX_GAP_PX),
            size: BOX_SIZE_PX,
        })
    }

    /// Pixel dimensions (width, height) of the rendered grid
    pub fn pixel_size(&self) -> (u32, u32) {
        (span_px(self.cols()), span_px(self.rows()))
    }

    /// Map a pixel to the cell drawn there
    ///
    /// Gaps between boxes and positions with no cell return `None`.
    pub fn hit_test(&self, x: u32, y: u32) -> Option<CellId> {
        let pitch = BOX_SIZE_PX + BOX_GAP_PX;
        if x % pitch >= BOX_SIZE_PX || y % pitch >= BOX_SIZE_PX {
            return None;
        }
        let id = CellId::new((y / pitch) as usize, (x / pitch) as usize);
        (self.state(id) != CellState::Absent).then_some(id)
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.states.rows() {
            let mut line = String::new();
            for state in row {
                line.push_str(match state {
                    CellState::Absent => "   ",
                    CellState::Unmarked => "[ ]",
                    CellState::Marked => "[x]",
                });
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

// Boxes plus the gaps between them; zero for an empty axis
const fn span_px(boxes: usize) -> u32 {
    if boxes == 0 {
        0
    } else {
        boxes as u32 * BOX_SIZE_PX + (boxes as u32 - 1) * BOX_GAP_PX
    }
}
