//! Shape construction and symmetry repair
//!
//! A shape is built from the chosen [`RowPlan`]: one top arm row, single-cell spine
//! rows, one bottom arm row. Unequal arms are evened out by moving the surplus cell
//! into an extra spine row at the middle of the row sequence.

use std::fmt;
use std::str::FromStr;

use crate::io::error::{Result, ShapeError, invalid_parameter};
use crate::layout::search::{RowPlan, select_row_plan};

/// Stable cell identifier derived from the cell's final position
///
/// Displayed and parsed as `"row-col"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId {
    /// Row index, top to bottom
    pub row: usize,
    /// Column index, left to right
    pub col: usize,
}

impl CellId {
    /// Create an identifier for the given position
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for CellId {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let (row, col) = text
            .split_once('-')
            .ok_or_else(|| invalid_parameter("cell", &text, &"expected 'row-col'"))?;
        let row = row
            .parse()
            .map_err(|e| invalid_parameter("cell", &text, &format!("bad row: {e}")))?;
        let col = col
            .parse()
            .map_err(|e| invalid_parameter("cell", &text, &format!("bad column: {e}")))?;
        Ok(Self { row, col })
    }
}

/// Structural role of a row, derived from its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    /// First row
    TopArm,
    /// Any row strictly between the arms
    Spine,
    /// Last row
    BottomArm,
}

/// One row of cells, left-aligned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<CellId>,
}

impl Row {
    /// Cells of this row in column order
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Number of cells in this row
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row holds no cells
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered rows forming a C; total cells always equal the requested count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Row>,
    count: usize,
    plan: RowPlan,
}

impl Shape {
    /// Rows from top to bottom
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.count
    }

    /// Row plan selected by the search, before repair
    pub const fn plan(&self) -> RowPlan {
        self.plan
    }

    /// Cell count of every row, top to bottom
    pub fn row_lengths(&self) -> Vec<usize> {
        self.rows.iter().map(Row::len).collect()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// Role of the row at `index`, or `None` past the last row
    pub const fn row_role(&self, index: usize) -> Option<RowRole> {
        if index >= self.rows.len() {
            None
        } else if index == 0 {
            Some(RowRole::TopArm)
        } else if index + 1 == self.rows.len() {
            Some(RowRole::BottomArm)
        } else {
            Some(RowRole::Spine)
        }
    }

    /// True when `id` names a cell of this shape
    pub fn contains(&self, id: CellId) -> bool {
        self.rows.get(id.row).is_some_and(|row| id.col < row.len())
    }

    /// Dense row-major index of `id`, or `None` for ids outside the shape
    pub fn ordinal(&self, id: CellId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        let preceding: usize = self.rows.iter().take(id.row).map(Row::len).sum();
        Some(preceding + id.col)
    }

    /// All cell ids in row-major order
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.rows.iter().flat_map(|row| row.cells.iter().copied())
    }
}

/// Lay out `count` cells as a symmetrical C shape
///
/// Pure and deterministic: the same count always yields the same shape.
///
/// # Errors
///
/// Returns [`ShapeError::Domain`] when `count` is too small to form a C.
pub fn generate_shape(count: usize) -> Result<Shape> {
    let plan = select_row_plan(count)?;
    let lengths = repair_symmetry(build_row_lengths(&plan));

    let rows = lengths
        .iter()
        .enumerate()
        .map(|(row, &len)| Row {
            cells: (0..len).map(|col| CellId::new(row, col)).collect(),
        })
        .collect();

    let shape = Shape { rows, count, plan };
    tracing::debug!(
        count,
        rows = shape.row_count(),
        repaired = plan.needs_repair(),
        "generated shape"
    );
    Ok(shape)
}

/// Top arm, single-cell spine rows, bottom arm
fn build_row_lengths(plan: &RowPlan) -> Vec<usize> {
    let mut lengths = Vec::with_capacity(plan.rows + 1);
    lengths.push(plan.top);
    lengths.extend(std::iter::repeat_n(1, plan.spine_rows));
    lengths.push(plan.bottom);
    lengths
}

/// Move the one-cell surplus of the longer arm into a new middle spine row
///
/// Arms come from the ceil/floor split of the same remainder, so they differ by at
/// most one. Cells carry no data, so shortening an arm from either end is the same
/// operation on its length.
fn repair_symmetry(mut lengths: Vec<usize>) -> Vec<usize> {
    let top = lengths.first().copied().unwrap_or(0);
    let bottom = lengths.last().copied().unwrap_or(0);
    if top == bottom {
        return lengths;
    }

    let longer = if top > bottom {
        lengths.first_mut()
    } else {
        lengths.last_mut()
    };
    if let Some(len) = longer {
        *len -= 1;
    }

    let insert_at = lengths.len() / 2;
    lengths.insert(insert_at, 1);
    lengths
}
