//! Row-count search for the most square-looking C shape
//!
//! Every candidate row count from [`MIN_ROWS`] up to the cell count is scored by
//! how far the longer arm is from the total row count. The scan is a plain bounded
//! loop; the input domain is tiny.

use crate::io::configuration::{MIN_COUNT, MIN_ROWS};
use crate::io::error::{Result, ShapeError};

/// Split of a cell count into arms and spine for one candidate row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPlan {
    /// Total rows including both arms
    pub rows: usize,
    /// Number of single-cell spine rows (`rows - 2`)
    pub spine_rows: usize,
    /// Cells in the top arm, `ceil(remaining / 2)`
    pub top: usize,
    /// Cells in the bottom arm, `floor(remaining / 2)`
    pub bottom: usize,
}

impl RowPlan {
    /// Plan `count` cells over `rows` rows
    ///
    /// Returns `None` when `rows` is below [`MIN_ROWS`] or when the spine leaves
    /// fewer than two cells for the arms.
    pub const fn for_rows(count: usize, rows: usize) -> Option<Self> {
        if rows < MIN_ROWS {
            return None;
        }
        let spine_rows = rows - 2;
        if count < spine_rows + 2 {
            return None;
        }
        let remaining = count - spine_rows;
        Some(Self {
            rows,
            spine_rows,
            top: remaining.div_ceil(2),
            bottom: remaining / 2,
        })
    }

    /// Length of the longer arm, never less than one
    pub const fn max_arm_len(&self) -> usize {
        let longer = if self.top > self.bottom {
            self.top
        } else {
            self.bottom
        };
        if longer > 1 { longer } else { 1 }
    }

    /// Distance from a square bounding box; lower is better
    pub const fn score(&self) -> usize {
        self.max_arm_len().abs_diff(self.rows)
    }

    /// Cells covered by this plan before symmetry repair
    pub const fn cell_count(&self) -> usize {
        self.top + self.spine_rows + self.bottom
    }

    /// True when the arms differ and the repair step will run
    pub const fn needs_repair(&self) -> bool {
        self.top != self.bottom
    }
}

/// Pick the row plan with the lowest score for `count` cells
///
/// Ties keep the candidate found first, so the smallest row count wins and the
/// shape favours fewer, longer rows.
///
/// # Errors
///
/// Returns [`ShapeError::Domain`] when `count` is below [`MIN_COUNT`].
pub fn select_row_plan(count: usize) -> Result<RowPlan> {
    if count < MIN_COUNT {
        return Err(ShapeError::Domain {
            count,
            minimum: MIN_COUNT,
        });
    }

    let mut best: Option<RowPlan> = None;
    for rows in MIN_ROWS..=count {
        let Some(candidate) = RowPlan::for_rows(count, rows) else {
            continue;
        };
        // Strict improvement only; equal scores keep the earlier candidate
        if best.is_none_or(|current| candidate.score() < current.score()) {
            best = Some(candidate);
        }
    }

    best.ok_or(ShapeError::Domain {
        count,
        minimum: MIN_COUNT,
    })
}
