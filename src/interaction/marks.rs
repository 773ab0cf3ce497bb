//! Marked-cell set and click-order log

use bitvec::prelude::*;
use std::fmt;

use crate::layout::{CellId, Shape};

/// Result of recording a mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// Cell was unmarked and is now marked
    Marked,
    /// Cell was already marked; nothing changed
    AlreadyMarked,
    /// Id does not name a cell of the shape
    Unknown,
}

/// Marked-cell set plus the order in which cells were marked
///
/// Membership is a bitset keyed by the cell's row-major ordinal. The order log is
/// append-only until [`MarkLedger::clear_order`].
#[derive(Clone, Debug)]
pub struct MarkLedger {
    bits: BitVec,
    /// (ordinal of first cell, cell count) per row
    rows: Vec<(usize, usize)>,
    order: Vec<CellId>,
}

impl MarkLedger {
    /// Create an empty ledger sized for `shape`
    pub fn for_shape(shape: &Shape) -> Self {
        let mut rows = Vec::with_capacity(shape.row_count());
        let mut offset = 0;
        for row in shape.rows() {
            rows.push((offset, row.len()));
            offset += row.len();
        }
        Self {
            bits: bitvec![0; offset],
            rows,
            order: Vec::with_capacity(offset),
        }
    }

    fn ordinal(&self, id: CellId) -> Option<usize> {
        let &(offset, len) = self.rows.get(id.row)?;
        (id.col < len).then_some(offset + id.col)
    }

    /// Mark a cell and append it to the order log
    pub fn mark(&mut self, id: CellId) -> MarkOutcome {
        let Some(index) = self.ordinal(id) else {
            return MarkOutcome::Unknown;
        };
        if self.bits.get(index).as_deref() == Some(&true) {
            return MarkOutcome::AlreadyMarked;
        }
        self.bits.set(index, true);
        self.order.push(id);
        MarkOutcome::Marked
    }

    /// Clear a cell's mark, leaving the order log untouched
    ///
    /// Returns false when the cell was not marked.
    pub fn unmark(&mut self, id: CellId) -> bool {
        match self.ordinal(id) {
            Some(index) if self.bits.get(index).as_deref() == Some(&true) => {
                self.bits.set(index, false);
                true
            }
            _ => false,
        }
    }

    /// Test cell membership
    pub fn is_marked(&self, id: CellId) -> bool {
        self.ordinal(id)
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Number of marked cells
    pub fn marked_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of cells the ledger tracks
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// True when every cell is marked
    pub fn is_complete(&self) -> bool {
        !self.bits.is_empty() && self.bits.all()
    }

    /// True when no cell is marked
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Marked cells in row-major order
    pub fn marked(&self) -> Vec<CellId> {
        let mut ids = Vec::with_capacity(self.marked_count());
        for (row, &(offset, len)) in self.rows.iter().enumerate() {
            for col in 0..len {
                if self.bits.get(offset + col).as_deref() == Some(&true) {
                    ids.push(CellId::new(row, col));
                }
            }
        }
        ids
    }

    /// Cells in the order they were marked
    pub fn order(&self) -> &[CellId] {
        &self.order
    }

    /// Forget the order log, keeping marks
    pub fn clear_order(&mut self) {
        self.order.clear();
    }
}

impl fmt::Display for MarkLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MarkLedger({}/{} marked, order: [",
            self.marked_count(),
            self.capacity()
        )?;
        for (i, id) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "])")
    }
}
