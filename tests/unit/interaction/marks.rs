//! Tests for the marked-cell bitset and click-order log

#[cfg(test)]
mod tests {
    use cshape::interaction::marks::{MarkLedger, MarkOutcome};
    use cshape::layout::{CellId, generate_shape};

    fn ledger(count: usize) -> MarkLedger {
        let shape = generate_shape(count).unwrap_or_else(|e| panic!("{e}"));
        MarkLedger::for_shape(&shape)
    }

    // Tests a new ledger is empty and sized to the shape
    #[test]
    fn test_new_ledger() {
        let marks = ledger(5);
        assert_eq!(marks.capacity(), 5);
        assert_eq!(marks.marked_count(), 0);
        assert!(marks.is_empty());
        assert!(!marks.is_complete());
        assert!(marks.order().is_empty());
    }

    // Tests marking twice records the cell once
    // Verified by appending to the order log on repeat marks
    #[test]
    fn test_mark_is_idempotent() {
        let mut marks = ledger(5);
        let id = CellId::new(2, 1);
        assert_eq!(marks.mark(id), MarkOutcome::Marked);
        assert_eq!(marks.mark(id), MarkOutcome::AlreadyMarked);
        assert_eq!(marks.marked_count(), 1);
        assert_eq!(marks.order(), &[id]);
    }

    // Tests ids outside the shape are rejected
    #[test]
    fn test_unknown_cell() {
        let mut marks = ledger(5);
        assert_eq!(marks.mark(CellId::new(1, 1)), MarkOutcome::Unknown);
        assert_eq!(marks.mark(CellId::new(3, 0)), MarkOutcome::Unknown);
        assert!(marks.is_empty());
        assert!(!marks.unmark(CellId::new(1, 1)));
    }

    // Tests order log keeps click order while the marked list is row-major
    #[test]
    fn test_order_and_marked() {
        let mut marks = ledger(5);
        let clicks = [CellId::new(2, 0), CellId::new(0, 1), CellId::new(1, 0)];
        for id in clicks {
            marks.mark(id);
        }
        assert_eq!(marks.order(), &clicks);
        assert_eq!(
            marks.marked(),
            vec![CellId::new(0, 1), CellId::new(1, 0), CellId::new(2, 0)]
        );
    }

    // Tests unmarking clears membership but not the order log
    #[test]
    fn test_unmark_keeps_order() {
        let mut marks = ledger(5);
        let id = CellId::new(0, 0);
        marks.mark(id);
        assert!(marks.unmark(id));
        assert!(!marks.unmark(id));
        assert!(!marks.is_marked(id));
        assert_eq!(marks.order(), &[id]);
    }

    // Tests completion once every cell is marked
    #[test]
    fn test_complete() {
        let shape = generate_shape(6).unwrap_or_else(|e| panic!("{e}"));
        let mut marks = MarkLedger::for_shape(&shape);
        for id in shape.cell_ids() {
            assert!(!marks.is_complete());
            marks.mark(id);
        }
        assert!(marks.is_complete());
        assert_eq!(marks.marked_count(), 6);
    }

    // Tests clearing the log keeps the marks
    #[test]
    fn test_clear_order() {
        let mut marks = ledger(5);
        marks.mark(CellId::new(0, 0));
        marks.mark(CellId::new(0, 1));

        marks.clear_order();
        assert!(marks.order().is_empty());
        assert_eq!(marks.marked_count(), 2);
        assert!(marks.is_marked(CellId::new(0, 1)));
    }

    // Tests display summary
    #[test]
    fn test_display() {
        let mut marks = ledger(5);
        marks.mark(CellId::new(1, 0));
        marks.mark(CellId::new(0, 0));
        assert_eq!(marks.to_string(), "MarkLedger(2/5 marked, order: [1-0, 0-0])");
    }
}
