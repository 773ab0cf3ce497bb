//! Tests for cell grid rasterization, pixel geometry and hit-testing

#[cfg(test)]
mod tests {
    use cshape::io::configuration::{BOX_GAP_PX, BOX_SIZE_PX};
    use cshape::layout::{CellId, Shape, generate_shape};
    use cshape::spatial::{CellGrid, CellState, PixelRect};

    fn shape(count: usize) -> Shape {
        generate_shape(count).unwrap_or_else(|e| panic!("count {count} rejected: {e}"))
    }

    // Tests grid dimensions follow row count and widest row
    #[test]
    fn test_dimensions() {
        let grid = CellGrid::from_shape(&shape(5));
        assert_eq!((grid.rows(), grid.cols()), (3, 2));
        assert_eq!(grid.cell_count(), 5);
        assert_eq!(grid.marked_count(), 0);
    }

    // Tests positions past a short row are absent
    // Verified by filling every grid position
    #[test]
    fn test_presence_matches_shape() {
        let grid = CellGrid::from_shape(&shape(5));
        assert_eq!(grid.state(CellId::new(0, 1)), CellState::Unmarked);
        assert_eq!(grid.state(CellId::new(1, 0)), CellState::Unmarked);
        assert_eq!(grid.state(CellId::new(1, 1)), CellState::Absent);
        assert_eq!(grid.state(CellId::new(7, 7)), CellState::Absent);
    }

    // Tests marking only applies to present cells
    #[test]
    fn test_set_marked() {
        let mut grid = CellGrid::from_shape(&shape(5));
        assert!(grid.set_marked(CellId::new(0, 1), true));
        assert_eq!(grid.state(CellId::new(0, 1)), CellState::Marked);
        assert!(!grid.set_marked(CellId::new(1, 1), true));
        assert_eq!(grid.marked_count(), 1);

        assert!(grid.set_marked(CellId::new(0, 1), false));
        assert_eq!(grid.marked_count(), 0);
    }

    // Tests construction with an initial marked set
    #[test]
    fn test_with_marks() {
        let grid = CellGrid::with_marks(&shape(7), [CellId::new(0, 0), CellId::new(2, 2)]);
        assert_eq!(grid.marked_count(), 2);
        let marked: Vec<CellId> = grid
            .cells()
            .filter(|(_, state)| *state == CellState::Marked)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(marked, vec![CellId::new(0, 0), CellId::new(2, 2)]);
    }

    // Tests pixel size includes gaps only between boxes
    #[test]
    fn test_pixel_size() {
        let grid = CellGrid::from_shape(&shape(5));
        assert_eq!(
            grid.pixel_size(),
            (2 * BOX_SIZE_PX + BOX_GAP_PX, 3 * BOX_SIZE_PX + 2 * BOX_GAP_PX)
        );
    }

    // Tests cell rectangles are laid out on the box pitch
    #[test]
    fn test_cell_rect() {
        let grid = CellGrid::from_shape(&shape(5));
        assert_eq!(
            grid.cell_rect(CellId::new(2, 1)),
            Some(PixelRect {
                x: 55,
                y: 110,
                size: 50,
            })
        );
        assert_eq!(grid.cell_rect(CellId::new(1, 1)), None);
    }

    // Tests pointer mapping back to cell ids
    // Verified by ignoring the gap check
    #[test]
    fn test_hit_test() {
        let grid = CellGrid::from_shape(&shape(5));
        assert_eq!(grid.hit_test(0, 0), Some(CellId::new(0, 0)));
        assert_eq!(grid.hit_test(60, 115), Some(CellId::new(2, 1)));
        assert_eq!(grid.hit_test(52, 10), None, "gap between boxes");
        assert_eq!(grid.hit_test(60, 60), None, "no cell right of the spine");
        assert_eq!(grid.hit_test(500, 500), None);

        for (id, _) in grid.cells() {
            let rect = grid.cell_rect(id);
            let hit = rect.and_then(|r| grid.hit_test(r.x + r.size / 2, r.y + r.size / 2));
            assert_eq!(hit, Some(id));
        }
    }

    // Tests rectangle containment edges
    #[test]
    fn test_pixel_rect_contains() {
        let rect = PixelRect {
            x: 10,
            y: 10,
            size: 5,
        };
        assert!(rect.contains(10, 10));
        assert!(rect.contains(14, 14));
        assert!(!rect.contains(15, 10));
        assert!(!rect.contains(9, 12));
    }

    // Tests text rendering of marked and unmarked cells
    #[test]
    fn test_display() {
        let mut grid = CellGrid::from_shape(&shape(5));
        assert_eq!(grid.to_string(), "[ ][ ]\n[ ]\n[ ][ ]\n");

        grid.set_marked(CellId::new(1, 0), true);
        assert_eq!(grid.to_string(), "[ ][ ]\n[x]\n[ ][ ]\n");
    }
}
