//! Tests for grid geometry validation and row-major cell enumeration

#[cfg(test)]
mod tests {
    use mosaictile::MosaicError;
    use mosaictile::spatial::{CellBox, GridGeometry};

    // Tests derived column, row and cell counts
    // Verified by swapping width and height in the derivation
    #[test]
    fn test_geometry_counts() {
        let geometry = GridGeometry::new(20, 30, 10).expect("exact multiples");

        assert_eq!(geometry.cols(), 2);
        assert_eq!(geometry.rows(), 3);
        assert_eq!(geometry.cell_count(), 6);
        assert_eq!(geometry.tile_size(), 10);
    }

    // Tests dimensions that are not tile multiples are rejected
    // Verified by checking only the width
    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            GridGeometry::new(25, 20, 10),
            Err(MosaicError::InvalidGeometry {
                width: 25,
                height: 20,
                tile_size: 10
            })
        ));
        assert!(matches!(
            GridGeometry::new(20, 25, 10),
            Err(MosaicError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            GridGeometry::new(20, 20, 0),
            Err(MosaicError::InvalidGeometry { .. })
        ));
    }

    // Tests cells are enumerated rows outer, columns inner
    // Verified by iterating columns in the outer loop
    #[test]
    fn test_cells_row_major() {
        let geometry = GridGeometry::new(30, 20, 10).expect("exact multiples");
        let order: Vec<(usize, usize)> = geometry.cells().map(|c| (c.col, c.row)).collect();

        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    // Tests pixel boxes of individual cells
    // Verified by using the row for the x offset
    #[test]
    fn test_cell_boxes() {
        let geometry = GridGeometry::new(30, 20, 10).expect("exact multiples");

        assert_eq!(
            geometry.cell(4),
            Some(CellBox {
                col: 1,
                row: 1,
                x: 10,
                y: 10,
                size: 10
            })
        );
        assert_eq!(geometry.cell(6), None);
    }

    // Tests index lookup inverts cell enumeration
    // Verified by multiplying the row by the row count
    #[test]
    fn test_index_of() {
        let geometry = GridGeometry::new(30, 20, 10).expect("exact multiples");

        for (index, cell) in geometry.cells().enumerate() {
            assert_eq!(geometry.index_of(cell.col, cell.row), Some(index));
        }
        assert_eq!(geometry.index_of(3, 0), None);
        assert_eq!(geometry.index_of(0, 2), None);
    }

    // Tests cell boxes tile the canvas without gaps or overlaps
    // Verified by shrinking the cell size by one
    #[test]
    fn test_cells_cover_canvas_once() {
        let geometry = GridGeometry::new(40, 30, 10).expect("exact multiples");
        let mut hits = vec![0u8; 40 * 30];

        for cell in geometry.cells() {
            for y in cell.y..cell.y + cell.size {
                for x in cell.x..cell.x + cell.size {
                    hits[y * 40 + x] += 1;
                }
            }
        }

        assert!(hits.iter().all(|&h| h == 1));
    }
}
