//! Grid geometry dividing a canvas into square tile cells
//!
//! Cells are enumerated in row-major order: rows outer, columns inner. A cell's
//! index in that enumeration is the position of its tile in the assignment.

use crate::io::error::{MosaicError, Result};

/// Pixel rectangle covered by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBox {
    /// Grid column of the cell
    pub col: usize,
    /// Grid row of the cell
    pub row: usize,
    /// Left edge in pixels
    pub x: usize,
    /// Top edge in pixels
    pub y: usize,
    /// Edge length in pixels
    pub size: usize,
}

/// Immutable canvas dimensions with an exact tile subdivision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    width: usize,
    height: usize,
    tile_size: usize,
}

impl GridGeometry {
    /// Validate dimensions and create the geometry
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if the tile size is zero or either dimension is
    /// not an exact multiple of it
    pub const fn new(width: usize, height: usize, tile_size: usize) -> Result<Self> {
        if tile_size == 0 || width % tile_size != 0 || height % tile_size != 0 {
            return Err(MosaicError::InvalidGeometry {
                width,
                height,
                tile_size,
            });
        }
        Ok(Self {
            width,
            height,
            tile_size,
        })
    }

    /// Canvas width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of cell columns
    pub const fn cols(&self) -> usize {
        self.width / self.tile_size
    }

    /// Number of cell rows
    pub const fn rows(&self) -> usize {
        self.height / self.tile_size
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.cols() * self.rows()
    }

    /// Pixel box of the cell at the given row-major index
    pub const fn cell(&self, index: usize) -> Option<CellBox> {
        if index >= self.cell_count() {
            return None;
        }
        let col = index % self.cols();
        let row = index / self.cols();
        Some(CellBox {
            col,
            row,
            x: col * self.tile_size,
            y: row * self.tile_size,
            size: self.tile_size,
        })
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellBox> + '_ {
        (0..self.cell_count()).filter_map(|index| self.cell(index))
    }

    /// Row-major index of the cell at `(col, row)`
    pub const fn index_of(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.cols() || row >= self.rows() {
            return None;
        }
        Some(row * self.cols() + col)
    }
}
