//! Mosaic composition: grid traversal, recoloring and canvas writes
//!
//! Cells never depend on each other. The canvas is split into bands of whole
//! grid rows, each band is a contiguous block of canvas storage, and rayon
//! workers fill the bands independently. The assignment is fully built before
//! any worker starts and the tile set is only read.

use crate::algorithm::assignment::{Assignment, assign};
use crate::color::transfer::{TransferMode, transfer};
use crate::io::error::{ErrorContext, MosaicError, Result, WithContext};
use crate::spatial::buffer::paste_rows;
use crate::spatial::{CellBox, GridGeometry, PixelBuffer};
use log::{debug, info};
use ndarray::Axis;
use ndarray::parallel::prelude::*;

/// Receives a notification each time a cell has been written
///
/// Notifications may arrive from several worker threads and in any order.
pub trait CellObserver: Sync {
    /// Called once per finished cell with its row-major index
    fn cell_completed(&self, cell_index: usize);
}

impl CellObserver for () {
    fn cell_completed(&self, _cell_index: usize) {}
}

/// Builds a mosaic canvas from a target image and a tile set
pub struct MosaicCompositor<'a> {
    target: &'a PixelBuffer,
    tiles: &'a [PixelBuffer],
    geometry: GridGeometry,
    mode: TransferMode,
}

impl<'a> MosaicCompositor<'a> {
    /// Validate the inputs and prepare a build
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if the target cannot be divided into whole
    /// tiles, or `EmptyTileSet` if no tiles are given
    pub fn new(
        target: &'a PixelBuffer,
        tile_size: usize,
        tiles: &'a [PixelBuffer],
        mode: TransferMode,
    ) -> Result<Self> {
        let geometry = GridGeometry::new(target.width(), target.height(), tile_size)?;
        if tiles.is_empty() {
            return Err(MosaicError::EmptyTileSet);
        }
        Ok(Self {
            target,
            tiles,
            geometry,
            mode,
        })
    }

    /// Grid the target is divided into
    pub const fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Recolor the assigned tile for one cell against its target patch
    ///
    /// # Errors
    ///
    /// Returns an error if the cell lies outside the target, the tile index is
    /// out of range, or the tile size differs from the cell size
    pub fn render_cell(&self, cell: CellBox, tile_index: usize) -> Result<PixelBuffer> {
        let patch = self.target.crop(cell.x, cell.y, cell.size, cell.size)?;
        let tile = self.tiles.get(tile_index).ok_or_else(|| MosaicError::InvalidInput {
            parameter: "tile_index",
            value: tile_index.to_string(),
            reason: format!("tile set holds {} tiles", self.tiles.len()),
        })?;
        if tile.width() != cell.size || tile.height() != cell.size {
            return Err(MosaicError::ShapeMismatch {
                source_pixels: tile.len(),
                target_pixels: patch.len(),
                cell: Some((cell.col, cell.row)),
            });
        }
        transfer(tile, &patch, self.mode).with_context(ErrorContext {
            cell: Some((cell.col, cell.row)),
            operation: Some("color transfer"),
        })
    }

    /// Render every cell according to `assignment` and return the canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not cover the grid or any cell
    /// fails to render
    pub fn compose(
        &self,
        assignment: &Assignment,
        observer: &dyn CellObserver,
    ) -> Result<PixelBuffer> {
        let geometry = self.geometry;
        if assignment.len() != geometry.cell_count() {
            return Err(MosaicError::InvalidInput {
                parameter: "assignment",
                value: assignment.len().to_string(),
                reason: format!("grid has {} cells", geometry.cell_count()),
            });
        }

        let mut canvas = PixelBuffer::new(geometry.width(), geometry.height());
        let band_len = geometry.width() * geometry.tile_size();
        if band_len == 0 {
            return Ok(canvas);
        }

        canvas
            .pixels_mut()
            .axis_chunks_iter_mut(Axis(0), band_len)
            .into_par_iter()
            .enumerate()
            .try_for_each(|(row, mut band)| -> Result<()> {
                for col in 0..geometry.cols() {
                    let index = row * geometry.cols() + col;
                    let cell = geometry.cell(index).ok_or_else(|| MosaicError::Computation {
                        operation: "mosaic composition",
                        reason: format!("cell {index} lies outside the grid"),
                    })?;
                    let tile_index = assignment.tile_for_cell(index).ok_or_else(|| {
                        MosaicError::InvalidInput {
                            parameter: "assignment",
                            value: index.to_string(),
                            reason: "cell has no assigned tile".to_string(),
                        }
                    })?;
                    let recolored = self.render_cell(cell, tile_index)?;
                    paste_rows(band.view_mut(), geometry.width(), cell.x, 0, &recolored)?;
                    observer.cell_completed(index);
                }
                Ok(())
            })?;

        Ok(canvas)
    }

    /// Assign tiles with `seed`, render every cell, and return the canvas
    ///
    /// # Errors
    ///
    /// Returns an error if any cell fails to render
    pub fn build_observed(&self, seed: u64, observer: &dyn CellObserver) -> Result<PixelBuffer> {
        let geometry = self.geometry;
        info!(
            "Grid: {} x {} = {} cells, {} tiles, mode {}",
            geometry.cols(),
            geometry.rows(),
            geometry.cell_count(),
            self.tiles.len(),
            self.mode
        );

        let assignment = assign(self.tiles.len(), geometry.cell_count(), seed)?;
        debug!("Tile usage counts: {:?}", assignment.usage_counts());

        self.compose(&assignment, observer)
    }
}

/// Build a mosaic of `target` from `tiles`
///
/// The target must already be enlarged and cropped so both dimensions are
/// multiples of `tile_size`, and every tile must be `tile_size` square.
///
/// # Errors
///
/// Returns `InvalidGeometry` for a target that is not a whole number of tiles,
/// `EmptyTileSet` for an empty tile set, or `ShapeMismatch` for a tile of the
/// wrong size
pub fn build(
    target: &PixelBuffer,
    tile_size: usize,
    tiles: &[PixelBuffer],
    mode: TransferMode,
    seed: u64,
) -> Result<PixelBuffer> {
    MosaicCompositor::new(target, tile_size, tiles, mode)?.build_observed(seed, &())
}
