//! Balanced random assignment of tiles to grid cells
//!
//! Every tile index is repeated `cells / tiles` times, the remainder is filled
//! with distinct tiles drawn at random, and the whole sequence is shuffled once.
//! Usage counts therefore differ by at most one while placement positions stay
//! uniformly random.

use crate::io::error::{Result, invalid_input};
use rand::seq::{SliceRandom, index};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Tile index chosen for every cell, in row-major cell order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    indices: Vec<usize>,
    tile_count: usize,
}

impl Assignment {
    /// Tile index for the cell at the given row-major position
    pub fn tile_for_cell(&self, cell_index: usize) -> Option<usize> {
        self.indices.get(cell_index).copied()
    }

    /// Tile indices in cell order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of cells covered
    pub const fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no cells are covered
    pub const fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of distinct tiles the indices are drawn from
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// How many cells each tile was assigned to
    pub fn usage_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.tile_count];
        for &index in &self.indices {
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
        }
        counts
    }
}

/// Assign tiles to cells using a generator seeded from `seed`
///
/// Identical arguments always produce identical assignments.
///
/// # Errors
///
/// Returns `InvalidInput` if `tile_count` is zero
pub fn assign(tile_count: usize, cell_count: usize, seed: u64) -> Result<Assignment> {
    let mut rng = StdRng::seed_from_u64(seed);
    assign_with_rng(tile_count, cell_count, &mut rng)
}

/// Assign tiles to cells using a caller-owned generator
///
/// # Errors
///
/// Returns `InvalidInput` if `tile_count` is zero
pub fn assign_with_rng<R: Rng + ?Sized>(
    tile_count: usize,
    cell_count: usize,
    rng: &mut R,
) -> Result<Assignment> {
    if tile_count == 0 {
        return Err(invalid_input(
            "tile_count",
            &tile_count,
            &"at least one tile is required",
        ));
    }

    let repeats = cell_count / tile_count;
    let remainder = cell_count % tile_count;

    let mut indices: Vec<usize> = Vec::with_capacity(cell_count);
    indices.extend((0..repeats).flat_map(|_| 0..tile_count));
    // Remainder tiles must be distinct or one of them would be used twice more
    indices.extend(index::sample(rng, tile_count, remainder));
    indices.shuffle(rng);

    Ok(Assignment {
        indices,
        tile_count,
    })
}
