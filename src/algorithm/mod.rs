/// Balanced random assignment of tiles to cells
pub mod assignment;
/// Grid traversal and per-cell recoloring into the output canvas
pub mod compositor;
