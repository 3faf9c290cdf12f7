//! Spatial data structures for the mosaic canvas
//!
//! This module contains spatial-related functionality including:
//! - Contiguous RGB pixel buffers
//! - Grid geometry and cell enumeration

/// Pixel buffer storage, cropping and pasting
pub mod buffer;
/// Grid geometry and cell boxes
pub mod grid;

pub use buffer::PixelBuffer;
pub use grid::{CellBox, GridGeometry};
