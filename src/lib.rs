//! Photomosaic synthesis with balanced random tile assignment and statistical color transfer
//!
//! A target image is divided into a grid of square cells. Each cell receives a
//! tile chosen by a seeded, balanced shuffle, and the tile is recolored so its
//! color statistics match the patch of the target it replaces.

#![forbid(unsafe_code)]

/// Tile assignment and mosaic composition
pub mod algorithm;
/// Color spaces and statistical color transfer
pub mod color;
/// Input/output operations, configuration and error handling
pub mod io;
/// Statistical helpers for color matching
pub mod math;
/// Pixel buffers and grid geometry
pub mod spatial;

pub use algorithm::assignment::{Assignment, assign};
pub use algorithm::compositor::build;
pub use color::{TransferMode, transfer};
pub use io::error::{MosaicError, Result};
pub use spatial::PixelBuffer;
