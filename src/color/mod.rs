//! Color spaces and statistical color transfer

/// RGB to YUV conversion and back
pub mod space;
/// Recoloring a buffer to match another buffer's statistics
pub mod transfer;

pub use transfer::{TransferMode, transfer};
