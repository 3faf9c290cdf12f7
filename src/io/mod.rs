//! Input/output operations surrounding the mosaic core

/// Command-line parsing and job orchestration
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Image decoding, preparation and encoding
pub mod image;
/// Terminal progress display
pub mod progress;
