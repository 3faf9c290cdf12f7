//! Mathematical utilities for color statistics

/// Per-channel means and standard deviations
pub mod statistics;
