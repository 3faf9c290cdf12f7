//! Mosaic constants and runtime configuration defaults

// Default values for configurable parameters
/// Edge length of each square tile in output pixels
pub const DEFAULT_TILE_SIZE: u32 = 50;

/// Scale factor applied to the target image before it is divided into cells
pub const DEFAULT_ENLARGEMENT: u32 = 8;

/// Fixed seed for reproducible tile assignment
pub const DEFAULT_SEED: u64 = 12345;

// Output settings
/// Output filename used when none is given
pub const DEFAULT_OUTPUT: &str = "mosaic.jpeg";
/// Quality used when the output is encoded as JPEG
pub const JPEG_QUALITY: u8 = 95;

// Keeps flat tiles from dividing by zero during color transfer
/// Added to the source standard deviation before computing a gain
pub const COLOR_EPSILON: f64 = 1e-6;

// Progress display settings
/// Number of loaded tiles between loading status updates
pub const TILE_LOAD_REPORT_INTERVAL: usize = 100;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
