//! Contiguous RGB pixel storage shared by every stage of the mosaic build
//!
//! Pixels are stored as an `(width * height, 3)` matrix in row-major pixel
//! order, so one image row is a contiguous run of `width` matrix rows and a band
//! of image rows is a contiguous block that can be handed to a worker.

use crate::io::error::{MosaicError, Result};
use ndarray::{Array2, ArrayView2, ArrayViewMut2, Axis, Slice};

/// Number of color channels per pixel
pub const CHANNELS: usize = 3;

/// Fixed-size RGB image held as a pixel matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Array2<u8>,
}

impl PixelBuffer {
    /// Create a black buffer of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: Array2::zeros((width * height, CHANNELS)),
        }
    }

    /// Create a buffer filled with a single color
    pub fn filled(width: usize, height: usize, color: [u8; 3]) -> Self {
        let pixels = Array2::from_shape_fn((width * height, CHANNELS), |(_, c)| {
            color.get(c).copied().unwrap_or(0)
        });
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap interleaved RGB bytes
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not hold exactly `width * height * 3` bytes
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(MosaicError::Computation {
                operation: "pixel buffer construction",
                reason: format!(
                    "expected {expected} bytes for {width}x{height} RGB, got {}",
                    data.len()
                ),
            });
        }
        let pixels = Array2::from_shape_vec((width * height, CHANNELS), data)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an existing pixel matrix
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not `(width * height, 3)`
    pub fn from_pixels(width: usize, height: usize, pixels: Array2<u8>) -> Result<Self> {
        if pixels.dim() != (width * height, CHANNELS) {
            return Err(MosaicError::Computation {
                operation: "pixel buffer construction",
                reason: format!(
                    "pixel matrix {:?} does not describe a {width}x{height} RGB image",
                    pixels.dim()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer from floating point channel values
    ///
    /// Values are clamped to `0..=255` and then rounded. This is the single
    /// point where statistical results are quantized back to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not `(width * height, 3)`
    pub fn from_f64(width: usize, height: usize, values: &Array2<f64>) -> Result<Self> {
        let pixels = values.mapv(|v| num_traits::clamp(v, 0.0, 255.0).round() as u8);
        Self::from_pixels(width, height, pixels)
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (`width * height`)
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the buffer holds no pixels
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the `(len, 3)` pixel matrix
    pub fn pixels(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    /// Mutable view of the `(len, 3)` pixel matrix
    pub fn pixels_mut(&mut self) -> ArrayViewMut2<'_, u8> {
        self.pixels.view_mut()
    }

    /// Pixel matrix converted to `f64` for statistics
    pub fn to_f64(&self) -> Array2<f64> {
        self.pixels.mapv(f64::from)
    }

    /// Color at `(x, y)`, or `None` when out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = self.pixels.row(y * self.width + x);
        Some([
            row.get(0).copied().unwrap_or(0),
            row.get(1).copied().unwrap_or(0),
            row.get(2).copied().unwrap_or(0),
        ])
    }

    /// Copy out the `width x height` region whose top-left corner is `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if the region extends past the buffer edges
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        if x + width > self.width || y + height > self.height {
            return Err(MosaicError::Computation {
                operation: "pixel buffer crop",
                reason: format!(
                    "region {width}x{height} at ({x}, {y}) exceeds {}x{}",
                    self.width, self.height
                ),
            });
        }

        let mut pixels = Array2::zeros((width * height, CHANNELS));
        for (dy, mut band) in pixels.axis_chunks_iter_mut(Axis(0), width.max(1)).enumerate() {
            let start = (y + dy) * self.width + x;
            band.assign(&self.pixels.slice_axis(Axis(0), Slice::from(start..start + width)));
        }

        Self::from_pixels(width, height, pixels)
    }

    /// Overwrite the region at `(x, y)` with the contents of `patch`
    ///
    /// # Errors
    ///
    /// Returns an error if the patch extends past the buffer edges
    pub fn paste(&mut self, x: usize, y: usize, patch: &Self) -> Result<()> {
        paste_rows(self.pixels.view_mut(), self.width, x, y, patch)
    }

    /// Per-channel average color
    pub fn mean_color(&self) -> Option<[f64; 3]> {
        let mean = self.to_f64().mean_axis(Axis(0))?;
        Some([
            mean.get(0).copied().unwrap_or(0.0),
            mean.get(1).copied().unwrap_or(0.0),
            mean.get(2).copied().unwrap_or(0.0),
        ])
    }

    /// Consume the buffer and return interleaved RGB bytes
    pub fn into_raw(self) -> Vec<u8> {
        if self.pixels.is_standard_layout() {
            self.pixels.into_raw_vec_and_offset().0
        } else {
            self.pixels.iter().copied().collect()
        }
    }
}

/// Write `patch` into a band of image rows stored as a `(rows * width, 3)` matrix
///
/// The band may be a whole image or a horizontal slice of one, which lets
/// workers fill disjoint bands without sharing the full canvas.
///
/// # Errors
///
/// Returns an error if the patch does not fit inside the band
pub fn paste_rows(
    mut band: ArrayViewMut2<'_, u8>,
    width: usize,
    x: usize,
    y: usize,
    patch: &PixelBuffer,
) -> Result<()> {
    let band_rows = band.nrows().checked_div(width).unwrap_or(0);
    if x + patch.width > width || y + patch.height > band_rows {
        return Err(MosaicError::Computation {
            operation: "pixel buffer paste",
            reason: format!(
                "patch {}x{} at ({x}, {y}) exceeds {width}x{band_rows}",
                patch.width, patch.height
            ),
        });
    }

    for (dy, source_row) in patch
        .pixels
        .axis_chunks_iter(Axis(0), patch.width.max(1))
        .enumerate()
    {
        let start = (y + dy) * width + x;
        band.slice_axis_mut(Axis(0), Slice::from(start..start + patch.width))
            .assign(&source_row);
    }
    Ok(())
}
