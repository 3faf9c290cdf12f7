//! Per-channel summary statistics over pixel matrices

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

/// Mean and population standard deviation of each column of a pixel matrix
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStatistics {
    /// Mean of each channel
    pub mean: Array1<f64>,
    /// Population standard deviation of each channel
    pub std_dev: Array1<f64>,
}

impl ChannelStatistics {
    /// Compute statistics for a `(pixels, channels)` matrix
    ///
    /// Returns `None` for a matrix with no rows.
    pub fn of(values: ArrayView2<'_, f64>) -> Option<Self> {
        let mean = values.mean_axis(Axis(0))?;
        // ddof = 0 gives the population deviation
        let std_dev = values.std_axis(Axis(0), 0.0);
        Some(Self { mean, std_dev })
    }

    /// Statistics of a single channel
    pub fn of_channel(values: ArrayView1<'_, f64>) -> Option<(f64, f64)> {
        let mean = values.mean()?;
        Some((mean, values.std(0.0)))
    }

    /// Number of channels described
    pub fn channels(&self) -> usize {
        self.mean.len()
    }
}

/// Ratio of target to source spread, guarded against a zero source spread
pub const fn gain(target_std: f64, source_std: f64, epsilon: f64) -> f64 {
    target_std / (source_std + epsilon)
}
