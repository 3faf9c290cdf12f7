//! Statistical color transfer between equally sized pixel buffers
//!
//! The source buffer is recolored so that its per-channel statistics match
//! those of the target buffer. All arithmetic is done in `f64` and the result is
//! clamped and rounded back to bytes exactly once, in [`PixelBuffer::from_f64`].
//! Out-of-range values are truncated to the valid range rather than rescaled,
//! so heavily saturated targets lose detail in the clipped channels.

use crate::color::space::{LUMA, rgb_to_yuv, yuv_to_rgb};
use crate::io::configuration::COLOR_EPSILON;
use crate::io::error::{MosaicError, Result};
use crate::math::statistics::{ChannelStatistics, gain};
use crate::spatial::PixelBuffer;
use ndarray::{Array2, Axis};
use std::fmt;

/// Which statistics of the target the recolored buffer should reproduce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum TransferMode {
    /// Shift each channel so its mean matches; contrast is untouched
    Mean,
    /// Match mean and standard deviation of each channel
    #[default]
    #[value(name = "meanstd")]
    MeanStd,
    /// Match mean and standard deviation of luma only, keeping the source hue
    Luma,
}

impl TransferMode {
    /// Name used on the command line and in logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::MeanStd => "meanstd",
            Self::Luma => "luma",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recolor `source` so its statistics match `target` under `mode`
///
/// The output has the dimensions of `source`.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the buffers hold different numbers of pixels
pub fn transfer(
    source: &PixelBuffer,
    target: &PixelBuffer,
    mode: TransferMode,
) -> Result<PixelBuffer> {
    if source.len() != target.len() {
        return Err(MosaicError::ShapeMismatch {
            source_pixels: source.len(),
            target_pixels: target.len(),
            cell: None,
        });
    }
    if source.is_empty() {
        return Ok(source.clone());
    }

    let source_values = source.to_f64();
    let target_values = target.to_f64();

    let recolored = match mode {
        TransferMode::Mean => match_mean(source_values, &target_values)?,
        TransferMode::MeanStd => match_mean_std(source_values, &target_values)?,
        TransferMode::Luma => match_luma(&source_values, &target_values)?,
    };

    PixelBuffer::from_f64(source.width(), source.height(), &recolored)
}

fn statistics(values: &Array2<f64>) -> Result<ChannelStatistics> {
    ChannelStatistics::of(values.view()).ok_or_else(|| MosaicError::Computation {
        operation: "channel statistics",
        reason: "buffer has no pixels".to_string(),
    })
}

fn match_mean(source: Array2<f64>, target: &Array2<f64>) -> Result<Array2<f64>> {
    let source_stats = statistics(&source)?;
    let target_stats = statistics(target)?;
    let shift = &target_stats.mean - &source_stats.mean;
    Ok(source + &shift)
}

fn match_mean_std(source: Array2<f64>, target: &Array2<f64>) -> Result<Array2<f64>> {
    let source_stats = statistics(&source)?;
    let target_stats = statistics(target)?;
    let gains = ndarray::Zip::from(&target_stats.std_dev)
        .and(&source_stats.std_dev)
        .map_collect(|&target_std, &source_std| gain(target_std, source_std, COLOR_EPSILON));
    Ok((source - &source_stats.mean) * &gains + &target_stats.mean)
}

fn match_luma(source: &Array2<f64>, target: &Array2<f64>) -> Result<Array2<f64>> {
    let mut source_yuv = rgb_to_yuv(source.view());
    let target_yuv = rgb_to_yuv(target.view());

    let luma_stats = |yuv: &Array2<f64>| {
        ChannelStatistics::of_channel(yuv.index_axis(Axis(1), LUMA)).ok_or_else(|| {
            MosaicError::Computation {
                operation: "luma statistics",
                reason: "buffer has no pixels".to_string(),
            }
        })
    };
    let (source_mean, source_std) = luma_stats(&source_yuv)?;
    let (target_mean, target_std) = luma_stats(&target_yuv)?;

    // A flat tile has no contrast to stretch; only shift it
    let luma_gain = if source_std > COLOR_EPSILON {
        gain(target_std, source_std, COLOR_EPSILON)
    } else {
        1.0
    };
    let bias = source_mean.mul_add(-luma_gain, target_mean);

    source_yuv
        .index_axis_mut(Axis(1), LUMA)
        .mapv_inplace(|luma| luma.mul_add(luma_gain, bias));

    Ok(yuv_to_rgb(source_yuv.view()))
}
