//! RGB and YUV conversion for luma-only color transfer
//!
//! Y carries brightness; U and V carry chroma. Both directions operate on whole
//! `(pixels, 3)` matrices by multiplying with the transposed conversion matrix.

use ndarray::{Array2, ArrayView2};

/// Rows produce Y, U and V from R, G and B
const RGB_TO_YUV: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [-0.147, -0.289, 0.436],
    [0.615, -0.515, -0.100],
];

/// Rows produce R, G and B from Y, U and V
const YUV_TO_RGB: [[f64; 3]; 3] = [
    [1.0, 0.0, 1.139_83],
    [1.0, -0.394_65, -0.580_60],
    [1.0, 2.032_11, 0.0],
];

/// Index of the luma column in a YUV matrix
pub const LUMA: usize = 0;

fn convert(values: ArrayView2<'_, f64>, matrix: &[[f64; 3]; 3]) -> Array2<f64> {
    let transposed = Array2::from_shape_fn((3, 3), |(i, j)| {
        matrix
            .get(j)
            .and_then(|row| row.get(i))
            .copied()
            .unwrap_or(0.0)
    });
    values.dot(&transposed)
}

/// Convert a `(pixels, 3)` RGB matrix to YUV
pub fn rgb_to_yuv(rgb: ArrayView2<'_, f64>) -> Array2<f64> {
    convert(rgb, &RGB_TO_YUV)
}

/// Convert a `(pixels, 3)` YUV matrix back to RGB
pub fn yuv_to_rgb(yuv: ArrayView2<'_, f64>) -> Array2<f64> {
    convert(yuv, &YUV_TO_RGB)
}

/// YUV components of a single RGB color
pub fn yuv_of(rgb: [f64; 3]) -> [f64; 3] {
    RGB_TO_YUV.map(|row| {
        row.iter()
            .zip(rgb.iter())
            .map(|(coefficient, channel)| coefficient * channel)
            .sum()
    })
}
