//! Tests for pixel buffer construction, cropping, pasting and quantization

#[cfg(test)]
mod tests {
    use mosaictile::spatial::PixelBuffer;
    use mosaictile::spatial::buffer::paste_rows;
    use ndarray::{Array2, s};

    fn coordinate_buffer(width: usize, height: usize) -> PixelBuffer {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 7]);
            }
        }
        PixelBuffer::from_raw(width, height, data).expect("valid dimensions")
    }

    // Tests raw construction rejects data of the wrong length
    // Verified by removing the length check
    #[test]
    fn test_from_raw_rejects_wrong_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 11]).is_err());
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 12]).is_ok());
    }

    // Tests pixel matrix construction checks the shape
    // Verified by accepting any matrix
    #[test]
    fn test_from_pixels_checks_shape() {
        assert!(PixelBuffer::from_pixels(3, 2, Array2::zeros((6, 3))).is_ok());
        assert!(PixelBuffer::from_pixels(3, 2, Array2::zeros((5, 3))).is_err());
        assert!(PixelBuffer::from_pixels(3, 2, Array2::zeros((6, 4))).is_err());
    }

    // Tests pixels are stored in row-major order
    // Verified by swapping x and y in the index calculation
    #[test]
    fn test_row_major_layout() {
        let buffer = coordinate_buffer(3, 2);

        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.get(2, 0), Some([20, 0, 7]));
        assert_eq!(buffer.get(0, 1), Some([0, 10, 7]));
        assert_eq!(buffer.pixels().row(4).to_vec(), vec![10, 10, 7]);
        assert_eq!(buffer.get(3, 0), None);
        assert_eq!(buffer.get(0, 2), None);
    }

    // Tests cropping copies exactly the requested region
    // Verified by offsetting the crop start row
    #[test]
    fn test_crop_extracts_region() {
        let buffer = coordinate_buffer(4, 4);
        let region = buffer.crop(1, 2, 2, 2).expect("region inside buffer");

        assert_eq!(region.width(), 2);
        assert_eq!(region.height(), 2);
        assert_eq!(region.get(0, 0), Some([10, 20, 7]));
        assert_eq!(region.get(1, 0), Some([20, 20, 7]));
        assert_eq!(region.get(0, 1), Some([10, 30, 7]));
        assert_eq!(region.get(1, 1), Some([20, 30, 7]));
    }

    // Tests cropping past the buffer edge fails
    // Verified by removing the bounds check
    #[test]
    fn test_crop_out_of_bounds() {
        let buffer = coordinate_buffer(4, 4);

        assert!(buffer.crop(3, 0, 2, 2).is_err());
        assert!(buffer.crop(0, 3, 2, 2).is_err());
        assert!(buffer.crop(0, 0, 4, 4).is_ok());
    }

    // Tests pasting writes only the target region
    // Verified by pasting one row too low
    #[test]
    fn test_paste_writes_region_only() {
        let mut canvas = PixelBuffer::new(4, 4);
        let patch = PixelBuffer::filled(2, 2, [255, 0, 0]);

        canvas.paste(2, 1, &patch).expect("patch fits");

        for y in 0..4 {
            for x in 0..4 {
                let expected = if (2..4).contains(&x) && (1..3).contains(&y) {
                    [255, 0, 0]
                } else {
                    [0, 0, 0]
                };
                assert_eq!(canvas.get(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    // Tests pasting past the edge fails without panicking
    // Verified by removing the bounds check
    #[test]
    fn test_paste_out_of_bounds() {
        let mut canvas = PixelBuffer::new(4, 4);
        let patch = PixelBuffer::filled(2, 2, [1, 2, 3]);

        assert!(canvas.paste(3, 0, &patch).is_err());
        assert!(canvas.paste(0, 3, &patch).is_err());
    }

    // Tests pasting into a band uses band-relative rows
    // Verified by adding the band offset twice
    #[test]
    fn test_paste_rows_into_band() {
        let mut canvas = PixelBuffer::new(4, 4);
        let patch = PixelBuffer::filled(2, 2, [9, 9, 9]);
        let mut pixels = canvas.pixels_mut();
        let band = pixels.slice_mut(s![8..16, ..]);

        paste_rows(band, 4, 0, 0, &patch).expect("patch fits in band");

        assert_eq!(canvas.get(0, 2), Some([9, 9, 9]));
        assert_eq!(canvas.get(1, 3), Some([9, 9, 9]));
        assert_eq!(canvas.get(0, 1), Some([0, 0, 0]));
        assert_eq!(canvas.get(2, 2), Some([0, 0, 0]));
    }

    // Tests float conversion clamps before rounding
    // Verified by rounding before clamping
    #[test]
    fn test_from_f64_clamps_then_rounds() {
        let values = Array2::from_shape_vec((2, 3), vec![-5.0, 255.7, 127.5, 300.0, 0.4, 99.6])
            .expect("valid shape");
        let buffer = PixelBuffer::from_f64(2, 1, &values).expect("valid dimensions");

        assert_eq!(buffer.get(0, 0), Some([0, 255, 128]));
        assert_eq!(buffer.get(1, 0), Some([255, 0, 100]));
    }

    // Tests average color over all pixels
    // Verified by dividing by the wrong count
    #[test]
    fn test_mean_color() {
        let buffer = PixelBuffer::from_raw(2, 1, vec![0, 10, 100, 20, 30, 200])
            .expect("valid dimensions");
        let mean = buffer.mean_color().expect("non-empty buffer");

        assert!((mean[0] - 10.0).abs() < 1e-9);
        assert!((mean[1] - 20.0).abs() < 1e-9);
        assert!((mean[2] - 150.0).abs() < 1e-9);
        assert!(PixelBuffer::new(0, 0).mean_color().is_none());
    }

    // Tests raw bytes come back in interleaved order
    // Verified by transposing the matrix before export
    #[test]
    fn test_into_raw_interleaved() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let buffer = PixelBuffer::from_raw(2, 2, data.clone()).expect("valid dimensions");

        assert_eq!(buffer.into_raw(), data);
    }
}
