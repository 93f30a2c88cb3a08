//! Pixel extraction from a rendered RGBA surface.
//!
//! The drawing surface is always rendered with grayscale stroke color, so the
//! three color channels are equal and the red channel alone carries the
//! intensity. Extraction reads that channel into a row-major grid on the
//! canonical [0, 1] scale (byte value / 255), the one scale used consistently
//! by thresholding and tensor construction downstream.

use crate::core::{PredictError, Tensor2D};

/// Number of bytes per pixel in an RGBA buffer.
const RGBA_CHANNELS: usize = 4;

/// Reads an RGBA pixel buffer back into an intensity grid.
///
/// # Arguments
///
/// * `buffer` - Raw RGBA pixel data, row-major, 4 bytes per pixel.
/// * `width` - Surface width in pixels.
/// * `height` - Surface height in pixels.
///
/// # Returns
///
/// * `Ok(Tensor2D)` - A `height` × `width` grid of red-channel intensities
///   normalized to [0, 1].
/// * `Err(PredictError)` - If the buffer length does not match the dimensions.
pub fn extract_intensity(
    buffer: &[u8],
    width: usize,
    height: usize,
) -> Result<Tensor2D, PredictError> {
    let expected = width * height * RGBA_CHANNELS;
    if buffer.len() != expected {
        return Err(PredictError::validation(
            "extract_intensity",
            "buffer length",
            &format!("{} bytes ({}x{} RGBA)", expected, width, height),
            &buffer.len().to_string(),
        ));
    }

    let mut grid = Tensor2D::zeros((height, width));
    for row in 0..height {
        for col in 0..width {
            let index = (row * width + col) * RGBA_CHANNELS;
            grid[[row, col]] = buffer[index] as f32 / 255.0;
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_pixel(value: u8) -> [u8; 4] {
        [value, value, value, 255]
    }

    #[test]
    fn test_extract_reads_red_channel() {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&rgba_pixel(255));
        buffer.extend_from_slice(&rgba_pixel(0));
        buffer.extend_from_slice(&rgba_pixel(51));
        buffer.extend_from_slice(&rgba_pixel(255));

        let grid = extract_intensity(&buffer, 2, 2).unwrap();
        assert_eq!(grid[[0, 0]], 1.0);
        assert_eq!(grid[[0, 1]], 0.0);
        assert!((grid[[1, 0]] - 0.2).abs() < 1e-6);
        assert_eq!(grid[[1, 1]], 1.0);
    }

    #[test]
    fn test_extract_ignores_other_channels() {
        // Red carries intensity even when green/blue disagree.
        let buffer = [10u8, 200, 200, 255];
        let grid = extract_intensity(&buffer, 1, 1).unwrap();
        assert!((grid[[0, 0]] - 10.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_extract_rejects_short_buffer() {
        let buffer = [0u8; 7];
        let result = extract_intensity(&buffer, 2, 1);
        assert!(matches!(result, Err(PredictError::InvalidInput { .. })));
    }
}
