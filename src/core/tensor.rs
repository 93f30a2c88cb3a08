//! Tensor aliases and conversions between intensity grids and model inputs.

use crate::core::errors::PredictError;
use ndarray::{Array2, Array4};

/// A 2D tensor of f32 values (rows × columns).
pub type Tensor2D = Array2<f32>;

/// A 4D tensor of f32 values (batch × rows × columns × channels).
pub type Tensor4D = Array4<f32>;

/// Reshapes a 2D intensity grid into the rank-4 input the classifier expects.
///
/// The grid is expanded with a leading batch dimension and a trailing channel
/// dimension, producing shape `[1, rows, cols, 1]`. Values are copied as-is;
/// the grid is already on the canonical [0, 1] scale.
///
/// # Arguments
///
/// * `grid` - The intensity grid to reshape.
///
/// # Returns
///
/// * `Ok(Tensor4D)` - The reshaped input tensor.
/// * `Err(PredictError)` - If the grid is empty.
pub fn to_model_input(grid: &Tensor2D) -> Result<Tensor4D, PredictError> {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return Err(PredictError::invalid_input(
            "cannot build model input from an empty grid",
        ));
    }
    let flat: Vec<f32> = grid.iter().copied().collect();
    let tensor = Tensor4D::from_shape_vec((1, rows, cols, 1), flat)?;
    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_model_input_shape() {
        let grid = Tensor2D::from_elem((28, 28), 1.0);
        let tensor = to_model_input(&grid).unwrap();
        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
    }

    #[test]
    fn test_to_model_input_preserves_values() {
        let mut grid = Tensor2D::from_elem((2, 3), 0.0);
        grid[[1, 2]] = 0.5;
        let tensor = to_model_input(&grid).unwrap();
        assert_eq!(tensor[[0, 1, 2, 0]], 0.5);
        assert_eq!(tensor[[0, 0, 0, 0]], 0.0);
    }

    #[test]
    fn test_to_model_input_rejects_empty_grid() {
        let grid = Tensor2D::from_elem((0, 0), 0.0);
        assert!(to_model_input(&grid).is_err());
    }
}
