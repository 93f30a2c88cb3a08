//! Nearest-neighbor resampling to the classifier's fixed input grid.
//!
//! The crop is resampled to the target size by pure index mapping: for each
//! target cell `(i, j)` the source cell is `(floor(i / target * rows),
//! floor(j / target * cols))`. Small crops are upsampled with repeated values
//! and large crops are downsampled by subsampling without averaging. This is a
//! deliberate simplicity choice matching the classifier's training data, not
//! an aliasing-free resize.

use crate::core::{PredictError, Tensor2D};

/// Resamples a grid to `target` × `target` with nearest-neighbor sampling.
///
/// Resampling an already `target` × `target` grid returns an identical grid,
/// and a constant grid of any size resamples to that same constant.
///
/// # Arguments
///
/// * `grid` - The source grid. Must be non-empty.
/// * `target` - The output side length. Must be non-zero.
///
/// # Returns
///
/// * `Ok(Tensor2D)` - The resampled `target` × `target` grid.
/// * `Err(PredictError)` - If the source grid is empty or `target` is zero.
pub fn resize_nearest(grid: &Tensor2D, target: usize) -> Result<Tensor2D, PredictError> {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return Err(PredictError::invalid_input(
            "cannot resample an empty grid",
        ));
    }
    if target == 0 {
        return Err(PredictError::config("resample target size must be non-zero"));
    }

    let mut out = Tensor2D::zeros((target, target));
    for i in 0..target {
        let src_row = i * rows / target;
        for j in 0..target {
            let src_col = j * cols / target;
            out[[i, j]] = grid[[src_row, src_col]];
        }
    }
    Ok(out)
}
