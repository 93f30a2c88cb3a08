//! Ink bounding-box detection and cropping.
//!
//! To reduce sensitivity to where and how large the user draws, the pipeline
//! isolates the drawn region before resampling. A cell is "ink" iff its
//! intensity is strictly below the threshold (strokes are dark on a white
//! background). The detected box is expanded by a fixed margin on all sides
//! and clamped to the grid, then the crop is taken as a half-open row/column
//! slice.

use crate::core::{PredictError, Tensor2D};
use ndarray::s;

/// A half-open bounding box over grid cells: rows `[min_row, max_row)`,
/// columns `[min_col, max_col)`.
///
/// Invariant after [`InkBounds::expanded`]: `min_row <= max_row <= rows` and
/// `min_col <= max_col <= cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBounds {
    /// First row containing ink (inclusive).
    pub min_row: usize,
    /// First column containing ink (inclusive).
    pub min_col: usize,
    /// One past the last row containing ink (exclusive).
    pub max_row: usize,
    /// One past the last column containing ink (exclusive).
    pub max_col: usize,
}

impl InkBounds {
    /// Scans the grid for the tightest box containing all ink cells.
    ///
    /// # Arguments
    ///
    /// * `grid` - The intensity grid to scan.
    /// * `threshold` - A cell is ink iff its value is strictly below this.
    ///
    /// # Returns
    ///
    /// * `Ok(InkBounds)` - The tight bounding box.
    /// * `Err(PredictError::EmptyCanvas)` - If no cell is below the threshold.
    ///   This is the decided behavior for a blank canvas: the caller clears
    ///   the display instead of running a degenerate prediction.
    pub fn detect(grid: &Tensor2D, threshold: f32) -> Result<Self, PredictError> {
        let (rows, cols) = grid.dim();
        let mut min_row = rows;
        let mut min_col = cols;
        let mut max_row = 0usize;
        let mut max_col = 0usize;
        let mut found = false;

        for row in 0..rows {
            for col in 0..cols {
                if grid[[row, col]] < threshold {
                    found = true;
                    min_row = min_row.min(row);
                    min_col = min_col.min(col);
                    max_row = max_row.max(row + 1);
                    max_col = max_col.max(col + 1);
                }
            }
        }

        if !found {
            return Err(PredictError::EmptyCanvas);
        }

        Ok(Self {
            min_row,
            min_col,
            max_row,
            max_col,
        })
    }

    /// Expands the box outward by `padding` on all sides, clamped to the grid.
    ///
    /// # Arguments
    ///
    /// * `padding` - Margin in cells added on each side.
    /// * `rows` - Grid row count, upper clamp for `max_row`.
    /// * `cols` - Grid column count, upper clamp for `max_col`.
    pub fn expanded(self, padding: usize, rows: usize, cols: usize) -> Self {
        Self {
            min_row: self.min_row.saturating_sub(padding),
            min_col: self.min_col.saturating_sub(padding),
            max_row: (self.max_row + padding).min(rows),
            max_col: (self.max_col + padding).min(cols),
        }
    }

    /// Height of the box in cells.
    pub fn height(&self) -> usize {
        self.max_row - self.min_row
    }

    /// Width of the box in cells.
    pub fn width(&self) -> usize {
        self.max_col - self.min_col
    }
}

/// Crops the grid to the given bounds.
///
/// # Arguments
///
/// * `grid` - The grid to crop.
/// * `bounds` - The half-open box to keep. Must lie within the grid.
///
/// # Returns
///
/// * `Ok(Tensor2D)` - The cropped sub-grid.
/// * `Err(PredictError)` - If the bounds fall outside the grid or are empty.
pub fn crop(grid: &Tensor2D, bounds: &InkBounds) -> Result<Tensor2D, PredictError> {
    let (rows, cols) = grid.dim();
    if bounds.max_row > rows || bounds.max_col > cols {
        return Err(PredictError::validation(
            "crop",
            "bounds",
            &format!("within {}x{} grid", rows, cols),
            &format!("{:?}", bounds),
        ));
    }
    if bounds.min_row >= bounds.max_row || bounds.min_col >= bounds.max_col {
        return Err(PredictError::invalid_input(format!(
            "degenerate crop bounds: {:?}",
            bounds
        )));
    }

    Ok(grid
        .slice(s![
            bounds.min_row..bounds.max_row,
            bounds.min_col..bounds.max_col
        ])
        .to_owned())
}
