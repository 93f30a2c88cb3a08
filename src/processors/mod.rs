//! The preprocessing pipeline between the drawing surface and the classifier.
//!
//! # Modules
//!
//! * `extract` - Reading rendered RGBA pixels back into an intensity grid
//! * `crop` - Ink bounding-box detection, margin expansion, and cropping
//! * `resize` - Nearest-neighbor resampling to the classifier's input size
//!
//! The whole pipeline works on one canonical intensity scale, [0, 1]:
//! extraction divides the red byte by 255, the default ink threshold is the
//! original 100-of-255 re-expressed on that scale, and the model input tensor
//! is built from the same values.

mod crop;
mod extract;
mod resize;

pub use crop::{crop, InkBounds};
pub use extract::extract_intensity;
pub use resize::resize_nearest;

use crate::core::{to_model_input, PredictError, Tensor2D, Tensor4D};
use serde::{Deserialize, Serialize};

/// Default ink threshold on the canonical [0, 1] scale.
pub const DEFAULT_INK_THRESHOLD: f32 = 100.0 / 255.0;

/// Default margin, in cells, added around the detected ink box.
pub const DEFAULT_PADDING: usize = 15;

/// Side length of the classifier's input grid.
pub const MODEL_INPUT_SIZE: usize = 28;

/// Configuration for the crop-and-resize transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropConfig {
    /// A cell is ink iff its intensity is strictly below this, on [0, 1].
    pub ink_threshold: f32,
    /// Margin in cells added on each side of the detected box.
    pub padding: usize,
    /// Side length of the resampled output grid.
    pub target_size: usize,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            ink_threshold: DEFAULT_INK_THRESHOLD,
            padding: DEFAULT_PADDING,
            target_size: MODEL_INPUT_SIZE,
        }
    }
}

impl CropConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, PredictError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PredictError::config(format!("invalid crop config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the crop configuration.
    ///
    /// The threshold must lie in (0, 1] on the canonical scale and the target
    /// size must be non-zero.
    pub fn validate(&self) -> Result<(), PredictError> {
        if !(self.ink_threshold > 0.0 && self.ink_threshold <= 1.0) {
            return Err(PredictError::validation(
                "CropConfig",
                "ink_threshold",
                "a value in (0, 1]",
                &self.ink_threshold.to_string(),
            ));
        }
        if self.target_size == 0 {
            return Err(PredictError::validation(
                "CropConfig",
                "target_size",
                "a non-zero size",
                "0",
            ));
        }
        Ok(())
    }
}

/// Runs the full transform from intensity grid to model input tensor.
///
/// Detects the ink bounding box, expands and clamps it, crops the grid,
/// resamples the crop to the configured target size, and reshapes the result
/// into the `[1, size, size, 1]` tensor the classifier consumes.
///
/// # Arguments
///
/// * `grid` - The extracted intensity grid.
/// * `config` - Threshold, padding, and target size.
///
/// # Returns
///
/// * `Ok(Tensor4D)` - The prepared model input.
/// * `Err(PredictError::EmptyCanvas)` - If the grid contains no ink.
/// * `Err(PredictError)` - If cropping or resampling fails.
pub fn prepare_model_input(grid: &Tensor2D, config: &CropConfig) -> Result<Tensor4D, PredictError> {
    let (rows, cols) = grid.dim();
    let bounds =
        InkBounds::detect(grid, config.ink_threshold)?.expanded(config.padding, rows, cols);
    let cropped = crop(grid, &bounds)?;
    let resized = resize_nearest(&cropped, config.target_size)?;
    to_model_input(&resized)
}
