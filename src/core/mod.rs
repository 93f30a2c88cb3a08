//! The core module of the recognition pipeline.
//!
//! This module contains the fundamental components shared across the crate:
//! - Error handling
//! - Tensor aliases and model-input construction
//! - The classifier model capability and its ONNX Runtime implementation
//!
//! It also re-exports the commonly used types for convenience.

pub mod errors;
pub mod model;
pub mod tensor;

pub use errors::{PredictError, ProcessingStage, SimpleError};
pub use model::{DigitModel, ModelState, OrtDigitModel};
pub use tensor::{to_model_input, Tensor2D, Tensor4D};
