//! Error types for the digit recognition pipeline.
//!
//! This module defines the error types that can occur between a stroke release
//! and a rendered prediction, including preprocessing errors, inference errors,
//! and the two recoverable user-facing conditions (model not yet loaded, blank
//! canvas). It also provides utility functions for creating these errors with
//! appropriate context.

use thiserror::Error;

/// Enum representing different stages of preprocessing in the pipeline.
///
/// This enum is used to identify which stage of the pipeline an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred while reading pixel data off the drawing surface.
    Extraction,
    /// Error occurred during bounding-box detection or cropping.
    Crop,
    /// Error occurred during nearest-neighbor resampling.
    Resize,
    /// Error occurred during tensor construction.
    TensorOperation,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Extraction => write!(f, "pixel extraction"),
            ProcessingStage::Crop => write!(f, "crop"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::TensorOperation => write!(f, "tensor operation"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the recognition pipeline.
///
/// The first two variants are expected user-facing conditions: both are
/// recoverable locally by clearing the result display and letting the user
/// keep drawing. The rest are genuine faults in preprocessing, configuration,
/// or the inference runtime.
#[derive(Error, Debug)]
pub enum PredictError {
    /// Predict was attempted before the model finished loading.
    #[error("model not ready: prediction attempted before load completed")]
    ModelNotReady,

    /// No ink pixel was found on the canvas; the bounding box is degenerate.
    #[error("empty canvas: no ink detected")]
    EmptyCanvas,

    /// The inference call itself failed.
    #[error("inference")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error occurred during preprocessing.
    #[error("{stage} failed: {context}")]
    Processing {
        /// The stage of preprocessing where the error occurred.
        stage: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor shape operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl PredictError {
    /// Creates a PredictError for a failed preprocessing operation.
    ///
    /// # Arguments
    ///
    /// * `stage` - The stage of preprocessing where the error occurred.
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn processing(
        stage: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            stage,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a PredictError for a failed inference call.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying error that caused this error.
    pub fn inference(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Inference(Box::new(error))
    }

    /// Creates a PredictError for invalid input.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a PredictError for configuration errors.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a PredictError for validation errors with field context.
    ///
    /// # Arguments
    ///
    /// * `component` - The component where the error occurred.
    /// * `field` - The field that failed validation.
    /// * `expected` - The expected value.
    /// * `actual` - The actual value.
    pub fn validation(component: &str, field: &str, expected: &str, actual: &str) -> Self {
        Self::InvalidInput {
            message: format!(
                "Validation failed in {}: field '{}' expected {}, but got '{}'",
                component, field, expected, actual
            ),
        }
    }

    /// Returns true for the conditions a drawing session recovers from by
    /// clearing the display and letting the user keep drawing.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ModelNotReady | Self::EmptyCanvas)
    }
}

/// A simple string-backed error for wrapping plain messages as error sources.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new SimpleError with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}
