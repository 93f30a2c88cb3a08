//! The classifier model capability and its ONNX Runtime implementation.
//!
//! The preprocessing pipeline only needs one thing from the inference engine:
//! feed it a prepared `[1, 28, 28, 1]` tensor and get back a flat vector of
//! class scores. That capability is the [`DigitModel`] trait, so the actual
//! engine is swappable without touching the pipeline. [`OrtDigitModel`] is the
//! production implementation backed by an ONNX Runtime session.

use crate::core::errors::PredictError;
use crate::core::tensor::Tensor4D;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Trait for a loaded classifier model.
///
/// Implementations take a prepared input tensor and return a flat, ordered
/// vector of class scores with one entry per class.
pub trait DigitModel: Send + std::fmt::Debug {
    /// The number of classes this model scores.
    fn num_classes(&self) -> usize;

    /// Runs inference on a prepared input tensor.
    ///
    /// # Arguments
    ///
    /// * `input` - The input tensor of shape `[1, rows, cols, 1]`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<f32>)` - Class scores, one per class, in class order.
    /// * `Err(PredictError)` - If the inference call fails.
    fn predict(&self, input: &Tensor4D) -> Result<Vec<f32>, PredictError>;
}

/// Lifecycle of the one-shot model load.
///
/// Prediction is gated on `Ready`: a predict attempt through an `Unloaded`
/// or `Loading` gate is a defined [`PredictError::ModelNotReady`] error
/// rather than an unguarded fault.
pub enum ModelState {
    /// No load has been started.
    Unloaded,
    /// A load is in progress.
    Loading,
    /// The model is loaded and predictions can run.
    Ready(Box<dyn DigitModel>),
}

impl ModelState {
    /// Returns true if the model is loaded and predictions can run.
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }

    /// Returns the loaded model, or `ModelNotReady` if the load has not
    /// completed.
    pub fn model(&self) -> Result<&dyn DigitModel, PredictError> {
        match self {
            ModelState::Ready(model) => Ok(model.as_ref()),
            _ => Err(PredictError::ModelNotReady),
        }
    }
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelState::Unloaded => write!(f, "Unloaded"),
            ModelState::Loading => write!(f, "Loading"),
            ModelState::Ready(m) => write!(f, "Ready({} classes)", m.num_classes()),
        }
    }
}

/// A digit classifier backed by an ONNX Runtime session.
///
/// The session is created once from a model file; input and output tensor
/// names are discovered from the session metadata. `run` takes `&mut Session`,
/// so the session sits behind a mutex even though predictions are serialized
/// by the single-threaded session model.
pub struct OrtDigitModel {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    model_path: PathBuf,
    num_classes: usize,
}

impl std::fmt::Debug for OrtDigitModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtDigitModel")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("num_classes", &self.num_classes)
            .finish()
    }
}

impl OrtDigitModel {
    /// Loads a model from an ONNX file.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the ONNX model file.
    /// * `num_classes` - Number of classes the model's output row contains.
    ///
    /// # Returns
    ///
    /// * `Ok(OrtDigitModel)` - The loaded model.
    /// * `Err(PredictError)` - If the session cannot be created or the model
    ///   has no input or output tensors.
    pub fn load(model_path: impl AsRef<Path>, num_classes: usize) -> Result<Self, PredictError> {
        let path = model_path.as_ref();
        debug!(model_path = %path.display(), "loading ONNX session");

        let session = Session::builder().and_then(|b| b.commit_from_file(path))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| {
                PredictError::invalid_input(format!(
                    "model '{}' declares no input tensors",
                    path.display()
                ))
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| {
                PredictError::invalid_input(format!(
                    "model '{}' declares no output tensors",
                    path.display()
                ))
            })?;

        debug!(%input_name, %output_name, "ONNX session ready");

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_path: path.to_path_buf(),
            num_classes,
        })
    }

    /// Returns the model path this session was created from.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl DigitModel for OrtDigitModel {
    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn predict(&self, input: &Tensor4D) -> Result<Vec<f32>, PredictError> {
        let input_tensor = TensorRef::from_array_view(input.view())
            .map_err(|e| PredictError::inference(e))?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            PredictError::invalid_input("failed to acquire ONNX session lock")
        })?;

        let outputs = session.run(inputs).map_err(|e| PredictError::inference(e))?;

        let (_, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictError::inference(e))?;

        if data.len() != self.num_classes {
            return Err(PredictError::validation(
                "OrtDigitModel",
                "output length",
                &self.num_classes.to_string(),
                &data.len().to_string(),
            ));
        }

        Ok(data.to_vec())
    }
}
