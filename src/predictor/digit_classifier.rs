//! Digit Classifier
//!
//! This module provides the classifier that turns a drawn canvas into a digit
//! prediction. It owns the model lifecycle gate (`Unloaded → Loading → Ready`),
//! the crop-and-resize configuration, and the class labels, and runs the whole
//! chain: extract → bounding box → crop → resize → tensor → inference → argmax.

use crate::canvas::CanvasSurface;
use crate::core::{DigitModel, ModelState, OrtDigitModel, PredictError, Tensor2D};
use crate::predictor::khmer_digit_labels;
use crate::processors::{extract_intensity, prepare_model_input, CropConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// A single prediction over the digit classes.
#[derive(Debug, Clone)]
pub struct DigitPrediction {
    /// Class scores in class order, as produced by the model.
    pub scores: Vec<f32>,
    /// Index of the winning class (first occurrence on ties).
    pub best_class: usize,
    /// Score of the winning class.
    pub confidence: f32,
    /// Label of the winning class.
    pub label: Arc<str>,
}

impl DigitPrediction {
    /// The winning confidence as a rounded percentage.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// Classifier for hand-drawn digits.
///
/// Predictions are gated on the model being loaded: a predict attempt before
/// [`DigitClassifier::load_model`] completes returns
/// [`PredictError::ModelNotReady`] instead of faulting.
pub struct DigitClassifier {
    state: ModelState,
    config: CropConfig,
    labels: Vec<Arc<str>>,
}

impl std::fmt::Debug for DigitClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitClassifier")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("labels", &self.labels.len())
            .finish()
    }
}

impl DigitClassifier {
    /// Creates an unloaded classifier with the given configuration and labels.
    ///
    /// # Arguments
    ///
    /// * `config` - Crop-and-resize configuration.
    /// * `labels` - Class labels in class order; their count fixes the number
    ///   of classes.
    ///
    /// # Returns
    ///
    /// * `Ok(DigitClassifier)` - The classifier, in the `Unloaded` state.
    /// * `Err(PredictError)` - If the configuration is invalid or no labels
    ///   were given.
    pub fn new(config: CropConfig, labels: Vec<String>) -> Result<Self, PredictError> {
        config.validate()?;
        if labels.is_empty() {
            return Err(PredictError::config("classifier needs at least one label"));
        }
        Ok(Self {
            state: ModelState::Unloaded,
            config,
            labels: labels.into_iter().map(Arc::from).collect(),
        })
    }

    /// Number of classes this classifier scores.
    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// The class labels in class order.
    pub fn labels(&self) -> &[Arc<str>] {
        &self.labels
    }

    /// The crop-and-resize configuration.
    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Current state of the model lifecycle gate.
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Returns true if the model is loaded and predictions can run.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Loads the ONNX model, driving the gate `Unloaded → Loading → Ready`.
    ///
    /// A failed load returns the gate to `Unloaded`.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the ONNX model file.
    pub fn load_model(&mut self, model_path: impl AsRef<Path>) -> Result<(), PredictError> {
        self.state = ModelState::Loading;
        match OrtDigitModel::load(model_path, self.labels.len()) {
            Ok(model) => {
                self.state = ModelState::Ready(Box::new(model));
                debug!(classes = self.labels.len(), "model ready");
                Ok(())
            }
            Err(e) => {
                self.state = ModelState::Unloaded;
                Err(e)
            }
        }
    }

    /// Installs an already-loaded model, moving the gate straight to `Ready`.
    ///
    /// Used to swap in a different inference engine behind the same pipeline.
    pub fn set_model(&mut self, model: Box<dyn DigitModel>) {
        self.state = ModelState::Ready(model);
    }

    /// Predicts the digit drawn on a canvas surface.
    ///
    /// # Arguments
    ///
    /// * `surface` - The drawn canvas.
    ///
    /// # Returns
    ///
    /// * `Ok(DigitPrediction)` - The winning class and the full score vector.
    /// * `Err(PredictError::ModelNotReady)` - If the model is not loaded.
    /// * `Err(PredictError::EmptyCanvas)` - If the canvas holds no ink.
    /// * `Err(PredictError)` - If preprocessing or inference fails.
    pub fn predict(&self, surface: &CanvasSurface) -> Result<DigitPrediction, PredictError> {
        let size = surface.size() as usize;
        let grid = extract_intensity(&surface.to_rgba_buffer(), size, size)?;
        self.predict_grid(&grid)
    }

    /// Predicts the digit from an already-extracted intensity grid.
    pub fn predict_grid(&self, grid: &Tensor2D) -> Result<DigitPrediction, PredictError> {
        let model = self.state.model()?;

        let span = tracing::span!(tracing::Level::DEBUG, "predict", grid = ?grid.dim());
        let _guard = span.enter();

        let input = prepare_model_input(grid, &self.config)?;
        let scores = model.predict(&input)?;

        if scores.len() != self.labels.len() {
            return Err(PredictError::validation(
                "DigitClassifier",
                "score vector length",
                &self.labels.len().to_string(),
                &scores.len().to_string(),
            ));
        }

        let (best_class, confidence) = argmax_first(&scores);
        debug!(best_class, confidence, "prediction complete");

        Ok(DigitPrediction {
            label: self.labels[best_class].clone(),
            best_class,
            confidence,
            scores,
        })
    }
}

/// First-occurrence argmax over a non-empty score slice.
fn argmax_first(scores: &[f32]) -> (usize, f32) {
    let mut best_idx = 0;
    let mut best = scores[0];
    for (idx, &score) in scores.iter().enumerate().skip(1) {
        if score > best {
            best = score;
            best_idx = idx;
        }
    }
    (best_idx, best)
}

/// Builder for the digit classifier.
pub struct DigitClassifierBuilder {
    config: CropConfig,
    labels: Vec<String>,
}

impl DigitClassifierBuilder {
    /// Creates a builder with the default crop configuration and Khmer labels.
    pub fn new() -> Self {
        Self {
            config: CropConfig::default(),
            labels: khmer_digit_labels(),
        }
    }

    /// Sets the ink threshold on the canonical [0, 1] scale.
    pub fn ink_threshold(mut self, threshold: f32) -> Self {
        self.config.ink_threshold = threshold;
        self
    }

    /// Sets the margin added around the detected ink box.
    pub fn padding(mut self, padding: usize) -> Self {
        self.config.padding = padding;
        self
    }

    /// Sets the side length of the model input grid.
    pub fn target_size(mut self, target_size: usize) -> Self {
        self.config.target_size = target_size;
        self
    }

    /// Replaces the class labels.
    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Builds the classifier and loads the ONNX model from `model_path`.
    pub fn build(self, model_path: &Path) -> Result<DigitClassifier, PredictError> {
        let mut classifier = DigitClassifier::new(self.config, self.labels)?;
        classifier.load_model(model_path)?;
        Ok(classifier)
    }

    /// Builds the classifier in the `Unloaded` state, without touching a model
    /// file. A model can be installed later via `load_model` or `set_model`.
    pub fn build_unloaded(self) -> Result<DigitClassifier, PredictError> {
        DigitClassifier::new(self.config, self.labels)
    }
}

impl Default for DigitClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tensor4D;

    /// Model stub returning a fixed score vector.
    #[derive(Debug)]
    struct ScriptedModel {
        scores: Vec<f32>,
    }

    impl DigitModel for ScriptedModel {
        fn num_classes(&self) -> usize {
            self.scores.len()
        }

        fn predict(&self, input: &Tensor4D) -> Result<Vec<f32>, PredictError> {
            assert_eq!(input.shape(), &[1, 28, 28, 1]);
            Ok(self.scores.clone())
        }
    }

    fn classifier_with_scores(scores: Vec<f32>) -> DigitClassifier {
        let mut classifier =
            DigitClassifier::new(CropConfig::default(), khmer_digit_labels()).unwrap();
        classifier.set_model(Box::new(ScriptedModel { scores }));
        classifier
    }

    fn grid_with_ink() -> Tensor2D {
        let mut grid = Tensor2D::from_elem((100, 100), 1.0);
        for row in 40..60 {
            for col in 40..60 {
                grid[[row, col]] = 0.0;
            }
        }
        grid
    }

    #[test]
    fn test_predict_before_load_is_model_not_ready() {
        let classifier =
            DigitClassifier::new(CropConfig::default(), khmer_digit_labels()).unwrap();
        assert!(!classifier.is_ready());
        let result = classifier.predict_grid(&grid_with_ink());
        assert!(matches!(result, Err(PredictError::ModelNotReady)));
    }

    #[test]
    fn test_predict_selects_argmax() {
        let classifier = classifier_with_scores(vec![
            0.1, 0.05, 0.7, 0.02, 0.01, 0.03, 0.02, 0.03, 0.02, 0.02,
        ]);
        let prediction = classifier.predict_grid(&grid_with_ink()).unwrap();
        assert_eq!(prediction.best_class, 2);
        assert_eq!(prediction.confidence_percent(), 70);
        assert_eq!(&*prediction.label, "២");
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let classifier = classifier_with_scores(vec![
            0.05, 0.4, 0.05, 0.4, 0.02, 0.02, 0.02, 0.02, 0.01, 0.01,
        ]);
        let prediction = classifier.predict_grid(&grid_with_ink()).unwrap();
        assert_eq!(prediction.best_class, 1);
    }

    #[test]
    fn test_blank_grid_is_empty_canvas() {
        let classifier = classifier_with_scores(vec![0.1; 10]);
        let grid = Tensor2D::from_elem((100, 100), 1.0);
        assert!(matches!(
            classifier.predict_grid(&grid),
            Err(PredictError::EmptyCanvas)
        ));
    }

    #[test]
    fn test_score_length_mismatch_is_invalid_input() {
        let classifier = classifier_with_scores(vec![0.5, 0.5]);
        let result = classifier.predict_grid(&grid_with_ink());
        assert!(matches!(result, Err(PredictError::InvalidInput { .. })));
    }

    #[test]
    fn test_builder_validates_config() {
        let result = DigitClassifierBuilder::new().ink_threshold(2.0).build_unloaded();
        assert!(result.is_err());
    }

    #[test]
    fn test_predict_from_surface() {
        use crate::canvas::{CanvasSurface, StrokeStyle};

        let classifier = classifier_with_scores(vec![
            0.0, 0.0, 0.0, 0.0, 0.0, 0.9, 0.1, 0.0, 0.0, 0.0,
        ]);
        let mut surface = CanvasSurface::new(280);
        surface.stroke_segment((100.0, 60.0), (140.0, 200.0), StrokeStyle::default());

        let prediction = classifier.predict(&surface).unwrap();
        assert_eq!(prediction.best_class, 5);
        assert_eq!(&*prediction.label, "៥");
    }

    #[test]
    fn test_argmax_first() {
        assert_eq!(argmax_first(&[0.3]), (0, 0.3));
        assert_eq!(argmax_first(&[0.1, 0.9, 0.9]), (1, 0.9));
        assert_eq!(argmax_first(&[0.9, 0.1, 0.9]), (0, 0.9));
    }
}
