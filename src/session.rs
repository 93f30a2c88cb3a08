//! The drawing session tying canvas, classifier, and display together.
//!
//! One session owns the whole interaction: pointer events mutate the canvas
//! through the stroke state machine, a stroke release runs a prediction, and
//! the presenter writes the outcome into the result sink. The two recoverable
//! conditions, no ink on the canvas and a model that has not finished loading,
//! clear the display and leave the session usable.

use crate::canvas::{CanvasSurface, StrokeState, StrokeStyle};
use crate::core::PredictError;
use crate::predictor::{DigitClassifier, DigitPrediction};
use crate::presenter::{ResultPresenter, ResultSink};
use tracing::{debug, warn};

/// A single-user drawing session.
///
/// Everything is serialized through discrete pointer events on one thread:
/// the canvas is written by stroke capture and read by the extractor, never
/// concurrently.
pub struct DrawSession<S: ResultSink> {
    canvas: CanvasSurface,
    classifier: DigitClassifier,
    presenter: ResultPresenter,
    sink: S,
    stroke: StrokeState,
    style: StrokeStyle,
}

impl<S: ResultSink> DrawSession<S> {
    /// Creates a session with a blank canvas of `size` × `size` pixels.
    ///
    /// The presenter takes its labels from the classifier, so headline and
    /// table rows always agree with the class order the model scores.
    pub fn new(size: u32, classifier: DigitClassifier, sink: S) -> Self {
        let presenter = ResultPresenter::from_shared(classifier.labels());
        Self {
            canvas: CanvasSurface::new(size),
            classifier,
            presenter,
            sink,
            stroke: StrokeState::Idle,
            style: StrokeStyle::default(),
        }
    }

    /// Overrides the stroke style.
    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Begins a stroke at the given canvas coordinates.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.stroke = StrokeState::Drawing { last_x: x, last_y: y };
        self.canvas.stroke_dot((x, y), self.style);
    }

    /// Extends the current stroke. Ignored while no stroke is in progress.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let StrokeState::Drawing { last_x, last_y } = self.stroke {
            self.canvas.stroke_segment((last_x, last_y), (x, y), self.style);
            self.stroke = StrokeState::Drawing { last_x: x, last_y: y };
        }
    }

    /// Ends the current stroke and runs a prediction on the drawn canvas.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(prediction))` - A prediction was made and rendered.
    /// * `Ok(None)` - No stroke was in progress, or a recoverable condition
    ///   (blank canvas, model not ready) cleared the display; the user can
    ///   keep drawing.
    /// * `Err(PredictError)` - Preprocessing or inference failed.
    pub fn pointer_up(&mut self) -> Result<Option<DigitPrediction>, PredictError> {
        if !self.stroke.is_drawing() {
            return Ok(None);
        }
        self.stroke = StrokeState::Idle;

        match self.classifier.predict(&self.canvas) {
            Ok(prediction) => {
                self.presenter.render(&prediction.scores, &mut self.sink)?;
                debug!(
                    best_class = prediction.best_class,
                    confidence = prediction.confidence,
                    "rendered prediction"
                );
                Ok(Some(prediction))
            }
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "prediction skipped");
                self.presenter.clear(&mut self.sink);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Clears the canvas and the result display.
    pub fn erase(&mut self) {
        self.canvas.clear();
        self.presenter.clear(&mut self.sink);
        self.stroke = StrokeState::Idle;
    }

    /// The drawing surface.
    pub fn canvas(&self) -> &CanvasSurface {
        &self.canvas
    }

    /// The classifier, for loading or swapping the model.
    pub fn classifier_mut(&mut self) -> &mut DigitClassifier {
        &mut self.classifier
    }

    /// The result display.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Current stroke capture state.
    pub fn stroke_state(&self) -> StrokeState {
        self.stroke
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DigitModel, PredictError, Tensor4D};
    use crate::predictor::DigitClassifierBuilder;
    use crate::presenter::TableSink;

    #[derive(Debug)]
    struct ScriptedModel {
        scores: Vec<f32>,
    }

    impl DigitModel for ScriptedModel {
        fn num_classes(&self) -> usize {
            self.scores.len()
        }

        fn predict(&self, _input: &Tensor4D) -> Result<Vec<f32>, PredictError> {
            Ok(self.scores.clone())
        }
    }

    fn session_with_scores(scores: Vec<f32>) -> DrawSession<TableSink> {
        let mut classifier = DigitClassifierBuilder::new().build_unloaded().unwrap();
        classifier.set_model(Box::new(ScriptedModel { scores }));
        DrawSession::new(280, classifier, TableSink::new())
    }

    #[test]
    fn test_draw_and_predict_updates_display() {
        let mut session = session_with_scores(vec![
            0.1, 0.05, 0.7, 0.02, 0.01, 0.03, 0.02, 0.03, 0.02, 0.02,
        ]);
        session.pointer_down(100.0, 60.0);
        session.pointer_move(120.0, 180.0);
        session.pointer_move(150.0, 220.0);
        let prediction = session.pointer_up().unwrap().unwrap();

        assert_eq!(prediction.best_class, 2);
        assert_eq!(session.sink().headline(), "២");
        assert_eq!(session.sink().confidence(), "70% confidence");
        assert_eq!(session.sink().cell(2), "70%");
    }

    #[test]
    fn test_moves_while_idle_do_not_draw() {
        let mut session = session_with_scores(vec![0.1; 10]);
        session.pointer_move(100.0, 100.0);
        session.pointer_move(150.0, 150.0);
        assert!(session.canvas().is_blank());
        assert_eq!(session.stroke_state(), StrokeState::Idle);
    }

    #[test]
    fn test_release_without_stroke_is_noop() {
        let mut session = session_with_scores(vec![0.1; 10]);
        assert!(session.pointer_up().unwrap().is_none());
    }

    #[test]
    fn test_model_not_ready_clears_display_and_recovers() {
        let classifier = DigitClassifierBuilder::new().build_unloaded().unwrap();
        let mut session = DrawSession::new(280, classifier, TableSink::new());

        session.pointer_down(100.0, 100.0);
        session.pointer_move(150.0, 150.0);
        let outcome = session.pointer_up().unwrap();

        assert!(outcome.is_none());
        assert_eq!(session.sink().headline(), "");
        assert_eq!(session.sink().confidence(), "—");
        // Session stays usable.
        session.pointer_down(50.0, 50.0);
        assert!(session.stroke_state().is_drawing());
    }

    #[test]
    fn test_erase_clears_canvas_and_display() {
        let mut session = session_with_scores(vec![
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ]);
        session.pointer_down(100.0, 100.0);
        session.pointer_move(180.0, 180.0);
        session.pointer_up().unwrap();
        assert_eq!(session.sink().headline(), "៩");

        session.erase();
        assert!(session.canvas().is_blank());
        assert_eq!(session.sink().headline(), "");
        assert_eq!(session.sink().confidence(), "—");
    }
}
