//! End-to-end pipeline tests against a scripted model.

use inkdigit::prelude::*;
use std::sync::{Arc, Mutex};

/// Model stub that returns fixed scores and records every input it sees.
#[derive(Debug)]
struct RecordingModel {
    scores: Vec<f32>,
    inputs: Arc<Mutex<Vec<Tensor4D>>>,
}

impl DigitModel for RecordingModel {
    fn num_classes(&self) -> usize {
        self.scores.len()
    }

    fn predict(&self, input: &Tensor4D) -> Result<Vec<f32>, PredictError> {
        self.inputs.lock().unwrap().push(input.clone());
        Ok(self.scores.clone())
    }
}

fn session_with(
    scores: Vec<f32>,
) -> (DrawSession<TableSink>, Arc<Mutex<Vec<Tensor4D>>>) {
    let inputs = Arc::new(Mutex::new(Vec::new()));
    let mut classifier = DigitClassifierBuilder::new().build_unloaded().unwrap();
    classifier.set_model(Box::new(RecordingModel {
        scores,
        inputs: Arc::clone(&inputs),
    }));
    (DrawSession::new(280, classifier, TableSink::new()), inputs)
}

#[test]
fn full_stroke_to_display_flow() {
    let (mut session, inputs) = session_with(vec![
        0.1, 0.05, 0.7, 0.02, 0.01, 0.03, 0.02, 0.03, 0.02, 0.02,
    ]);

    session.pointer_down(90.0, 50.0);
    for step in 1..=20 {
        session.pointer_move(90.0 + step as f32 * 3.0, 50.0 + step as f32 * 8.0);
    }
    let prediction = session.pointer_up().unwrap().expect("prediction");

    assert_eq!(prediction.best_class, 2);
    assert_eq!(prediction.confidence_percent(), 70);
    assert_eq!(session.sink().headline(), "២");
    assert_eq!(session.sink().cell(2), "70%");
    assert_eq!(session.sink().cell(1), "5%");

    let inputs = inputs.lock().unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].shape(), &[1, 28, 28, 1]);
    // The model saw real ink, not a blank tensor.
    assert!(inputs[0].iter().any(|&v| v < 0.5));
}

#[test]
fn crop_makes_prediction_position_invariant() {
    // The same shape drawn in two corners reaches the model as the same
    // tensor: the bounding-box crop removes the position.
    let (mut first, first_inputs) = session_with(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    first.pointer_down(40.0, 40.0);
    first.pointer_move(40.0, 100.0);
    first.pointer_up().unwrap();

    let (mut second, second_inputs) = session_with(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    second.pointer_down(180.0, 150.0);
    second.pointer_move(180.0, 210.0);
    second.pointer_up().unwrap();

    let a = first_inputs.lock().unwrap();
    let b = second_inputs.lock().unwrap();
    assert_eq!(a[0], b[0]);
}

#[test]
fn erase_then_release_makes_no_prediction() {
    let (mut session, inputs) = session_with(vec![0.1; 10]);

    session.pointer_down(100.0, 100.0);
    session.pointer_move(150.0, 150.0);
    session.erase();

    // The canvas is blank again; a release after erase runs no prediction.
    assert!(session.pointer_up().unwrap().is_none());
    assert!(inputs.lock().unwrap().is_empty());
}

#[test]
fn blank_canvas_release_clears_display() {
    let (mut session, inputs) = session_with(vec![0.1; 10]);

    // Stroke entirely outside the canvas leaves it blank.
    session.pointer_down(-50.0, -50.0);
    session.pointer_move(-20.0, -40.0);
    let outcome = session.pointer_up().unwrap();

    assert!(outcome.is_none());
    assert!(inputs.lock().unwrap().is_empty());
    assert_eq!(session.sink().headline(), "");
    assert_eq!(session.sink().confidence(), "—");
}
