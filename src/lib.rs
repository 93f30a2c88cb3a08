//! # inkdigit
//!
//! A Rust library for recognizing hand-drawn Khmer digits (០–៩) with ONNX models.
//!
//! A caller feeds pointer events into a [`session::DrawSession`]; on stroke
//! release the session reads the drawn raster back, isolates the drawn region
//! (bounding-box crop plus nearest-neighbor resize to a fixed 28×28 grid), hands
//! the resulting tensor to a pre-trained classifier, and renders the probability
//! vector into a ten-row result table plus a headline "best guess" display.
//!
//! ## Modules
//!
//! * [`core`] - Error handling, tensor aliases, and the model capability trait
//! * [`canvas`] - The drawing surface and stroke capture state machine
//! * [`processors`] - The preprocessing pipeline (extract, crop, resize)
//! * [`predictor`] - The digit classifier wiring preprocessing to the model
//! * [`presenter`] - Rendering prediction vectors into a result display
//! * [`session`] - The drawing session tying all of the above together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inkdigit::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = DigitClassifierBuilder::new()
//!     .padding(15)
//!     .build(Path::new("model/khmer_digits.onnx"))?;
//!
//! let mut session = DrawSession::new(280, classifier, TableSink::new());
//! session.pointer_down(100.0, 60.0);
//! session.pointer_move(120.0, 180.0);
//! if let Some(prediction) = session.pointer_up()? {
//!     println!("{} ({}%)", prediction.label, prediction.confidence_percent());
//! }
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod core;
pub mod predictor;
pub mod presenter;
pub mod processors;
pub mod session;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::canvas::{CanvasSurface, StrokeState, StrokeStyle};
    pub use crate::core::{
        DigitModel, ModelState, OrtDigitModel, PredictError, Tensor2D, Tensor4D,
    };
    pub use crate::predictor::{
        khmer_digit_labels, DigitClassifier, DigitClassifierBuilder, DigitPrediction,
    };
    pub use crate::presenter::{ResultPresenter, ResultSink, TableSink};
    pub use crate::processors::{extract_intensity, CropConfig, InkBounds};
    pub use crate::session::DrawSession;
}

pub use crate::core::PredictError;

/// Initializes the tracing subscriber for logging.
///
/// Sets up the subscriber with an environment filter and formatting layer.
/// Typically called once at application start.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
