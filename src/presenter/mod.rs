//! Rendering prediction vectors into a result display.
//!
//! The original display is a DOM table with one pre-existing row per class,
//! a headline element showing the best guess, and a confidence element. The
//! presenter only needs a narrow surface over that: write text into indexed
//! cells, set the headline, set the confidence line. [`ResultSink`] is that
//! surface and [`TableSink`] an in-memory implementation for native use and
//! tests.

use crate::core::PredictError;
use std::sync::Arc;

/// Placeholder shown in the confidence line when no prediction is displayed.
const EMPTY_CONFIDENCE: &str = "—";

/// The display surface the presenter writes into.
pub trait ResultSink {
    /// Number of per-class rows the display has.
    fn rows(&self) -> usize;

    /// Writes the percentage text for one class row.
    fn set_cell(&mut self, row: usize, text: &str);

    /// Writes the headline "best guess" text.
    fn set_headline(&mut self, text: &str);

    /// Writes the confidence line.
    fn set_confidence(&mut self, text: &str);
}

/// In-memory result display with exactly ten class rows.
#[derive(Debug, Clone)]
pub struct TableSink {
    cells: Vec<String>,
    headline: String,
    confidence: String,
}

impl TableSink {
    /// Creates a sink with ten empty rows.
    pub fn new() -> Self {
        Self::with_rows(10)
    }

    /// Creates a sink with the given number of rows.
    pub fn with_rows(rows: usize) -> Self {
        Self {
            cells: vec![String::new(); rows],
            headline: String::new(),
            confidence: EMPTY_CONFIDENCE.to_string(),
        }
    }

    /// The percentage text currently shown for a row.
    pub fn cell(&self, row: usize) -> &str {
        &self.cells[row]
    }

    /// The current headline text.
    pub fn headline(&self) -> &str {
        &self.headline
    }

    /// The current confidence text.
    pub fn confidence(&self) -> &str {
        &self.confidence
    }
}

impl Default for TableSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for TableSink {
    fn rows(&self) -> usize {
        self.cells.len()
    }

    fn set_cell(&mut self, row: usize, text: &str) {
        self.cells[row] = text.to_string();
    }

    fn set_headline(&mut self, text: &str) {
        self.headline = text.to_string();
    }

    fn set_confidence(&mut self, text: &str) {
        self.confidence = text.to_string();
    }
}

/// Renders prediction vectors into a [`ResultSink`].
#[derive(Debug, Clone)]
pub struct ResultPresenter {
    labels: Vec<Arc<str>>,
}

impl ResultPresenter {
    /// Creates a presenter with the given class labels in class order.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels: labels.into_iter().map(Arc::from).collect(),
        }
    }

    /// Creates a presenter from already-shared labels.
    pub fn from_shared(labels: &[Arc<str>]) -> Self {
        Self {
            labels: labels.to_vec(),
        }
    }

    /// Renders a prediction vector: one rounded percentage per row, plus the
    /// headline label and confidence line for the winning class.
    ///
    /// Ties resolve to the lowest class index (first-max semantics).
    ///
    /// # Arguments
    ///
    /// * `scores` - Class scores; length must match the sink's row count and
    ///   the label count.
    /// * `sink` - The display to write into.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The display was updated.
    /// * `Err(PredictError)` - If the vector length does not match.
    pub fn render(&self, scores: &[f32], sink: &mut impl ResultSink) -> Result<(), PredictError> {
        if scores.len() != sink.rows() {
            return Err(PredictError::validation(
                "ResultPresenter",
                "score vector length",
                &sink.rows().to_string(),
                &scores.len().to_string(),
            ));
        }
        if scores.len() != self.labels.len() {
            return Err(PredictError::validation(
                "ResultPresenter",
                "label count",
                &scores.len().to_string(),
                &self.labels.len().to_string(),
            ));
        }

        let mut best_idx = 0;
        let mut best = scores[0];
        for (idx, &score) in scores.iter().enumerate() {
            sink.set_cell(idx, &format!("{}%", percent(score)));
            if score > best {
                best = score;
                best_idx = idx;
            }
        }

        sink.set_headline(&self.labels[best_idx]);
        sink.set_confidence(&format!("{}% confidence", percent(best)));
        Ok(())
    }

    /// Clears the headline and confidence line, as the erase action does.
    /// Per-class rows are left untouched.
    pub fn clear(&self, sink: &mut impl ResultSink) {
        sink.set_headline("");
        sink.set_confidence(EMPTY_CONFIDENCE);
    }
}

/// Rounds a [0, 1] score to a whole percentage.
fn percent(score: f32) -> u32 {
    (score * 100.0).round() as u32
}
