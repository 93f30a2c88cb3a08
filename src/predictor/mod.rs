//! The digit classifier wiring preprocessing to the loaded model.

mod digit_classifier;

pub use digit_classifier::{DigitClassifier, DigitClassifierBuilder, DigitPrediction};

/// Returns the Khmer digit labels in class order (០ through ៩).
pub fn khmer_digit_labels() -> Vec<String> {
    ["០", "១", "២", "៣", "៤", "៥", "៦", "៧", "៨", "៩"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
