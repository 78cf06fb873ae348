use crate::constants::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
use crate::types::SentimentLabel;

/// Map a polarity score to a label.
///
/// `> 0.1` is positive, `< -0.1` is negative, anything else (the boundaries
/// included) is neutral.
pub fn classify(score: f64) -> SentimentLabel {
    if score > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}
