//! Sentiment scoring.
//!
//! [`SentimentScorer`] is the failure boundary around a [`SentimentAnalyzer`]:
//! absent or too-short text gets the default scores without consulting the
//! analyzer, and any analyzer error is logged, counted and collapsed to those
//! same defaults. Nothing past this boundary ever sees a scoring error.

pub mod analyzer;
pub mod lexicon;
pub mod tokenizer;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::constants::{DEFAULT_POLARITY, DEFAULT_SUBJECTIVITY, MIN_CONTENT_LENGTH};
use crate::metrics::enrich::EnrichMetrics;
use crate::pipeline::processing::normalize::{normalize, text_length, RawText};
use crate::types::SentimentResult;

pub use analyzer::{LexiconAnalyzer, SentimentAnalyzer};
pub use lexicon::{Lexicon, LexiconEntry};

static DEFAULT_SCORER: Lazy<SentimentScorer<LexiconAnalyzer>> =
    Lazy::new(|| SentimentScorer::new(LexiconAnalyzer::bundled()));

/// Scorer backed by the bundled lexicon
pub fn default_scorer() -> &'static SentimentScorer<LexiconAnalyzer> {
    &DEFAULT_SCORER
}

/// Polarity of raw content using the bundled lexicon
pub fn score_polarity<T: RawText + ?Sized>(raw: &T) -> f64 {
    default_scorer().score_polarity(raw)
}

/// Subjectivity of raw content using the bundled lexicon
pub fn score_subjectivity<T: RawText + ?Sized>(raw: &T) -> f64 {
    default_scorer().score_subjectivity(raw)
}

#[derive(Debug, Clone)]
pub struct SentimentScorer<A> {
    analyzer: A,
}

impl<A: SentimentAnalyzer> SentimentScorer<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Polarity in [-1, 1]; `0.0` for absent, short or unscorable text
    pub fn score_polarity<T: RawText + ?Sized>(&self, raw: &T) -> f64 {
        self.assess(raw)
            .map(|result| result.polarity)
            .unwrap_or(DEFAULT_POLARITY)
    }

    /// Subjectivity in [0, 1]; `0.5` for absent, short or unscorable text
    pub fn score_subjectivity<T: RawText + ?Sized>(&self, raw: &T) -> f64 {
        self.assess(raw)
            .map(|result| result.subjectivity)
            .unwrap_or(DEFAULT_SUBJECTIVITY)
    }

    /// Both scores from a single analysis. Identical to calling
    /// [`score_polarity`](Self::score_polarity) and
    /// [`score_subjectivity`](Self::score_subjectivity) separately.
    pub fn score<T: RawText + ?Sized>(&self, raw: &T) -> SentimentResult {
        self.assess(raw).unwrap_or_else(SentimentResult::fallback)
    }

    /// `None` means the defaults apply
    fn assess<T: RawText + ?Sized>(&self, raw: &T) -> Option<SentimentResult> {
        let cleaned = normalize(raw);
        if text_length(&cleaned) < MIN_CONTENT_LENGTH {
            return None;
        }

        match self.analyzer.analyze(&cleaned) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(
                    analyzer = self.analyzer.name(),
                    error = %e,
                    "Error in sentiment analysis; using default scores"
                );
                EnrichMetrics::record_scoring_failure(self.analyzer.name());
                None
            }
        }
    }
}
