use std::path::Path;
use std::sync::Arc;

use crate::error::ScoringError;
use crate::types::SentimentResult;

use super::lexicon::Lexicon;
use super::tokenizer::{tokenize, IRONY_MARKER};

/// A text sentiment primitive.
///
/// Implementations must be stateless per call so a single instance can be
/// shared by every worker.
pub trait SentimentAnalyzer: Send + Sync {
    /// Short identifier used in diagnostics
    fn name(&self) -> &'static str;

    /// Score already-normalized text
    fn analyze(&self, text: &str) -> Result<SentimentResult, ScoringError>;
}

const NEGATIONS: &[&str] = &["no", "not", "n't", "never"];
const EXCLAMATION_BOOST: f64 = 1.25;
const NEGATION_FACTOR: f64 = -0.5;

/// One scored span of text (a word, optionally with its modifier)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Assessment {
    polarity: f64,
    subjectivity: f64,
    intensity: f64,
    negated: bool,
}

impl Assessment {
    fn new(polarity: f64, subjectivity: f64, intensity: f64) -> Self {
        Self {
            polarity,
            subjectivity,
            intensity,
            negated: false,
        }
    }
}

/// Lexicon-driven analyzer with modifier, negation, exclamation and emoticon handling
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    lexicon: Result<Arc<Lexicon>, ScoringError>,
}

impl LexiconAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon: Ok(lexicon) }
    }

    /// Analyzer over the lexicon shipped with the crate
    pub fn bundled() -> Self {
        Self {
            lexicon: Lexicon::bundled(),
        }
    }

    /// Analyzer over a lexicon file on disk
    pub fn from_path(path: &Path) -> Result<Self, ScoringError> {
        Ok(Self::new(Arc::new(Lexicon::from_path(path)?)))
    }

    fn assess(&self, lexicon: &Lexicon, text: &str) -> Vec<Assessment> {
        let mut assessments: Vec<Assessment> = Vec::new();
        let mut pending_modifier = false;
        let mut pending_negation = false;

        for token in tokenize(text, lexicon) {
            let token = token.as_str();

            if let Some(entry) = lexicon.word(token) {
                if pending_modifier {
                    if let Some(last) = assessments.last_mut() {
                        last.polarity = (entry.polarity * last.intensity).clamp(-1.0, 1.0);
                        last.subjectivity = (entry.subjectivity * last.intensity).clamp(0.0, 1.0);
                        last.intensity = entry.intensity;
                    }
                } else {
                    assessments.push(Assessment::new(
                        entry.polarity,
                        entry.subjectivity,
                        entry.intensity,
                    ));
                }

                if pending_negation {
                    if let Some(last) = assessments.last_mut() {
                        last.intensity = 1.0 / last.intensity;
                        last.negated = true;
                    }
                }

                pending_modifier = entry.modifier;
                pending_negation = NEGATIONS.contains(&token);
                continue;
            }

            // Unknown token
            if NEGATIONS.contains(&token) {
                pending_negation = true;
            } else if pending_negation && token.trim_matches('\'').chars().count() > 1 {
                pending_negation = false;
            }
            if pending_modifier && token.chars().count() > 2 {
                pending_modifier = false;
            }

            if token == "!" {
                if let Some(last) = assessments.last_mut() {
                    last.polarity = (last.polarity * EXCLAMATION_BOOST).clamp(-1.0, 1.0);
                }
            } else if token == IRONY_MARKER {
                assessments.push(Assessment::new(0.0, 1.0, 1.0));
            } else if let Some(polarity) = lexicon.emoticon(token) {
                assessments.push(Assessment::new(polarity, 1.0, 1.0));
            }
        }

        for assessment in &mut assessments {
            if assessment.negated {
                assessment.polarity *= NEGATION_FACTOR;
            }
        }

        assessments
    }
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::bundled()
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn analyze(&self, text: &str) -> Result<SentimentResult, ScoringError> {
        let lexicon = self.lexicon.as_ref().map_err(Clone::clone)?;
        let assessments = self.assess(lexicon, text);

        if assessments.is_empty() {
            return Ok(SentimentResult::new(0.0, 0.0));
        }

        let count = assessments.len() as f64;
        let polarity = assessments.iter().map(|a| a.polarity).sum::<f64>() / count;
        let subjectivity = assessments.iter().map(|a| a.subjectivity).sum::<f64>() / count;

        if !polarity.is_finite() {
            return Err(ScoringError::NonFinite { field: "polarity" });
        }
        if !subjectivity.is_finite() {
            return Err(ScoringError::NonFinite {
                field: "subjectivity",
            });
        }

        Ok(SentimentResult::new(polarity, subjectivity))
    }
}
