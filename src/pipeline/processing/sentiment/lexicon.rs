//! Sentiment lexicon backing the lexical analyzer.
//!
//! Maps lowercase words to polarity/subjectivity/intensity and emoticons to a
//! polarity. The bundled lexicon is embedded at compile time and parsed once.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ScoringError;

const BUNDLED_LEXICON: &str = include_str!("../../../../data/lexicon.toml");

static BUNDLED: Lazy<Result<Arc<Lexicon>, ScoringError>> =
    Lazy::new(|| Lexicon::from_toml_str(BUNDLED_LEXICON).map(Arc::new));

fn unit_intensity() -> f64 {
    1.0
}

/// Scores attached to one lexicon word
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
    /// Multiplier applied to the next known word when this entry is a modifier
    #[serde(default = "unit_intensity")]
    pub intensity: f64,
    /// Intensifying adverb ("very", "really")
    #[serde(default)]
    pub modifier: bool,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    words: HashMap<String, LexiconEntry>,
    #[serde(default)]
    emoticons: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashMap<String, LexiconEntry>,
    emoticons: HashMap<String, f64>,
}

impl Lexicon {
    /// Parse and validate a lexicon in TOML form
    pub fn from_toml_str(source: &str) -> Result<Self, ScoringError> {
        let file: LexiconFile =
            toml::from_str(source).map_err(|e| ScoringError::Lexicon(e.to_string()))?;

        let mut lexicon = Lexicon::default();
        for (word, entry) in file.words {
            validate_entry(&word, &entry)?;
            lexicon.words.insert(word.to_lowercase(), entry);
        }
        for (emoticon, polarity) in file.emoticons {
            if !(-1.0..=1.0).contains(&polarity) {
                return Err(ScoringError::Lexicon(format!(
                    "emoticon '{}' has polarity {} outside [-1, 1]",
                    emoticon, polarity
                )));
            }
            lexicon.emoticons.insert(emoticon.to_lowercase(), polarity);
        }

        Ok(lexicon)
    }

    /// Load a lexicon from a TOML file on disk
    pub fn from_path(path: &Path) -> Result<Self, ScoringError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            ScoringError::Lexicon(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// The lexicon shipped with the crate, shared process-wide
    pub fn bundled() -> Result<Arc<Lexicon>, ScoringError> {
        BUNDLED.clone()
    }

    pub fn word(&self, word: &str) -> Option<&LexiconEntry> {
        self.words.get(word)
    }

    pub fn emoticon(&self, token: &str) -> Option<f64> {
        self.emoticons.get(token).copied()
    }

    pub fn is_emoticon(&self, token: &str) -> bool {
        self.emoticons.contains_key(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn validate_entry(word: &str, entry: &LexiconEntry) -> Result<(), ScoringError> {
    let in_range = (-1.0..=1.0).contains(&entry.polarity)
        && (0.0..=1.0).contains(&entry.subjectivity)
        && entry.intensity.is_finite()
        && entry.intensity > 0.0;
    if in_range {
        Ok(())
    } else {
        Err(ScoringError::Lexicon(format!(
            "word '{}' has out-of-range scores {:?}",
            word, entry
        )))
    }
}
