use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single typed cell of the input dataset, after schema inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Null,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
}

impl CellValue {
    /// String form used both for text coercion and for CSV output.
    /// Nulls have no text form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Double(v) => write!(f, "{}", format_double(*v)),
            CellValue::Boolean(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Double(value)
    }
}

/// Render a double in shortest round-trip form, keeping a `.0` on integral values
pub fn format_double(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// An input row: the `content` cell plus every other column, keyed by name.
/// Passthrough columns are never inspected by enrichment, only forwarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub fields: HashMap<String, CellValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record holding only a `content` cell
    pub fn with_content(content: impl Into<CellValue>) -> Self {
        let mut record = Self::new();
        record.set(crate::constants::CONTENT_COLUMN, content.into());
        record
    }

    pub fn set(&mut self, column: &str, value: CellValue) {
        self.fields.insert(column.to_string(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    /// The `content` cell, if the column exists
    pub fn content(&self) -> Option<&CellValue> {
        self.get(crate::constants::CONTENT_COLUMN)
    }
}

/// Polarity in [-1.0, 1.0] and subjectivity in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl SentimentResult {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }

    /// The indeterminate prior used for unscored text
    pub fn fallback() -> Self {
        Self {
            polarity: crate::constants::DEFAULT_POLARITY,
            subjectivity: crate::constants::DEFAULT_SUBJECTIVITY,
        }
    }
}

/// Categorical sentiment derived from polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw record plus its computed sentiment columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// The original row, forwarded untouched
    pub raw: RawRecord,
    pub cleaned_content: String,
    /// Length of `cleaned_content` in characters
    pub content_length: usize,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub subjectivity: f64,
}

/// A delimited-text table: header names plus rows of raw cell strings.
/// Rows may be shorter than the header; missing cells are treated as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
