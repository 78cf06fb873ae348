//! Scoring and labelling constants.
//! These define the acceptance boundaries of the pipeline and are never read from config.

// Label thresholds (strict comparisons; exactly +/-0.1 is neutral)
pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Records whose cleaned content is shorter than this are dropped, and
/// texts shorter than this are not scored.
pub const MIN_CONTENT_LENGTH: usize = 5;

// Scores used when text is absent, too short, or the analyzer fails
pub const DEFAULT_POLARITY: f64 = 0.0;
pub const DEFAULT_SUBJECTIVITY: f64 = 0.5;

// Column names
pub const CONTENT_COLUMN: &str = "content";
pub const CLEANED_CONTENT_COLUMN: &str = "cleaned_content";
pub const SENTIMENT_SCORE_COLUMN: &str = "sentiment_score";
pub const SENTIMENT_LABEL_COLUMN: &str = "sentiment_label";
pub const SUBJECTIVITY_COLUMN: &str = "subjectivity";
pub const CONTENT_LENGTH_COLUMN: &str = "content_length";

/// Output column order. Passthrough columns are emitted only when present in the input.
pub const OUTPUT_COLUMNS: [&str; 13] = [
    "author",
    CONTENT_COLUMN,
    CLEANED_CONTENT_COLUMN,
    SENTIMENT_SCORE_COLUMN,
    SENTIMENT_LABEL_COLUMN,
    SUBJECTIVITY_COLUMN,
    CONTENT_LENGTH_COLUMN,
    "date_time",
    "language",
    "country",
    "number_of_likes",
    "number_of_shares",
    "id",
];

/// Columns produced by enrichment rather than read from the input
pub fn is_computed_column(name: &str) -> bool {
    matches!(
        name,
        CLEANED_CONTENT_COLUMN
            | SENTIMENT_SCORE_COLUMN
            | SENTIMENT_LABEL_COLUMN
            | SUBJECTIVITY_COLUMN
            | CONTENT_LENGTH_COLUMN
    )
}

// Output layout
pub const OUTPUT_PARTITION_FILE: &str = "part-00000.csv";
pub const SUCCESS_MARKER: &str = "_SUCCESS";
