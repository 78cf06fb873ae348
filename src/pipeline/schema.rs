//! Input schema inference and output column projection.
//!
//! Input cells arrive as strings. Each column is assigned the narrowest type
//! that fits every non-empty cell, and rows are converted to typed
//! [`RawRecord`]s. The output column list is resolved once against the input
//! header into an [`OutputSchema`].

use tracing::{debug, warn};

use crate::constants::{self, OUTPUT_COLUMNS};
use crate::error::{PipelineError, Result};
use crate::types::{CellValue, EnrichedRecord, RawRecord, Table};

/// Inferred column type, ordered from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Double,
    Boolean,
    String,
}

impl ColumnType {
    fn of_cell(cell: &str) -> Self {
        if cell.parse::<i64>().is_ok() {
            ColumnType::Integer
        } else if is_plain_decimal(cell) && cell.parse::<f64>().map_or(false, f64::is_finite) {
            ColumnType::Double
        } else if cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false") {
            ColumnType::Boolean
        } else {
            ColumnType::String
        }
    }

    fn merge(self, other: ColumnType) -> ColumnType {
        use ColumnType::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Integer, Double) | (Double, Integer) => Double,
            _ => String,
        }
    }

    fn convert(self, cell: &str) -> CellValue {
        if cell.is_empty() {
            return CellValue::Null;
        }
        let converted = match self {
            ColumnType::Integer => cell.parse().ok().map(CellValue::Integer),
            ColumnType::Double => cell.parse().ok().map(CellValue::Double),
            ColumnType::Boolean => Some(CellValue::Boolean(cell.eq_ignore_ascii_case("true"))),
            ColumnType::String => None,
        };
        converted.unwrap_or_else(|| CellValue::Text(cell.to_string()))
    }
}

/// Digits, sign, decimal point and exponent only; rejects `inf`, `NaN` and friends
fn is_plain_decimal(cell: &str) -> bool {
    cell.chars().any(|c| c.is_ascii_digit())
        && cell
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSchema {
    pub columns: Vec<Column>,
}

impl InputSchema {
    /// Infer column types from every row of the table
    pub fn infer(table: &Table) -> Self {
        let mut types: Vec<Option<ColumnType>> = vec![None; table.headers.len()];

        for row in &table.rows {
            for (slot, cell) in types.iter_mut().zip(row.iter()) {
                if cell.is_empty() {
                    continue;
                }
                let cell_type = ColumnType::of_cell(cell);
                *slot = Some(slot.map_or(cell_type, |t| t.merge(cell_type)));
            }
        }

        let columns = table
            .headers
            .iter()
            .zip(types)
            .map(|(name, data_type)| Column {
                name: name.clone(),
                // All-empty columns carry no type information
                data_type: data_type.unwrap_or(ColumnType::String),
            })
            .collect();

        Self { columns }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Fail unless the `content` column is present
    pub fn require_content(&self) -> Result<()> {
        if self.has_column(constants::CONTENT_COLUMN) {
            Ok(())
        } else {
            Err(PipelineError::MissingColumn(constants::CONTENT_COLUMN.to_string()))
        }
    }

    /// Convert one row of raw cells into a typed record. Missing trailing
    /// cells become nulls and surplus cells are ignored.
    pub fn to_record(&self, row: &[String]) -> RawRecord {
        let mut record = RawRecord::new();
        for (index, column) in self.columns.iter().enumerate() {
            let value = row
                .get(index)
                .map_or(CellValue::Null, |cell| column.data_type.convert(cell));
            record.set(&column.name, value);
        }
        record
    }
}

/// One column of the output dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputColumn {
    Passthrough(String),
    CleanedContent,
    SentimentScore,
    SentimentLabel,
    Subjectivity,
    ContentLength,
}

impl OutputColumn {
    pub fn name(&self) -> &str {
        match self {
            OutputColumn::Passthrough(name) => name,
            OutputColumn::CleanedContent => constants::CLEANED_CONTENT_COLUMN,
            OutputColumn::SentimentScore => constants::SENTIMENT_SCORE_COLUMN,
            OutputColumn::SentimentLabel => constants::SENTIMENT_LABEL_COLUMN,
            OutputColumn::Subjectivity => constants::SUBJECTIVITY_COLUMN,
            OutputColumn::ContentLength => constants::CONTENT_LENGTH_COLUMN,
        }
    }

    fn render(&self, record: &EnrichedRecord) -> String {
        match self {
            OutputColumn::Passthrough(name) => record
                .raw
                .get(name)
                .and_then(CellValue::as_text)
                .unwrap_or_default(),
            OutputColumn::CleanedContent => record.cleaned_content.clone(),
            OutputColumn::SentimentScore => format_float(record.sentiment_score),
            OutputColumn::SentimentLabel => record.sentiment_label.as_str().to_string(),
            OutputColumn::Subjectivity => format_float(record.subjectivity),
            OutputColumn::ContentLength => record.content_length.to_string(),
        }
    }
}

/// Render a score as a 32-bit float, keeping a `.0` on integral values
pub fn format_float(value: f64) -> String {
    let single = value as f32;
    if single.fract() == 0.0 {
        format!("{:.1}", single)
    } else {
        format!("{}", single)
    }
}

/// The ordered output columns, restricted to what the input provides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    pub columns: Vec<OutputColumn>,
}

impl OutputSchema {
    /// Resolve the fixed output order against the input schema
    pub fn resolve(input: &InputSchema) -> Self {
        for column in &input.columns {
            if constants::is_computed_column(&column.name) {
                warn!(column = %column.name, "Input column is overwritten by the computed value");
            }
        }

        let mut columns = Vec::with_capacity(OUTPUT_COLUMNS.len());

        for name in OUTPUT_COLUMNS {
            let column = match name {
                constants::CLEANED_CONTENT_COLUMN => OutputColumn::CleanedContent,
                constants::SENTIMENT_SCORE_COLUMN => OutputColumn::SentimentScore,
                constants::SENTIMENT_LABEL_COLUMN => OutputColumn::SentimentLabel,
                constants::SUBJECTIVITY_COLUMN => OutputColumn::Subjectivity,
                constants::CONTENT_LENGTH_COLUMN => OutputColumn::ContentLength,
                passthrough if input.has_column(passthrough) => {
                    OutputColumn::Passthrough(passthrough.to_string())
                }
                missing => {
                    debug!(column = missing, "Optional column absent from input; omitted");
                    continue;
                }
            };
            columns.push(column);
        }

        Self { columns }
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn render(&self, record: &EnrichedRecord) -> Vec<String> {
        self.columns.iter().map(|c| c.render(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_infers_column_types() {
        let t = table(
            &["content", "number_of_likes", "ratio", "verified", "mixed", "empty"],
            &[
                &["hello", "10", "1.5", "true", "1", ""],
                &["world", "", "2", "FALSE", "x", ""],
            ],
        );
        let schema = InputSchema::infer(&t);
        let types: Vec<ColumnType> = schema.columns.iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![
                ColumnType::String,
                ColumnType::Integer,
                ColumnType::Double,
                ColumnType::Boolean,
                ColumnType::String,
                ColumnType::String,
            ]
        );
    }

    #[test]
    fn test_special_float_words_stay_text() {
        let t = table(&["content"], &[&["inf"], &["NaN"]]);
        let schema = InputSchema::infer(&t);
        assert_eq!(schema.columns[0].data_type, ColumnType::String);
    }

    #[test]
    fn test_numeric_content_column_is_typed() {
        let t = table(&["content"], &[&["12345"], &["678"]]);
        let schema = InputSchema::infer(&t);
        let record = schema.to_record(&t.rows[0]);
        assert_eq!(record.content(), Some(&CellValue::Integer(12345)));
    }

    #[test]
    fn test_to_record_handles_ragged_rows() {
        let t = table(&["content", "author", "id"], &[&["hi there", "me"]]);
        let schema = InputSchema::infer(&t);
        let record = schema.to_record(&t.rows[0]);
        assert_eq!(record.get("author"), Some(&CellValue::from("me")));
        assert_eq!(record.get("id"), Some(&CellValue::Null));

        let long_row: Vec<String> = ["a", "b", "1", "surplus"].iter().map(|s| s.to_string()).collect();
        let record = schema.to_record(&long_row);
        assert_eq!(record.fields.len(), 3);
    }

    #[test]
    fn test_require_content() {
        let with = InputSchema::infer(&table(&["content"], &[]));
        assert!(with.require_content().is_ok());

        let without = InputSchema::infer(&table(&["text", "author"], &[]));
        assert!(matches!(
            without.require_content(),
            Err(PipelineError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_output_schema_full_input_keeps_fixed_order() {
        let input = InputSchema::infer(&table(
            &[
                "id",
                "content",
                "author",
                "country",
                "date_time",
                "language",
                "number_of_likes",
                "number_of_shares",
                "extra",
            ],
            &[],
        ));
        let output = OutputSchema::resolve(&input);
        assert_eq!(output.headers(), OUTPUT_COLUMNS.to_vec());
    }

    #[test]
    fn test_output_schema_omits_absent_passthrough_columns() {
        let input = InputSchema::infer(&table(&["content", "id", "unrelated"], &[]));
        let output = OutputSchema::resolve(&input);
        assert_eq!(
            output.headers(),
            vec![
                "content",
                "cleaned_content",
                "sentiment_score",
                "sentiment_label",
                "subjectivity",
                "content_length",
                "id",
            ]
        );
    }

    #[test]
    fn test_input_column_named_like_computed_column_is_replaced() {
        let input = InputSchema::infer(&table(&["content", "sentiment_label"], &[]));
        let output = OutputSchema::resolve(&input);
        assert_eq!(output.columns[3], OutputColumn::SentimentLabel);
        assert_eq!(output.columns.len(), 6);
    }

    #[test]
    fn test_render_record() {
        let input = InputSchema::infer(&table(&["author", "content", "number_of_likes"], &[]));
        let output = OutputSchema::resolve(&input);

        let mut raw = RawRecord::with_content("I love this!!! https://x.co/a");
        raw.set("author", CellValue::from("ana"));
        raw.set("number_of_likes", CellValue::Null);

        let record = EnrichedRecord {
            raw,
            cleaned_content: "I love this!!!".to_string(),
            content_length: 14,
            sentiment_score: 0.9765625,
            sentiment_label: SentimentLabel::Positive,
            subjectivity: 0.6,
        };

        assert_eq!(
            output.render(&record),
            vec![
                "ana",
                "I love this!!! https://x.co/a",
                "I love this!!!",
                "0.9765625",
                "positive",
                "0.6",
                "14",
                "",
            ]
        );
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(-1.0), "-1.0");
        assert_eq!(format_float(1.0 / 3.0), "0.33333334");
    }
}
