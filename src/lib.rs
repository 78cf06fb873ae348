pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use error::{PipelineError, Result, ScoringError};
pub use pipeline::processing::{
    classify, enrich, normalize, score_polarity, score_subjectivity, Enricher, SentimentEnricher,
};
pub use pipeline::{RunSummary, SentimentPipeline};
pub use types::{CellValue, EnrichedRecord, RawRecord, SentimentLabel, SentimentResult};
