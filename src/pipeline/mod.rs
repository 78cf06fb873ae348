// Sentiment pipeline: per-record processing, schema handling and whole-dataset runs

pub mod orchestrator;
pub mod processing;
pub mod schema;

pub use orchestrator::{RunSummary, SentimentPipeline};
