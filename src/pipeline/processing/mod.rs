// Per-record processing: normalization, scoring, labelling and enrichment

pub mod classify;
pub mod enrich;
pub mod normalize;
pub mod sentiment;

pub use classify::classify;
pub use enrich::{enrich, Enricher, SentimentEnricher};
pub use normalize::normalize;
pub use sentiment::{score_polarity, score_subjectivity};
