//! Enrichment Phase Metrics
//!
//! Per-record outcomes: admitted and dropped records, assigned labels and
//! analyzer failures absorbed by the scorer.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};
use crate::types::SentimentLabel;

pub struct EnrichMetrics;

impl EnrichMetrics {
    /// An analyzer error was collapsed to default scores
    pub fn record_scoring_failure(analyzer: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "enrich", "scoring_failures"), "analyzer" => analyzer)
            .increment(1);
    }

    /// A record passed the admission filter
    pub fn record_admitted(label: SentimentLabel) {
        ::metrics::counter!(phase_metric!(counter, "enrich", "records_admitted")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "enrich", "labels_assigned"), "label" => label.as_str())
            .increment(1);
    }

    /// A record failed the admission filter
    pub fn record_dropped() {
        ::metrics::counter!(phase_metric!(counter, "enrich", "records_dropped")).increment(1);
    }
}

impl PhaseMetrics for EnrichMetrics {
    fn register_metrics() {
        let _ = ::metrics::counter!(phase_metric!(counter, "enrich", "scoring_failures"));
        let _ = ::metrics::counter!(phase_metric!(counter, "enrich", "records_admitted"));
        let _ = ::metrics::counter!(phase_metric!(counter, "enrich", "labels_assigned"));
        let _ = ::metrics::counter!(phase_metric!(counter, "enrich", "records_dropped"));
    }

    fn phase_name() -> &'static str {
        "enrich"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "enrich", "scoring_failures"),
                metric_type: MetricType::Counter,
                help: "Analyzer errors replaced by default scores",
                labels: vec!["analyzer"],
            },
            MetricDoc {
                name: phase_metric!(counter, "enrich", "records_admitted"),
                metric_type: MetricType::Counter,
                help: "Records that passed the minimum-length admission filter",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "enrich", "labels_assigned"),
                metric_type: MetricType::Counter,
                help: "Sentiment labels assigned to admitted records",
                labels: vec!["label"],
            },
            MetricDoc {
                name: phase_metric!(counter, "enrich", "records_dropped"),
                metric_type: MetricType::Counter,
                help: "Records dropped because their cleaned content was too short",
                labels: vec![],
            },
        ]
    }
}
