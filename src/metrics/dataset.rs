//! Dataset Phase Metrics
//!
//! Whole-run figures: rows read and written, worker pool size and duration.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct DatasetMetrics;

impl DatasetMetrics {
    pub fn record_rows_read(rows: usize) {
        ::metrics::counter!(phase_metric!(counter, "dataset", "rows_read")).increment(rows as u64);
    }

    pub fn record_rows_written(rows: usize) {
        ::metrics::counter!(phase_metric!(counter, "dataset", "rows_written")).increment(rows as u64);
    }

    pub fn record_worker_threads(threads: usize) {
        ::metrics::gauge!(phase_metric!(gauge, "dataset", "worker_threads")).set(threads as f64);
    }

    pub fn record_run_duration(duration_secs: f64) {
        ::metrics::histogram!(phase_metric!(histogram, "dataset", "run_duration_seconds"))
            .record(duration_secs);
    }
}

impl PhaseMetrics for DatasetMetrics {
    fn register_metrics() {
        let _ = ::metrics::counter!(phase_metric!(counter, "dataset", "rows_read"));
        let _ = ::metrics::counter!(phase_metric!(counter, "dataset", "rows_written"));
        let _ = ::metrics::gauge!(phase_metric!(gauge, "dataset", "worker_threads"));
        let _ = ::metrics::histogram!(phase_metric!(histogram, "dataset", "run_duration_seconds"));
    }

    fn phase_name() -> &'static str {
        "dataset"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "dataset", "rows_read"),
                metric_type: MetricType::Counter,
                help: "Rows read from the input dataset",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "dataset", "rows_written"),
                metric_type: MetricType::Counter,
                help: "Rows written to the output dataset",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(gauge, "dataset", "worker_threads"),
                metric_type: MetricType::Gauge,
                help: "Size of the enrichment worker pool",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "dataset", "run_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Wall-clock duration of a full pipeline run",
                labels: vec![],
            },
        ]
    }
}
