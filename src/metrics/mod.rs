//! Metrics infrastructure for the sentiment pipeline
//!
//! Each pipeline phase defines its own metrics in a dedicated submodule, so
//! names stay unique and ownership is clear. Without an installed recorder
//! every call is a no-op, which keeps the library usable in tests.

pub mod dataset;
pub mod enrich;
pub mod registry;

pub use dataset::DatasetMetrics;
pub use enrich::EnrichMetrics;

use std::net::SocketAddr;
use std::sync::Once;
use tracing::{info, warn};

static INIT: Once = Once::new();

/// Install a Prometheus recorder with an HTTP listener on `addr`
///
/// Idempotent. An unparsable address or a failed install is logged and
/// skipped; metrics are never fatal to a run.
pub fn init_metrics(addr: &str) {
    INIT.call_once(|| {
        let addr: SocketAddr = match addr.parse() {
            Ok(addr) => addr,
            Err(e) => {
                warn!("Invalid metrics addr '{}': {}; metrics exporter disabled", addr, e);
                return;
            }
        };

        let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
        match builder.install() {
            Ok(()) => {
                info!("Prometheus exporter listening on http://{}/metrics", addr);
                registry::register_all_metrics();
            }
            Err(e) => {
                warn!("Failed to install Prometheus exporter: {}", e);
            }
        }
    });
}

/// Trait for phase-specific metrics collections
pub trait PhaseMetrics {
    /// Register all metrics for this phase
    fn register_metrics();

    /// Get the phase name for prefixing metrics
    fn phase_name() -> &'static str;

    /// Get documentation for all metrics in this phase
    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricType {
    Counter,
    Histogram,
    Gauge,
}

/// Build a metric name following `sentiment_{phase}_{metric_name}[_total]`
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("sentiment_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("sentiment_", $phase, "_", $name)
    };
    (gauge, $phase:literal, $name:literal) => {
        concat!("sentiment_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_naming_convention() {
        assert_eq!(
            phase_metric!(counter, "enrich", "records_dropped"),
            "sentiment_enrich_records_dropped_total"
        );
        assert_eq!(
            phase_metric!(histogram, "dataset", "run_duration_seconds"),
            "sentiment_dataset_run_duration_seconds"
        );
        assert_eq!(
            phase_metric!(gauge, "dataset", "worker_threads"),
            "sentiment_dataset_worker_threads"
        );
    }

    #[test]
    fn test_init_with_bad_address_does_not_panic() {
        init_metrics("not an address");
    }
}
