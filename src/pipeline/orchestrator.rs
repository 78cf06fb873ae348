use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::info;

use crate::app::ports::{DatasetSink, DatasetSource};
use crate::error::{PipelineError, Result};
use crate::metrics::{DatasetMetrics, EnrichMetrics};
use crate::pipeline::processing::enrich::Enricher;
use crate::pipeline::schema::{InputSchema, OutputSchema};
use crate::types::{SentimentLabel, Table};

/// Outcome of a full pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: String,
    pub output: String,
    pub records_read: usize,
    pub records_written: usize,
    pub records_dropped: usize,
    pub label_counts: BTreeMap<SentimentLabel, usize>,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
}

impl RunSummary {
    pub fn label_count(&self, label: SentimentLabel) -> usize {
        self.label_counts.get(&label).copied().unwrap_or(0)
    }
}

/// Result of enriching a table in memory
#[derive(Debug, Clone)]
pub struct ProcessedTable {
    pub table: Table,
    pub records_read: usize,
    pub records_dropped: usize,
    pub label_counts: BTreeMap<SentimentLabel, usize>,
}

/// Runs an [`Enricher`] over every row of a dataset on a worker pool
pub struct SentimentPipeline<E> {
    enricher: E,
    workers: Option<usize>,
}

impl<E: Enricher> SentimentPipeline<E> {
    pub fn new(enricher: E) -> Self {
        Self {
            enricher,
            workers: None,
        }
    }

    /// Fix the worker pool size; `None` uses one thread per CPU
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    /// Read, enrich and write a whole dataset
    pub async fn run(&self, source: &dyn DatasetSource, sink: &dyn DatasetSink) -> Result<RunSummary> {
        let started_at = Utc::now();
        let timer = Instant::now();

        info!(input = %source.describe(), "Reading data");
        let table = source.read().await?;
        DatasetMetrics::record_rows_read(table.len());

        let processed = self.process(&table)?;

        info!(output = %sink.describe(), rows = processed.table.len(), "Writing results");
        sink.write(&processed.table).await?;
        DatasetMetrics::record_rows_written(processed.table.len());

        let duration_secs = timer.elapsed().as_secs_f64();
        DatasetMetrics::record_run_duration(duration_secs);

        let summary = RunSummary {
            input: source.describe(),
            output: sink.describe(),
            records_read: processed.records_read,
            records_written: processed.table.len(),
            records_dropped: processed.records_dropped,
            label_counts: processed.label_counts,
            started_at,
            duration_secs,
        };
        info!(
            read = summary.records_read,
            written = summary.records_written,
            dropped = summary.records_dropped,
            duration_secs = summary.duration_secs,
            "Analysis complete"
        );
        Ok(summary)
    }

    /// Enrich a table in memory: infer the schema, enrich every row in
    /// parallel, apply the admission filter and project the output columns.
    /// Output rows keep input order.
    pub fn process(&self, table: &Table) -> Result<ProcessedTable> {
        let input_schema = InputSchema::infer(table);
        input_schema.require_content()?;
        let output_schema = OutputSchema::resolve(&input_schema);

        let pool = self.build_pool()?;
        DatasetMetrics::record_worker_threads(pool.current_num_threads());

        let enriched: Vec<_> = pool.install(|| {
            table
                .rows
                .par_iter()
                .map(|row| self.enricher.enrich(&input_schema.to_record(row)))
                .collect()
        });

        let mut output = Table::new(output_schema.headers());
        let mut label_counts = BTreeMap::new();
        let mut records_dropped = 0;

        for record in enriched {
            match record {
                Some(record) => {
                    EnrichMetrics::record_admitted(record.sentiment_label);
                    *label_counts.entry(record.sentiment_label).or_insert(0) += 1;
                    output.rows.push(output_schema.render(&record));
                }
                None => {
                    EnrichMetrics::record_dropped();
                    records_dropped += 1;
                }
            }
        }

        Ok(ProcessedTable {
            table: output,
            records_read: table.len(),
            records_dropped,
            label_counts,
        })
    }

    fn build_pool(&self) -> Result<rayon::ThreadPool> {
        let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("enrich-{}", i));
        if let Some(workers) = self.workers {
            builder = builder.num_threads(workers);
        }
        builder
            .build()
            .map_err(|e| PipelineError::WorkerPool(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::enrich::SentimentEnricher;

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
    fn test_process_filters_and_projects() {
        let input = table(
            &["id", "author", "content"],
            &[
                &["1", "ana", "I love this!!! https://x.co/a"],
                &["2", "bo", "   "],
                &["3", "cy", "ok"],
                &["4", "di", "This is terrible and awful"],
            ],
        );

        let pipeline = SentimentPipeline::new(SentimentEnricher::default()).with_workers(Some(2));
        let processed = pipeline.process(&input).unwrap();

        assert_eq!(processed.records_read, 4);
        assert_eq!(processed.records_dropped, 2);
        assert_eq!(processed.table.headers[0], "author");
        assert_eq!(processed.table.headers.last().map(String::as_str), Some("id"));

        let ids: Vec<&str> = processed
            .table
            .rows
            .iter()
            .map(|row| row.last().map(String::as_str).unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["1", "4"]);

        let first = &processed.table.rows[0];
        assert_eq!(first[2], "I love this!!!");
        assert_eq!(first[4], "positive");
        assert_eq!(first[6], "14");
        assert_eq!(processed.table.rows[1][4], "negative");
        assert_eq!(processed.label_counts.get(&SentimentLabel::Positive), Some(&1));
        assert_eq!(processed.label_counts.get(&SentimentLabel::Negative), Some(&1));
    }

    #[test]
    fn test_missing_content_column_fails_before_processing() {
        let input = table(&["text"], &[&["hello world"]]);
        let pipeline = SentimentPipeline::new(SentimentEnricher::default());
        assert!(matches!(
            pipeline.process(&input),
            Err(PipelineError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_output_is_independent_of_worker_count() {
        let rows: Vec<Vec<String>> = (0..200)
            .map(|i| {
                let content = match i % 4 {
                    0 => format!("post {} is really great", i),
                    1 => format!("post {} was a bad day", i),
                    2 => "meh".to_string(),
                    _ => format!("neutral words number {}", i),
                };
                vec![i.to_string(), content]
            })
            .collect();
        let input = Table {
            headers: vec!["id".to_string(), "content".to_string()],
            rows,
        };

        let single = SentimentPipeline::new(SentimentEnricher::default())
            .with_workers(Some(1))
            .process(&input)
            .unwrap();
        let many = SentimentPipeline::new(SentimentEnricher::default())
            .with_workers(Some(8))
            .process(&input)
            .unwrap();

        assert_eq!(single.table, many.table);
        assert_eq!(single.records_dropped, 50);
    }
}
