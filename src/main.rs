use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use sentiment_pipeline::config::Config;
use sentiment_pipeline::infra::{sink_for_path, source_for_path};
use sentiment_pipeline::logging;
use sentiment_pipeline::metrics;
use sentiment_pipeline::pipeline::processing::sentiment::analyzer::LexiconAnalyzer;
use sentiment_pipeline::pipeline::processing::sentiment::SentimentScorer;
use sentiment_pipeline::pipeline::{RunSummary, SentimentPipeline};
use sentiment_pipeline::types::SentimentLabel;
use sentiment_pipeline::SentimentEnricher;

#[derive(Parser)]
#[command(name = "sentiment_pipeline")]
#[command(about = "Per-record sentiment enrichment for social media posts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input dataset: a CSV file, a directory of CSV part files, or an http(s) URL
    #[arg(long = "input_path")]
    input_path: String,

    /// Output dataset directory; replaced if it already exists
    #[arg(long = "output_path")]
    output_path: String,
}

fn print_summary(summary: &RunSummary) {
    println!("\n📊 Sentiment Results:");
    println!("   Records read: {}", summary.records_read);
    println!("   Records written: {}", summary.records_written);
    println!("   Dropped (too short): {}", summary.records_dropped);
    for label in [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ] {
        println!("   {}: {}", label, summary.label_count(label));
    }
    println!("   Duration: {:.2}s", summary.duration_secs);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("Failed to load configuration")?;
    let _guard = logging::init_logging(&config.logging);

    if let Some(addr) = config.metrics.addr.as_deref() {
        metrics::init_metrics(addr);
    }

    let analyzer = match config.lexicon.path.as_deref() {
        Some(path) => LexiconAnalyzer::from_path(path)
            .with_context(|| format!("Failed to load lexicon from {}", path.display()))?,
        None => LexiconAnalyzer::bundled(),
    };
    let scorer = SentimentScorer::new(analyzer);
    let pipeline = SentimentPipeline::new(SentimentEnricher::new(&scorer))
        .with_workers(config.execution.workers);

    let source = source_for_path(&cli.input_path)?;
    let sink = sink_for_path(&cli.output_path)?;

    println!("Reading data from: {}", cli.input_path);
    info!(input = %cli.input_path, output = %cli.output_path, "Starting sentiment run");

    match pipeline.run(source.as_ref(), sink.as_ref()).await {
        Ok(summary) => {
            println!("Analysis complete. Results saved to: {}", cli.output_path);
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            error!("Sentiment run failed: {}", e);
            Err(e.into())
        }
    }
}
