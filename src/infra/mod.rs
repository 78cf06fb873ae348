//! Dataset adapters behind the `app::ports` traits

pub mod csv_sink;
pub mod csv_source;
pub mod http_source;

use crate::app::ports::{DatasetSink, DatasetSource};
use crate::error::{PipelineError, Result};

pub use csv_sink::CsvDirectorySink;
pub use csv_source::FileDatasetSource;
pub use http_source::HttpDatasetSource;

/// Split `scheme://rest`, returning `None` for plain paths
fn split_scheme(path: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = path.split_once("://")?;
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

fn unsupported(scheme: &str, path: &str) -> PipelineError {
    PipelineError::UnsupportedScheme {
        scheme: scheme.to_string(),
        path: path.to_string(),
    }
}

/// Pick a source for an input path: local path, `file://`, or `http(s)://`
pub fn source_for_path(path: &str) -> Result<Box<dyn DatasetSource>> {
    match split_scheme(path) {
        None => Ok(Box::new(FileDatasetSource::new(path))),
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("file") => {
            Ok(Box::new(FileDatasetSource::new(rest)))
        }
        Some((scheme, _)) if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => {
            Ok(Box::new(HttpDatasetSource::new(path)))
        }
        Some((scheme, _)) => Err(unsupported(scheme, path)),
    }
}

/// Pick a sink for an output path: local path or `file://`
pub fn sink_for_path(path: &str) -> Result<Box<dyn DatasetSink>> {
    match split_scheme(path) {
        None => Ok(Box::new(CsvDirectorySink::new(path))),
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("file") => {
            Ok(Box::new(CsvDirectorySink::new(rest)))
        }
        Some((scheme, _)) => Err(unsupported(scheme, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_paths_and_file_urls() {
        assert_eq!(source_for_path("data/posts.csv").unwrap().describe(), "data/posts.csv");
        assert_eq!(source_for_path("file:///tmp/posts.csv").unwrap().describe(), "/tmp/posts.csv");
        assert_eq!(sink_for_path("out/results").unwrap().describe(), "out/results");
    }

    #[test]
    fn test_http_sources() {
        let source = source_for_path("https://example.com/posts.csv").unwrap();
        assert_eq!(source.describe(), "https://example.com/posts.csv");
    }

    #[test]
    fn test_object_store_schemes_are_rejected() {
        assert!(matches!(
            source_for_path("s3://bucket/posts.csv"),
            Err(PipelineError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            sink_for_path("https://example.com/out"),
            Err(PipelineError::UnsupportedScheme { .. })
        ));
    }
}
