use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::error::{PipelineError, Result};

pub const CONFIG_PATH_ENV: &str = "SENTIMENT_CONFIG";
pub const LOG_DIR_ENV: &str = "SENTIMENT_LOG_DIR";
pub const WORKERS_ENV: &str = "SENTIMENT_WORKERS";
pub const METRICS_ADDR_ENV: &str = "SENTIMENT_METRICS_ADDR";
pub const LEXICON_PATH_ENV: &str = "SENTIMENT_LEXICON";

/// Runtime settings that are not part of the CLI surface.
///
/// Read from an optional TOML file named by `SENTIMENT_CONFIG`, then
/// overridden by individual environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub execution: ExecutionConfig,
    pub metrics: MetricsConfig,
    pub lexicon: LexiconConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Worker threads for enrichment; `None` uses one per CPU
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Listen address for the Prometheus exporter; disabled when unset
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Alternative lexicon file; the bundled lexicon is used when unset
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `.env`, the optional TOML file and the environment
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            Some(config_path) => {
                let config_content = fs::read_to_string(&config_path).map_err(|e| {
                    PipelineError::Config(format!(
                        "Failed to read config file '{}': {}",
                        config_path, e
                    ))
                })?;
                Self::from_toml_str(&config_content)?
            }
            None => Config::default(),
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty(LOG_DIR_ENV) {
            self.logging.dir = dir;
        }
        if let Some(workers) = non_empty(WORKERS_ENV) {
            let workers = workers.trim().parse::<usize>().map_err(|e| {
                PipelineError::Config(format!("{} must be a positive integer: {}", WORKERS_ENV, e))
            })?;
            self.execution.workers = Some(workers);
        }
        if let Some(addr) = non_empty(METRICS_ADDR_ENV) {
            self.metrics.addr = Some(addr);
        }
        if let Some(path) = non_empty(LEXICON_PATH_ENV) {
            self.lexicon.path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.execution.workers == Some(0) {
            return Err(PipelineError::Config(
                "execution.workers must be at least 1".to_string(),
            ));
        }
        if self.logging.dir.trim().is_empty() {
            return Err(PipelineError::Config("logging.dir must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.logging.dir, "logs");
        assert_eq!(config.execution.workers, None);
        assert!(config.metrics.addr.is_none());
        assert!(config.lexicon.path.is_none());
    }

    #[test]
    fn test_toml_file_then_env_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [logging]
            dir = "/var/log/sentiment"

            [execution]
            workers = 4

            [lexicon]
            path = "custom.toml"
            "#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::from_lookup(lookup_from(&[
            (CONFIG_PATH_ENV, path.as_str()),
            (WORKERS_ENV, "8"),
            (METRICS_ADDR_ENV, "127.0.0.1:9900"),
        ]))
        .unwrap();

        assert_eq!(config.logging.dir, "/var/log/sentiment");
        assert_eq!(config.execution.workers, Some(8));
        assert_eq!(config.metrics.addr.as_deref(), Some("127.0.0.1:9900"));
        assert_eq!(config.lexicon.path, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_invalid_workers_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[(WORKERS_ENV, "many")])).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));

        let err = Config::from_lookup(lookup_from(&[(WORKERS_ENV, "0")])).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[(CONFIG_PATH_ENV, "/no/such/config.toml")]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = Config::from_toml_str("[execution\nworkers = ").unwrap_err();
        assert!(matches!(err, PipelineError::Toml(_)));
    }
}
