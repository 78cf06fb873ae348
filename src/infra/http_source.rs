use async_trait::async_trait;
use tracing::info;

use crate::app::ports::DatasetSource;
use crate::error::{PipelineError, Result};
use crate::infra::csv_source::parse_csv;
use crate::types::Table;

/// Reads a CSV dataset over HTTP(S)
pub struct HttpDatasetSource {
    url: String,
    client: reqwest::Client,
}

impl HttpDatasetSource {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn read(&self) -> Result<Table> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PipelineError::InputNotFound(self.url.clone()));
        }
        let resp = resp.error_for_status()?;

        let bytes = resp.bytes().await?;
        info!("Fetched {} bytes from {}", bytes.len(), self.url);
        parse_csv(bytes.as_ref())
    }
}
