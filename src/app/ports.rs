use async_trait::async_trait;

use crate::error::Result;
use crate::types::Table;

/// Where an input dataset is read from
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    /// Read the whole dataset as a header plus rows of raw cells
    async fn read(&self) -> Result<Table>;
}

/// Where the enriched dataset is written to
#[async_trait]
pub trait DatasetSink: Send + Sync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    /// Write the table, replacing anything already at the destination.
    /// Either the whole table is committed or nothing is.
    async fn write(&self, table: &Table) -> Result<()>;
}
