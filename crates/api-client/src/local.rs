// In crates/api-client/src/local.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use core_types::PriceSeries;

use crate::error::Result;
use crate::types::parse_daily_response;
use crate::PriceSeriesProvider;

/// Reads a previously saved `DIGITAL_CURRENCY_DAILY` response body from disk.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PriceSeriesProvider for FileProvider {
    fn name(&self) -> &'static str {
        "File"
    }

    async fn fetch(&self) -> Result<PriceSeries> {
        tracing::info!(path = %self.path.display(), "Loading daily closing prices from file...");
        let body = tokio::fs::read_to_string(&self.path).await?;
        let closes = parse_daily_response(&body)?;
        tracing::info!(count = closes.series.len(), "Loaded daily closing prices.");
        Ok(closes.series)
    }
}

/// Hands out a series that is already in memory.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    series: PriceSeries,
}

impl StaticProvider {
    pub fn new(series: PriceSeries) -> Self {
        Self { series }
    }
}

#[async_trait]
impl PriceSeriesProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "Static"
    }

    async fn fetch(&self) -> Result<PriceSeries> {
        Ok(self.series.clone())
    }
}
