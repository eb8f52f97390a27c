// In crates/api-client/src/lib.rs

use std::time::Duration;

use app_config::types::ProviderSettings;
use async_trait::async_trait;
use core_types::PriceSeries;

pub mod error;
pub mod local;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use local::{FileProvider, StaticProvider};
pub use types::*;

/// A source of daily closing prices, most recent first.
///
/// The computation core never fetches anything itself; it is handed a
/// `PriceSeries` obtained through one of these.
#[async_trait]
pub trait PriceSeriesProvider {
    /// A short description of where prices come from, for logging.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<PriceSeries>;
}

impl AlphaVantageClient {
    /// Constructs a new client from ProviderSettings.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(Error::ClientBuildError)?;

        Ok(AlphaVantageClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            symbol: settings.symbol.clone(),
            market: settings.market.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    fn daily_request(&self) -> reqwest::RequestBuilder {
        self.http_client
            .get(format!("{}/query", self.base_url))
            .query(&[
                ("function", "DIGITAL_CURRENCY_DAILY"),
                ("symbol", self.symbol.as_str()),
                ("market", self.market.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
    }

    /// Fetches the full daily history for the configured symbol and market.
    ///
    /// This corresponds to `GET /query?function=DIGITAL_CURRENCY_DAILY`.
    pub async fn get_daily_closes(&self) -> Result<DailyCloses> {
        tracing::info!(symbol = %self.symbol, market = %self.market, "Fetching daily closing prices...");

        let body = self
            .daily_request()
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .error_for_status()
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        let closes = parse_daily_response(&body)?;

        tracing::info!(
            count = closes.series.len(),
            last_refreshed = closes.meta_data.as_ref().map(|m| m.last_refreshed.as_str()),
            "Received daily closing prices."
        );

        Ok(closes)
    }
}

#[async_trait]
impl PriceSeriesProvider for AlphaVantageClient {
    fn name(&self) -> &'static str {
        "AlphaVantage"
    }

    async fn fetch(&self) -> Result<PriceSeries> {
        Ok(self.get_daily_closes().await?.series)
    }
}

// Free function to allow api_client::new usage
pub fn new(settings: &ProviderSettings) -> Result<AlphaVantageClient> {
    AlphaVantageClient::new(settings)
}
