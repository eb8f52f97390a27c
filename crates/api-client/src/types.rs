// In crates/api-client/src/types.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use core_types::{PriceEntry, PriceSeries};
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// The client for the Alpha Vantage daily digital currency endpoint.
#[derive(Clone)]
pub struct AlphaVantageClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The base URL of the API, without the `/query` path.
    pub base_url: String,
    /// The asset to fetch (e.g., "SOL").
    pub symbol: String,
    /// The quote market (e.g., "USD").
    pub market: String,
    pub api_key: String,
}

impl std::fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("base_url", &self.base_url)
            .field("symbol", &self.symbol)
            .field("market", &self.market)
            .finish_non_exhaustive()
    }
}

/// The body of a `DIGITAL_CURRENCY_DAILY` response.
///
/// Alpha Vantage answers failures with HTTP 200 and a single message field,
/// so every section is optional here and checked after deserialization.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DailySeriesResponse {
    #[serde(rename = "Meta Data")]
    pub meta_data: Option<MetaData>,
    #[serde(rename = "Time Series (Digital Currency Daily)")]
    pub time_series: Option<BTreeMap<NaiveDate, DigitalCurrencyDay>>,

    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    /// Rate-limit notice on older API revisions.
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetaData {
    #[serde(rename = "1. Information", default)]
    pub information: String,
    #[serde(rename = "2. Digital Currency Code", default)]
    pub currency_code: String,
    #[serde(rename = "3. Digital Currency Name", default)]
    pub currency_name: String,
    #[serde(rename = "4. Market Code", default)]
    pub market_code: String,
    #[serde(rename = "5. Market Name", default)]
    pub market_name: String,
    #[serde(rename = "6. Last Refreshed", default)]
    pub last_refreshed: String,
    #[serde(rename = "7. Time Zone", default)]
    pub time_zone: String,
}

/// One trading day. Values are kept as the strings the API sent.
#[derive(Debug, Deserialize, Clone)]
pub struct DigitalCurrencyDay {
    #[serde(rename = "1. open", alias = "1b. open (USD)", default)]
    pub open: Option<String>,
    #[serde(rename = "2. high", alias = "2b. high (USD)", default)]
    pub high: Option<String>,
    #[serde(rename = "3. low", alias = "3b. low (USD)", default)]
    pub low: Option<String>,
    /// Missing or `null` closes become an empty string, which the averages
    /// treat like any other non-numeric entry.
    #[serde(rename = "4. close", alias = "4b. close (USD)", default, deserialize_with = "null_as_empty")]
    pub close: String,
    #[serde(rename = "5. volume", default)]
    pub volume: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Newest-first closing prices together with the metadata they came with.
#[derive(Debug, Clone)]
pub struct DailyCloses {
    pub meta_data: Option<MetaData>,
    pub series: PriceSeries,
}

impl DailySeriesResponse {
    /// Parses a raw response body.
    pub fn from_body(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Orders the daily closes most recent first.
    ///
    /// Close strings are passed through untouched; deciding what to do with a
    /// malformed one is up to the computation that reads it.
    pub fn into_daily_closes(self) -> Result<DailyCloses> {
        let Some(time_series) = self.time_series else {
            return match self.error_message.or(self.note).or(self.information) {
                Some(message) => Err(Error::ApiError { message }),
                None => Err(Error::EmptyResponse),
            };
        };

        let closes: Vec<PriceEntry> = time_series
            .into_values()
            .rev()
            .map(|day| PriceEntry::new(day.close))
            .collect();
        let series = PriceSeries::new(closes).map_err(|_| Error::EmptyResponse)?;

        Ok(DailyCloses {
            meta_data: self.meta_data,
            series,
        })
    }
}

/// Parses a `DIGITAL_CURRENCY_DAILY` body straight into newest-first closes.
pub fn parse_daily_response(body: &str) -> Result<DailyCloses> {
    DailySeriesResponse::from_body(body)?.into_daily_closes()
}
