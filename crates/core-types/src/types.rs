// In crates/core-types/src/types.rs

use std::fmt;
use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One closing price exactly as the provider delivered it.
///
/// Prices stay in their textual form until an average needs them, so a
/// malformed entry can be handled by the policy of the computation reading it
/// instead of being rejected (or silently zeroed) at ingestion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceEntry(pub String);

impl PriceEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the entry as a floating-point price.
    pub fn value(&self) -> std::result::Result<f64, ParseFloatError> {
        self.0.parse::<f64>()
    }
}

impl From<f64> for PriceEntry {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for PriceEntry {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for PriceEntry {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Daily closing prices for a single asset, most recent first.
///
/// Index 0 is the latest trading day and larger indices walk back in time.
/// A series is never empty and never mutated after construction, which makes
/// it safe to share between threads behind a plain reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceEntry>", into = "Vec<PriceEntry>")]
pub struct PriceSeries {
    entries: Vec<PriceEntry>,
}

impl PriceSeries {
    /// Builds a series from newest-first entries.
    pub fn new(entries: Vec<PriceEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptySeries);
        }
        Ok(Self { entries })
    }

    pub fn from_strings<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(raw.into_iter().map(|s| PriceEntry(s.into())).collect())
    }

    pub fn from_values(values: &[f64]) -> Result<Self> {
        Self::new(values.iter().copied().map(PriceEntry::from).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept so the type reads like any other collection.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PriceEntry> {
        self.entries.get(index)
    }

    /// Parses the entry at `index`, reporting a conversion failure with its position.
    pub fn value_at(&self, index: usize) -> Result<f64> {
        let entry = self.entries.get(index).ok_or(Error::OutOfRange {
            length: 1,
            offset: index,
            series_len: self.entries.len(),
        })?;
        entry.value().map_err(|_| Error::Conversion {
            index,
            value: entry.0.clone(),
        })
    }

    /// The most recent closing price.
    pub fn latest(&self) -> Result<f64> {
        self.value_at(0)
    }

    /// Borrows the entries covered by `window`, or fails if it runs past the end.
    pub fn slice(&self, window: Window) -> Result<&[PriceEntry]> {
        let out_of_range = Error::OutOfRange {
            length: window.length,
            offset: window.offset,
            series_len: self.entries.len(),
        };
        let end = window.end().ok_or_else(|| out_of_range.clone())?;
        if end > self.entries.len() {
            return Err(out_of_range);
        }
        Ok(&self.entries[window.offset..end])
    }
}

impl TryFrom<Vec<PriceEntry>> for PriceSeries {
    type Error = Error;

    fn try_from(entries: Vec<PriceEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<PriceSeries> for Vec<PriceEntry> {
    fn from(series: PriceSeries) -> Self {
        series.entries
    }
}

/// A contiguous slice `[offset, offset + length)` of a price series.
///
/// Always covers at least one price; the only ways in are [`Window::new`] and
/// deserialization, which goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct Window {
    length: usize,
    offset: usize,
}

#[derive(Deserialize)]
struct RawWindow {
    length: usize,
    #[serde(default)]
    offset: usize,
}

impl TryFrom<RawWindow> for Window {
    type Error = Error;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Self::new(raw.length, raw.offset)
    }
}

impl Window {
    pub fn new(length: usize, offset: usize) -> Result<Self> {
        if length == 0 {
            return Err(Error::InvalidWindow { length });
        }
        Ok(Self { length, offset })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// A window ending at the most recent price.
    pub fn leading(length: usize) -> Result<Self> {
        Self::new(length, 0)
    }

    /// One past the last covered index, or `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.length)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.offset, self.offset.saturating_add(self.length))
    }
}

/// An EMA trajectory aligned index-for-index with the series it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmaSeries {
    values: Vec<f64>,
    period: usize,
    multiplier: f64,
}

impl EmaSeries {
    pub fn new(values: Vec<f64>, period: usize, multiplier: f64) -> Self {
        Self {
            values,
            period,
            multiplier,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The value at index 0, i.e. for the most recent day.
    pub fn latest(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

/// The crossover decision for one pair of averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageFamily {
    Sma,
    Ema,
}

impl fmt::Display for AverageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageFamily::Sma => f.write_str("SMA"),
            AverageFamily::Ema => f.write_str("EMA"),
        }
    }
}
