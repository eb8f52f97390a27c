// In crates/core-types/src/error.rs

use thiserror::Error;

/// Failures raised while building or aggregating a price series.
///
/// Every variant is recoverable at the call site: the caller may retry with a
/// different window or skip the affected average family.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Invalid window length {length}: a window must cover at least one price")]
    InvalidWindow { length: usize },

    #[error("Window of length {length} at offset {offset} exceeds series of length {series_len}")]
    OutOfRange {
        length: usize,
        offset: usize,
        series_len: usize,
    },

    #[error("Insufficient data: {required} prices required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("Price at index {index} is not numeric: {value:?}")]
    Conversion { index: usize, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
