// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(reqwest::Error),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("Failed to read price data: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {message}")]
    ApiError { message: String },
    #[error("Response contained no daily prices")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, Error>;
