// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid strategy settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Computation(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
