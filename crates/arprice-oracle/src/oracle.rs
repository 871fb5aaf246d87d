//! The pricing oracle capability.

use std::sync::Arc;

use arprice_types::{ByteCount, Winston};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while querying a pricing oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out.
    #[error("Request timed out after {0} attempts")]
    Timeout(u32),

    /// Server returned an error status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// Response body was not a Winston amount.
    #[error("Invalid price response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for OracleError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

/// A source of current storage prices.
///
/// Implementations own their transport concerns (timeouts, retries); callers
/// only see a price or a failure.
#[async_trait]
pub trait PriceOracle: Send + Sync + std::fmt::Debug {
    /// Returns the current price for storing `byte_count` bytes.
    async fn winston_price_for(&self, byte_count: ByteCount) -> Result<Winston, OracleError>;
}

#[async_trait]
impl<T: PriceOracle + ?Sized> PriceOracle for Arc<T> {
    async fn winston_price_for(&self, byte_count: ByteCount) -> Result<Winston, OracleError> {
        (**self).winston_price_for(byte_count).await
    }
}

#[async_trait]
impl<T: PriceOracle + ?Sized> PriceOracle for Box<T> {
    async fn winston_price_for(&self, byte_count: ByteCount) -> Result<Winston, OracleError> {
        (**self).winston_price_for(byte_count).await
    }
}
