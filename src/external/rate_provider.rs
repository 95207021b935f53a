use async_trait::async_trait;
use thiserror::Error;

use crate::models::Rate;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response status: {0}")]
    BadStatus(String),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Source of current-price snapshots for all tracked assets.
///
/// One call returns one snapshot; retry policy belongs to the caller.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<Vec<Rate>, ProviderError>;
}
