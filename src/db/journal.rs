use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Rate, RateStats};

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("journal backend error: {0}")]
    Backend(String),
}

/// Append-only journal of rate observations plus its windowed read queries.
///
/// Recency is a trailing 1-hour window; daily aggregates use the store's
/// current calendar day. `None` from the read queries means the title has
/// no sample in the required window.
#[async_trait]
pub trait RateJournal: Send + Sync {
    /// Append one sample. Safe to call concurrently with reads.
    async fn append(&self, rate: &Rate) -> Result<(), JournalError>;

    /// Most recent sample for `title` within the trailing hour.
    async fn latest(&self, title: &str) -> Result<Option<Rate>, JournalError>;

    /// Most recent sample per distinct title within the trailing hour,
    /// in unspecified order.
    async fn list_latest(&self) -> Result<Vec<Rate>, JournalError>;

    /// Daily min/max plus hourly percent change for `title`.
    async fn stats(&self, title: &str) -> Result<Option<RateStats>, JournalError>;
}
