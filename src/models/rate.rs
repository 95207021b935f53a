use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One observation of an asset's price, as appended to the journal.
///
/// `inserted` is stamped by the ingestion side when the provider response
/// is decoded; the provider's own timestamps are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rate {
    pub title: String,
    pub cost: f64,
    pub inserted: DateTime<Utc>,
}

/// Rolling statistics derived from the journal at read time, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RateStats {
    pub max_cost_per_day: f64,
    pub min_cost_per_day: f64,
    pub change_per_hour_percents: f64,
}

/// External view of one asset: its latest rate joined with its stats.
#[derive(Debug, Clone, Serialize)]
pub struct RateDto {
    pub title: String,
    pub cost: f64,
    pub last_update: DateTime<Utc>,
    pub max_cost_per_day: f64,
    pub min_cost_per_day: f64,
    pub change_per_hour_percents: f64,
}

impl RateDto {
    pub fn new(rate: Rate, stats: RateStats) -> Self {
        Self {
            title: rate.title,
            cost: rate.cost,
            last_update: rate.inserted,
            max_cost_per_day: stats.max_cost_per_day,
            min_cost_per_day: stats.min_cost_per_day,
            change_per_hour_percents: stats.change_per_hour_percents,
        }
    }
}
