use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::external::rate_provider::{ProviderError, RateProvider};
use crate::models::Rate;

/// CoinGecko `/coins/markets`-style client. The endpoint URL carries the
/// tracked-symbol filter and currency; the key goes in a header.
pub struct CoinGeckoProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl CoinGeckoProvider {
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    symbol: String,
    current_price: Option<f64>,
}

fn map_rows(rows: Vec<MarketRow>) -> Vec<Rate> {
    // One stamp per snapshot; appends across serialized polls stay ordered.
    let now = Utc::now();

    let mut rates = Vec::with_capacity(rows.len());
    for row in rows {
        if row.symbol.is_empty() {
            warn!("Skipping market row with empty symbol");
            continue;
        }

        match row.current_price {
            Some(price) if price.is_finite() && price >= 0.0 => {
                rates.push(Rate {
                    title: row.symbol,
                    cost: price,
                    inserted: now,
                });
            }
            other => {
                warn!("Skipping {}: unusable price {:?}", row.symbol, other);
            }
        }
    }

    rates
}

#[async_trait]
impl RateProvider for CoinGeckoProvider {
    async fn fetch_rates(&self) -> Result<Vec<Rate>, ProviderError> {
        let resp = self
            .client
            .get(&self.url)
            .header("Content-Type", "application/json")
            .header("x-cg-pro-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::BadStatus(status.to_string()));
        }

        let rows: Vec<MarketRow> = resp
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(map_rows(rows))
    }
}
