use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::journal::{JournalError, RateJournal};
use crate::models::{Rate, RateStats};

/// Postgres-backed journal. Aggregation windows are evaluated at query
/// time directly over the append-only table; nothing is maintained
/// incrementally.
pub struct PgRateJournal {
    pool: PgPool,
}

impl PgRateJournal {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateJournal for PgRateJournal {
    async fn append(&self, rate: &Rate) -> Result<(), JournalError> {
        sqlx::query("INSERT INTO rate_journal (title, cost, inserted) VALUES ($1, $2, $3)")
            .bind(&rate.title)
            .bind(rate.cost)
            .bind(rate.inserted)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn latest(&self, title: &str) -> Result<Option<Rate>, JournalError> {
        let rate = sqlx::query_as::<_, Rate>(
            r#"
            SELECT title, cost, inserted
            FROM rate_journal
            WHERE title = $1
              AND inserted >= NOW() - INTERVAL '1 hour'
            ORDER BY inserted DESC
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rate)
    }

    async fn list_latest(&self) -> Result<Vec<Rate>, JournalError> {
        let rates = sqlx::query_as::<_, Rate>(
            r#"
            SELECT DISTINCT ON (title) title, cost, inserted
            FROM rate_journal
            WHERE inserted >= NOW() - INTERVAL '1 hour'
            ORDER BY title, inserted DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rates)
    }

    async fn stats(&self, title: &str) -> Result<Option<RateStats>, JournalError> {
        // Either window grouping to zero rows empties the join, which the
        // caller sees as None. A zero minimum in the hour window surfaces
        // as a database division error rather than a fabricated value.
        let stats = sqlx::query_as::<_, RateStats>(
            r#"
            SELECT daily.max_cost_per_day,
                   daily.min_cost_per_day,
                   hourly.change_per_hour_percents
            FROM (SELECT title,
                         MAX(cost) AS max_cost_per_day,
                         MIN(cost) AS min_cost_per_day
                  FROM rate_journal
                  WHERE title = $1
                    AND inserted::date = CURRENT_DATE
                  GROUP BY title) AS daily
            JOIN (SELECT title,
                         ((MAX(cost) - MIN(cost)) / MIN(cost)) * 100 AS change_per_hour_percents
                  FROM rate_journal
                  WHERE title = $1
                    AND inserted >= NOW() - INTERVAL '1 hour'
                  GROUP BY title) AS hourly USING (title)
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stats)
    }
}
