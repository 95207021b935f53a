use tracing::error;

use crate::db::RateJournal;
use crate::errors::AppError;
use crate::models::RateDto;

/// Current rate + stats for every title with a sample in the trailing hour.
pub async fn get_all(journal: &dyn RateJournal) -> Result<Vec<RateDto>, AppError> {
    let latest = journal.list_latest().await.map_err(|e| {
        error!("Failed to list latest rates: {}", e);
        AppError::Db(e)
    })?;

    let mut dtos = Vec::with_capacity(latest.len());
    for rate in latest {
        let stats = journal.stats(&rate.title).await.map_err(|e| {
            error!("Failed to fetch stats for {}: {}", rate.title, e);
            AppError::Db(e)
        })?;

        // A title that has a latest rate must have stats; a gap here means
        // the journal answered inconsistently and the caller has to know.
        let stats = stats.ok_or_else(|| {
            error!("Stats missing for {} despite a current rate", rate.title);
            AppError::Aggregation(format!("stats missing for {}", rate.title))
        })?;

        dtos.push(RateDto::new(rate, stats));
    }

    Ok(dtos)
}

/// Current rate + stats for one title; NotFound when the title has no
/// sample in the trailing hour.
pub async fn get_by_title(journal: &dyn RateJournal, title: &str) -> Result<RateDto, AppError> {
    let rate = journal
        .latest(title)
        .await
        .map_err(|e| {
            error!("Failed to fetch latest rate for {}: {}", title, e);
            AppError::Db(e)
        })?
        .ok_or(AppError::NotFound)?;

    let stats = journal
        .stats(title)
        .await
        .map_err(|e| {
            error!("Failed to fetch stats for {}: {}", title, e);
            AppError::Db(e)
        })?
        .ok_or_else(|| {
            error!("Stats missing for {} despite a current rate", title);
            AppError::Aggregation(format!("stats missing for {}", title))
        })?;

    Ok(RateDto::new(rate, stats))
}
