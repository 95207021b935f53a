use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::RateDto;
use crate::services::rate_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all))
        .route("/:title", get(get_by_title))
}

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<RateDto>>, AppError> {
    info!("GET /api/v1/rates - Listing current rates");
    let dtos = rate_service::get_all(state.journal.as_ref()).await?;
    Ok(Json(dtos))
}

pub async fn get_by_title(
    Path(title): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RateDto>, AppError> {
    info!("GET /api/v1/rates/{} - Getting current rate", title);
    let dto = rate_service::get_by_title(state.journal.as_ref(), &title).await?;
    Ok(Json(dto))
}
