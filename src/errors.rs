use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use crate::db::JournalError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Db(#[from] JournalError),
    #[error("not found")]
    NotFound,
    #[error("inconsistent aggregation: {0}")]
    Aggregation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::Db(_) | AppError::Aggregation(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
