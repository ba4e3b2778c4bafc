use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::fulfillment::FulfillmentReply;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Single error boundary for the webhook: every failure, whatever the stage,
/// becomes an HTTP 500 carrying the error fulfillment envelope. The envelope
/// text embeds the error's description; the caller gets no finer taxonomy.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Report generation failed");

        let reply = FulfillmentReply::error(&self.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Json(reply)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_error_display() {
        let error = AppError::Csv("row has 5 fields".to_string());
        assert_eq!(error.to_string(), "CSV error: row has 5 fields");
    }

    #[test]
    fn test_storage_error_display_chains_description() {
        let error = AppError::from(StorageError::ConfigError("BUCKET_NAME must be set".into()));
        assert_eq!(
            error.to_string(),
            "Storage error: Configuration error: BUCKET_NAME must be set"
        );
    }

    #[test]
    fn test_every_variant_maps_to_500() {
        let errors = vec![
            AppError::Csv("bad".to_string()),
            AppError::Storage(StorageError::UploadFailed("timeout".to_string())),
            AppError::Database(sqlx::Error::RowNotFound),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_app_result_ok() {
        fn returns_ok() -> AppResult<i32> {
            Ok(42)
        }
        assert_eq!(returns_ok().unwrap(), 42);
    }
}
