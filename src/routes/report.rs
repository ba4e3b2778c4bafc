use axum::{Json, extract::State};

use crate::AppState;
use crate::error::AppResult;
use crate::fulfillment::FulfillmentReply;
use crate::pipeline;

/// Webhook entry point. The request body is ignored; the report is not
/// parameterized by request content. Errors from any pipeline stage fall
/// through to `AppError::into_response`, which emits the 500 error envelope.
pub async fn generate_csv_report(State(state): State<AppState>) -> AppResult<Json<FulfillmentReply>> {
    let csv_url = pipeline::generate_report(&state.pool, &state.config).await?;

    Ok(Json(FulfillmentReply::success(&csv_url)))
}
