use sqlx::PgPool;

use crate::db::stock::{StockRow, fetch_stock_levels};
use crate::error::AppError;

/// Stage 1: run the fixed stock query and wait for the full result set.
/// An empty result set is valid; the report is then header-only.
#[tracing::instrument(
    name = "pipeline_stage retrieve",
    skip(pool),
    fields(pipeline.stage = "retrieve", report.rows)
)]
pub async fn retrieve(pool: &PgPool) -> Result<Vec<StockRow>, AppError> {
    let rows = fetch_stock_levels(pool).await.map_err(AppError::Database)?;

    tracing::Span::current().record("report.rows", rows.len());

    Ok(rows)
}
