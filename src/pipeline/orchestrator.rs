use sqlx::PgPool;

use crate::config::Config;
use crate::error::AppError;
use crate::storage::ReportStore;
use crate::telemetry::metrics::{REPORT_CSV_BYTES, REPORT_GENERATION_DURATION, REPORT_ROWS};

use super::{publish, render, retrieve};

/// Straight-through report pipeline: query, render, publish. Returns the
/// public download URL of the stored CSV. Every stage error propagates to the
/// handler's single error boundary.
#[tracing::instrument(
    name = "pipeline report",
    skip(pool, config),
    fields(report.rows, report.csv_bytes, report.duration_ms)
)]
pub async fn generate_report(pool: &PgPool, config: &Config) -> Result<String, AppError> {
    let start = std::time::Instant::now();

    // Stage 1: full result set from the warehouse
    let rows = retrieve::retrieve(pool).await?;

    // Stage 2: in-memory CSV document
    let document = render::render_csv(&rows)?;
    let csv_bytes = document.len();

    // Stage 3: bucket resolution happens here, not at startup, so a missing
    // BUCKET_NAME fails after the query exactly like any other publish error
    let store = ReportStore::from_config(config)?;
    let csv_url = publish::publish(&store, document).await?;

    let duration = start.elapsed();

    REPORT_GENERATION_DURATION.record(duration.as_secs_f64(), &[]);
    REPORT_ROWS.record(rows.len() as f64, &[]);
    REPORT_CSV_BYTES.record(csv_bytes as f64, &[]);

    let span = tracing::Span::current();
    span.record("report.rows", rows.len());
    span.record("report.csv_bytes", csv_bytes);
    span.record("report.duration_ms", duration.as_millis() as u64);

    tracing::info!(
        rows = rows.len(),
        csv_bytes,
        url = %csv_url,
        "Report generated"
    );

    Ok(csv_url)
}
