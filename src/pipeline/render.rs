use crate::db::stock::StockRow;
use crate::error::AppError;

/// Header order is the contract; row fields must be written in exactly this
/// order.
pub const CSV_HEADER: [&str; 6] = ["Produto", "Loja", "Estoque", "DDV", "Dias", "Status"];

/// Stage 2: render the result set as a CSV document. One header line, then
/// one line per row in query order. Quoting only where a field requires it.
#[tracing::instrument(
    name = "pipeline_stage render",
    skip(rows),
    fields(pipeline.stage = "render", report.rows = rows.len(), report.csv_bytes)
)]
pub fn render_csv(rows: &[StockRow]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| AppError::Csv(e.to_string()))?;

    for row in rows {
        writer
            .write_record([
                row.produto.as_str(),
                row.loja.as_str(),
                &row.estoque.to_string(),
                &row.ddv.to_string(),
                &row.dias.to_string(),
                row.status.as_str(),
            ])
            .map_err(|e| AppError::Csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Csv(e.to_string()))?;
    let document = String::from_utf8(bytes).map_err(|e| AppError::Csv(e.to_string()))?;

    tracing::Span::current().record("report.csv_bytes", document.len());

    Ok(document)
}
