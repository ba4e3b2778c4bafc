use sqlx::PgPool;

/// One unified stock-level row. Field names match the warehouse columns;
/// `ddv` (dias de venda) is carried through opaquely.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StockRow {
    pub produto: String,
    pub loja: String,
    pub estoque: f64,
    pub ddv: f64,
    pub dias: f64,
    pub status: String,
}

/// Fixed, non-parameterized report query. Row order is whatever the engine
/// yields; no sort is applied.
#[tracing::instrument(name = "db.stock.fetch", skip(pool), fields(row_count))]
pub async fn fetch_stock_levels(pool: &PgPool) -> Result<Vec<StockRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, StockRow>(
        "SELECT produto, loja, \
                estoque::float8 AS estoque, \
                ddv::float8 AS ddv, \
                dias::float8 AS dias, \
                status \
         FROM estoque_unificado",
    )
    .fetch_all(pool)
    .await?;

    tracing::Span::current().record("row_count", rows.len());

    Ok(rows)
}
