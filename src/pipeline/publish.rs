use chrono::NaiveDateTime;

use crate::error::AppError;
use crate::storage::ReportStore;

/// Key format for stored reports: `estoque_<YYYYMMDD>_<HHMMSS>.csv`, second
/// resolution. Two invocations within the same second collide and silently
/// overwrite; that case is accepted.
pub fn object_key(at: NaiveDateTime) -> String {
    format!("estoque_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Stage 3: store the CSV document as a new public object and return its
/// download URL. The write and the visibility call are two separate store
/// operations; a visibility failure after a successful write leaves the
/// object in place.
#[tracing::instrument(
    name = "pipeline_stage publish",
    skip(store, document),
    fields(pipeline.stage = "publish", report.object_key, report.csv_bytes = document.len())
)]
pub async fn publish(store: &ReportStore, document: String) -> Result<String, AppError> {
    let key = object_key(chrono::Local::now().naive_local());
    tracing::Span::current().record("report.object_key", key.as_str());

    store.upload(&key, document, "text/csv").await?;
    store.make_public(&key).await?;

    Ok(store.public_url(&key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ReportStore;
    use chrono::NaiveDate;
    use object_store::memory::InMemory;
    use std::sync::Arc;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_object_key_format() {
        let key = object_key(at(2025, 7, 14, 9, 5, 3));
        assert_eq!(key, "estoque_20250714_090503.csv");
    }

    #[test]
    fn test_object_key_is_zero_padded() {
        let key = object_key(at(2025, 1, 2, 0, 0, 0));
        assert_eq!(key, "estoque_20250102_000000.csv");
    }

    #[test]
    fn test_object_key_matches_contract_pattern() {
        let key = object_key(at(2025, 12, 31, 23, 59, 59));
        assert_eq!(key.len(), "estoque_YYYYMMDD_HHMMSS.csv".len());
        assert!(key.starts_with("estoque_"));
        assert!(key.ends_with(".csv"));
        let digits = &key["estoque_".len()..key.len() - ".csv".len()];
        assert!(
            digits
                .chars()
                .all(|c| c.is_ascii_digit() || c == '_')
        );
    }

    #[test]
    fn test_distinct_seconds_yield_distinct_keys() {
        let first = object_key(at(2025, 7, 14, 9, 5, 3));
        let second = object_key(at(2025, 7, 14, 9, 5, 4));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_publish_returns_public_url_for_stored_object() {
        let store = ReportStore::new(
            Arc::new(InMemory::new()),
            "relatorios".to_string(),
            "us-east-1".to_string(),
            None,
        );

        let url = publish(&store, "Produto,Loja,Estoque,DDV,Dias,Status\n".to_string())
            .await
            .unwrap();

        assert!(url.starts_with("https://relatorios.s3.us-east-1.amazonaws.com/estoque_"));
        assert!(url.ends_with(".csv"));
    }
}
