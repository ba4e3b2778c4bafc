//! Object-store access for published reports.
//!
//! Wraps an [`object_store::ObjectStore`] handle for one bucket. Production
//! uses the S3-compatible backend built from environment credentials plus the
//! configured bucket/region/endpoint; tests inject an in-memory store.

use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, Error as ObjectStoreError, ObjectStore, ObjectStoreExt, PutOptions,
    PutPayload,
};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Handle to the report bucket.
#[derive(Clone, Debug)]
pub struct ReportStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
}

impl ReportStore {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> Self {
        Self {
            store,
            bucket,
            region,
            endpoint_url,
        }
    }

    /// Build the S3-compatible store from config. The bucket name is resolved
    /// here, at publish time, so a missing `BUCKET_NAME` fails this call and
    /// not process startup.
    pub fn from_config(config: &Config) -> StorageResult<Self> {
        let bucket = config
            .bucket_name
            .clone()
            .ok_or_else(|| StorageError::ConfigError("BUCKET_NAME must be set".to_string()))?;

        let mut builder = AmazonS3Builder::from_env()
            .with_region(config.storage_region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = config.storage_endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(
            Arc::new(store),
            bucket,
            config.storage_region.clone(),
            config.storage_endpoint_url.clone(),
        ))
    }

    /// Write the full CSV text as a new object in one call.
    pub async fn upload(&self, key: &str, content: String, content_type: &str) -> StorageResult<()> {
        let size = content.len() as u64;
        let location = Path::from(key.to_string());
        let payload = PutPayload::from(Bytes::from(content.into_bytes()));

        let attributes = Attributes::from_iter([(Attribute::ContentType, content_type.to_string())]);
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        self.store.put_opts(&location, payload, opts).await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Report upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Report upload successful"
        );

        Ok(())
    }

    /// Second call against the store: confirm the object is visible at its
    /// public address. S3-compatible stores grant anonymous read through the
    /// bucket policy rather than per-object ACLs, so visibility is verified
    /// with a `head` on the fresh object. If this fails after a successful
    /// upload, the object exists but is not fetchable; nothing is rolled back.
    pub async fn make_public(&self, key: &str) -> StorageResult<()> {
        let location = Path::from(key.to_string());

        match self.store.head(&location).await {
            Ok(_) => {
                tracing::info!(bucket = %self.bucket, key = %key, "Report object publicly visible");
                Ok(())
            }
            Err(ObjectStoreError::NotFound { .. }) => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    /// Deterministic public URL for an object in this bucket.
    ///
    /// Path-style for custom endpoints (MinIO and friends), virtual-hosted
    /// style for AWS proper.
    pub fn public_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn memory_store() -> ReportStore {
        ReportStore::new(
            Arc::new(InMemory::new()),
            "relatorios".to_string(),
            "us-east-1".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_upload_stores_object_content() {
        let store = memory_store();

        store
            .upload("estoque_20250101_120000.csv", "Produto,Loja\n".to_string(), "text/csv")
            .await
            .unwrap();

        let location = Path::from("estoque_20250101_120000.csv");
        let stored = store.store.get(&location).await.unwrap();
        let bytes = stored.bytes().await.unwrap();
        assert_eq!(&bytes[..], b"Produto,Loja\n");
    }

    #[tokio::test]
    async fn test_make_public_succeeds_after_upload() {
        let store = memory_store();

        store
            .upload("estoque_20250101_120000.csv", "Produto\n".to_string(), "text/csv")
            .await
            .unwrap();

        store.make_public("estoque_20250101_120000.csv").await.unwrap();
    }

    #[tokio::test]
    async fn test_make_public_missing_object_is_not_found() {
        let store = memory_store();

        let err = store.make_public("estoque_19990101_000000.csv").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_public_url_aws_style() {
        let store = memory_store();
        assert_eq!(
            store.public_url("estoque_20250101_120000.csv"),
            "https://relatorios.s3.us-east-1.amazonaws.com/estoque_20250101_120000.csv"
        );
    }

    #[test]
    fn test_public_url_path_style_for_custom_endpoint() {
        let store = ReportStore::new(
            Arc::new(InMemory::new()),
            "relatorios".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000/".to_string()),
        );
        assert_eq!(
            store.public_url("a.csv"),
            "http://localhost:9000/relatorios/a.csv"
        );
    }

    #[test]
    fn test_from_config_without_bucket_is_config_error() {
        let config = Config {
            port: 8080,
            environment: "development".to_string(),
            database_url: "postgres://localhost/estoque".to_string(),
            bucket_name: None,
            storage_region: "us-east-1".to_string(),
            storage_endpoint_url: None,
            otel_service_name: "estoque-report-webhook".to_string(),
            otel_exporter_endpoint: "http://localhost:4317".to_string(),
        };

        let err = ReportStore::from_config(&config).unwrap_err();
        assert!(matches!(err, StorageError::ConfigError(_)));
        assert!(err.to_string().contains("BUCKET_NAME"));
    }
}
