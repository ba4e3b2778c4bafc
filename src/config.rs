use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub database_url: String,
    /// Destination bucket for generated reports. Not validated at startup; a
    /// missing value surfaces as a publish error after the query already ran.
    pub bucket_name: Option<String>,
    pub storage_region: String,
    pub storage_endpoint_url: Option<String>,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("APP_PORT must be a number"),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bucket_name: env::var("BUCKET_NAME").ok(),
            storage_region: env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            storage_endpoint_url: env::var("STORAGE_ENDPOINT_URL").ok(),
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "estoque-report-webhook".to_string()),
            otel_exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 8080,
            environment: "development".to_string(),
            database_url: "postgres://localhost/estoque".to_string(),
            bucket_name: None,
            storage_region: "us-east-1".to_string(),
            storage_endpoint_url: None,
            otel_service_name: "estoque-report-webhook".to_string(),
            otel_exporter_endpoint: "http://localhost:4317".to_string(),
        }
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "production".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_bucket_name_is_optional() {
        let config = test_config();
        assert!(config.bucket_name.is_none());
    }
}
