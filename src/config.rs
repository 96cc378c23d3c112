//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `WRITEIT__*` environment variables (`__` separates nested keys, e.g.
//! `WRITEIT__DATABASE__MONGODB_URI`).

use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// Which implementation backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Mongo,
    #[default]
    Memory,
}

/// Which implementation backs media blob storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    #[default]
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "writeit=info,tower_http=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: DatabaseBackend,
    pub mongodb_uri: String,
    pub mongodb_database: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::default(),
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_database: "writeit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for MinIO / LocalStack.
    pub s3_endpoint: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            s3_bucket: "writeit-media".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path` (if the file exists) and the environment.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("WRITEIT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| AppError::Internal(format!("Invalid configuration: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| AppError::Internal(format!("Invalid configuration: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_memory_backends() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.database.mongodb_database, "writeit");
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.storage.s3_region, "us-east-1");
        assert_eq!(config.logging.filter, "writeit=info,tower_http=info");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_str(
            r###"{ "database": { "backend": "mongo" }, "storage": { "s3_endpoint": "http://minio:9000" } }"###,
        )
        .unwrap();
        assert_eq!(config.database.backend, DatabaseBackend::Mongo);
        assert_eq!(config.database.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.storage.s3_endpoint.as_deref(), Some("http://minio:9000"));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }
}
