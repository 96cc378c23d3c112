use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::StorageSettings;
use crate::error::AppError;

/// Trait for blob storage of uploaded media (S3-compatible).
///
/// Abstracted as a trait so development and tests can run without S3.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Upload content to the given key.
    async fn put_object(
        &self,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError>;

    /// Retrieve content by key. Returns `None` if the object doesn't exist.
    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;
}

/// S3 implementation of StorageClient.
pub struct S3StorageClient {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3StorageClient {
    /// Create a client from the `storage` configuration section.
    ///
    /// Credentials come from the usual AWS sources (environment, profile).
    /// A custom `s3_endpoint` enables MinIO / LocalStack with path-style URLs.
    pub async fn from_settings(settings: &StorageSettings) -> Result<Self, AppError> {
        if settings.s3_bucket.is_empty() {
            return Err(AppError::Storage("storage.s3_bucket not set".into()));
        }

        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(settings.s3_region.clone()));

        if let Some(endpoint) = &settings.s3_endpoint {
            config_loader = config_loader.endpoint_url(endpoint);
        }

        let sdk_config = config_loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.s3_endpoint.is_some())
            .build();

        Ok(Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: settings.s3_bucket.clone(),
        })
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn put_object(
        &self,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(content.into())
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to put object '{}': {}", key, e)))?;

        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => {
                let bytes = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| AppError::Storage(format!("Failed to read body: {}", e)))?;
                Ok(Some(bytes.into_bytes().to_vec()))
            }
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to get object '{}': {}",
                        key, service_err
                    )))
                }
            }
        }
    }
}

/// Process-local StorageClient for the `memory` storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorageClient {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorageClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageClient for MemoryStorageClient {
    async fn put_object(
        &self,
        key: &str,
        content: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), AppError> {
        self.objects.write().await.insert(key.to_string(), content);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.objects.read().await.get(key).cloned())
    }
}
