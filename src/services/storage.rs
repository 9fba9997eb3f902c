//! S3 storage service for order attachments.
//!
//! Two buckets: order photographs and signed intake/consent documents.
//! Supports both AWS S3 and MinIO for development.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use tracing::info;

use crate::config::S3Config;
use crate::error::{AppError, AppResult};

/// Logical attachment bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Reference photographs uploaded with or after a submission.
    OrderImages,
    /// Signed intake/consent documents managed by staff.
    OrderForms,
}

/// Object store handle used by the attachment manager.
///
/// `Storage` is the S3-backed implementation; tests substitute a recording
/// store. URL resolution is a pure derivation, so it is not async.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        bucket: Bucket,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<()>;

    async fn remove(&self, bucket: Bucket, keys: &[String]) -> AppResult<()>;

    async fn list(&self, bucket: Bucket, prefix: &str) -> AppResult<Vec<String>>;

    fn public_url(&self, bucket: Bucket, key: &str) -> String;
}

/// S3 storage client wrapper.
#[derive(Clone)]
pub struct Storage {
    client: Client,
    images_bucket: String,
    forms_bucket: String,
    /// Base for public URL derivation (endpoint or regional AWS URL).
    public_base: String,
}

impl Storage {
    /// Create a new S3 storage client from configuration.
    pub async fn new(config: &S3Config) -> AppResult<Self> {
        let credentials =
            Credentials::new(&config.access_key, &config.secret_key, None, None, "tm");

        let region = Region::new(config.region.clone());

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials)
            .force_path_style(true); // Required for MinIO

        // Use custom endpoint for MinIO in development
        if let Some(ref endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let s3_config = s3_config_builder.build();
        let client = Client::from_conf(s3_config);

        let public_base = config
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", config.region))
            .trim_end_matches('/')
            .to_string();

        let storage = Self {
            client,
            images_bucket: config.images_bucket.clone(),
            forms_bucket: config.forms_bucket.clone(),
            public_base,
        };

        // Verify buckets exist or create them
        storage.ensure_bucket_exists(&storage.images_bucket).await?;
        storage.ensure_bucket_exists(&storage.forms_bucket).await?;

        info!(
            "S3 storage initialized: images_bucket={}, forms_bucket={}",
            config.images_bucket, config.forms_bucket
        );

        Ok(storage)
    }

    /// Ensure a bucket exists, creating it if necessary.
    async fn ensure_bucket_exists(&self, bucket: &str) -> AppResult<()> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    info!("Creating S3 bucket '{}'", bucket);
                    self.client
                        .create_bucket()
                        .bucket(bucket)
                        .send()
                        .await
                        .map_err(|e| {
                            AppError::Storage(format!("Failed to create bucket: {}", e))
                        })?;
                    Ok(())
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to access bucket '{}': {}",
                        bucket, service_error
                    )))
                }
            }
        }
    }

    /// Resolve the configured bucket name for a logical bucket.
    fn bucket_name(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::OrderImages => &self.images_bucket,
            Bucket::OrderForms => &self.forms_bucket,
        }
    }

    /// Get the content type for a file based on its extension.
    pub fn content_type_for_extension(ext: &str) -> &'static str {
        match ext.to_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "heic" => "image/heic",
            "svg" => "image/svg+xml",
            "pdf" => "application/pdf",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }

    /// Build the object key for an order photograph.
    pub fn photograph_key(order_id: &str, file_name: &str) -> String {
        format!("{}/{}", order_id, file_name)
    }

    /// Build the object key for a signed document. The timestamp keeps
    /// superseded documents from colliding with their replacement.
    pub fn form_key(order_id: &str, kind: &str, timestamp_millis: i64) -> String {
        format!("{}/{}_form_{}", order_id, kind, timestamp_millis)
    }
}

#[async_trait]
impl ObjectStore for Storage {
    /// Upload an object.
    async fn upload(
        &self,
        bucket: Bucket,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from(data);
        let mut request = self
            .client
            .put_object()
            .bucket(self.bucket_name(bucket))
            .key(key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload object to S3: {}", e)))?;

        Ok(())
    }

    /// Remove objects by key.
    async fn remove(&self, bucket: Bucket, keys: &[String]) -> AppResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut objects = Vec::with_capacity(keys.len());
        for key in keys {
            let identifier = ObjectIdentifier::builder()
                .key(key)
                .build()
                .map_err(|e| AppError::Storage(format!("Invalid object key '{}': {}", key, e)))?;
            objects.push(identifier);
        }

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| AppError::Storage(format!("Failed to build delete request: {}", e)))?;

        self.client
            .delete_objects()
            .bucket(self.bucket_name(bucket))
            .delete(delete)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to remove objects from S3: {}", e)))?;

        Ok(())
    }

    /// List object names (final path component) under a prefix.
    async fn list(&self, bucket: Bucket, prefix: &str) -> AppResult<Vec<String>> {
        let mut names = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(self.bucket_name(bucket))
                .prefix(prefix);

            if let Some(token) = continuation_token.take() {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                AppError::Storage(format!("Failed to list objects in S3: {}", e))
            })?;

            for object in response.contents() {
                if let Some(key) = object.key() {
                    let name = key.rsplit('/').next().unwrap_or(key);
                    if !name.is_empty() {
                        names.push(name.to_string());
                    }
                }
            }

            match response.next_continuation_token() {
                Some(token) => continuation_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(names)
    }

    /// Deterministic public URL: `{base}/{bucket}/{key}`, no network call.
    fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket_name(bucket), key)
    }
}
