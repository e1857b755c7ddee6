//! S3-backed object store.
//!
//! Credentials come from the ambient provider chain; region, endpoint, and
//! addressing style come from [`StorageSettings`]. A custom endpoint with
//! path-style addressing points the store at a MinIO-style local stack.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use trendpipe_core::StorageSettings;

use crate::error::StorageError;
use crate::store::ObjectStore;

/// [`ObjectStore`] implementation over the S3 API.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Create a client from storage settings and the ambient credential chain.
    pub async fn connect(settings: &StorageSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()));
        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint.as_str());
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if settings.force_path_style {
            builder = builder.force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        debug!(region = %settings.region, "S3 object store initialized");
        Self { client }
    }

    /// Wrap an already-built SDK client (used by callers that manage their
    /// own AWS config).
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix);
            if let Some(token) = continuation.take() {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                StorageError::Backend(format!(
                    "failed to list {bucket}/{prefix}: {}",
                    e.into_service_error()
                ))
            })?;

            for object in response.contents() {
                if let Some(key) = object.key() {
                    keys.push(key.to_string());
                }
            }

            match response.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(keys)
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    StorageError::NotFound(format!("{bucket}/{key}"))
                } else {
                    StorageError::Backend(format!(
                        "failed to get {bucket}/{key}: {service_error}"
                    ))
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend(format!("failed to read body of {bucket}/{key}: {e}")))?;

        Ok(data.into_bytes().to_vec())
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data));
        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request.send().await.map_err(|e| {
            StorageError::Backend(format!(
                "failed to put {bucket}/{key}: {}",
                e.into_service_error()
            ))
        })?;

        Ok(())
    }

    async fn copy(
        &self,
        bucket: &str,
        src_key: &str,
        dest_key: &str,
    ) -> Result<(), StorageError> {
        self.client
            .copy_object()
            .bucket(bucket)
            .copy_source(format!("{bucket}/{src_key}"))
            .key(dest_key)
            .send()
            .await
            .map_err(|e| {
                StorageError::Backend(format!(
                    "failed to copy {bucket}/{src_key} to {dest_key}: {}",
                    e.into_service_error()
                ))
            })?;

        Ok(())
    }
}
