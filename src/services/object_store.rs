//! Object-store client: List/Get/Put against one configured bucket on an
//! S3-compatible endpoint. The `ObjectStore` trait is the seam the HTTP
//! handlers consume, so tests can swap the AWS-backed implementation for an
//! in-memory one.

use crate::{
    config::AppConfig,
    models::{object::ImageObject, upload::UploadConfirmation},
};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    Client,
    config::Region,
    error::DisplayErrorContext,
    primitives::ByteStream,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::{StreamExt, stream::BoxStream};
use std::{io, sync::Arc};
use thiserror::Error;
use tokio_util::io::ReaderStream;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("image `{key}` not found in bucket `{bucket}`")]
    NotFound { bucket: String, key: String },
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Lazy, finite, single-pass byte sequence produced by a download.
pub type ObjectBody = BoxStream<'static, io::Result<Bytes>>;

/// A fetched object ready to be piped to a response. The body is not
/// restartable; consuming it drains the underlying store connection.
pub struct ObjectDownload {
    /// Content type as reported by the store, if any.
    pub content_type: Option<String>,

    /// Payload length in bytes, when the store reports one.
    pub content_length: Option<i64>,

    /// The object bytes, streamed chunk by chunk.
    pub body: ObjectBody,
}

/// Store operations the gateway depends on.
///
/// All three calls address the single bucket the implementation was
/// configured with. `put_object` overwrites silently on key collision;
/// `list_objects` passes the store-native ordering through unchanged.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Return metadata for every object currently in the bucket.
    async fn list_objects(&self) -> StoreResult<Vec<ImageObject>>;

    /// Open `key` for reading. Fails with `NotFound` when absent.
    async fn get_object(&self, key: &str) -> StoreResult<ObjectDownload>;

    /// Store `body` under `key`, replacing any existing object.
    async fn put_object(
        &self,
        key: &str,
        content_type: Option<String>,
        body: Bytes,
    ) -> StoreResult<UploadConfirmation>;
}

/// Shared handle passed to every handler as router state.
pub type SharedStore = Arc<dyn ObjectStore>;

/// Production `ObjectStore` backed by the AWS SDK.
///
/// Credentials come from the SDK default provider chain; region, endpoint,
/// and path-style addressing come from [`AppConfig`] so the same binary
/// talks to LocalStack, MinIO, or real S3.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build the SDK client from the gateway configuration.
    pub async fn from_config(cfg: &AppConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .endpoint_url(cfg.endpoint.clone())
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(cfg.path_style)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: cfg.bucket.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_objects(&self) -> StoreResult<Vec<ImageObject>> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(format!("{}", DisplayErrorContext(&err))))?;

        let objects = output
            .contents()
            .iter()
            .map(|obj| ImageObject {
                key: obj.key().unwrap_or_default().to_string(),
                size: obj.size().unwrap_or(0),
                last_modified: obj
                    .last_modified()
                    .and_then(|ts| DateTime::from_timestamp(ts.secs(), ts.subsec_nanos()))
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            })
            .collect();

        Ok(objects)
    }

    async fn get_object(&self, key: &str) -> StoreResult<ObjectDownload> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let detail = format!("{}", DisplayErrorContext(&err));
                if err.into_service_error().is_no_such_key() {
                    StoreError::NotFound {
                        bucket: self.bucket.clone(),
                        key: key.to_string(),
                    }
                } else {
                    StoreError::Unavailable(detail)
                }
            })?;

        Ok(ObjectDownload {
            content_type: output.content_type().map(str::to_string),
            content_length: output.content_length(),
            body: ReaderStream::new(output.body.into_async_read()).boxed(),
        })
    }

    async fn put_object(
        &self,
        key: &str,
        content_type: Option<String>,
        body: Bytes,
    ) -> StoreResult<UploadConfirmation> {
        let size = body.len() as i64;
        let output = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(format!("{}", DisplayErrorContext(&err))))?;

        Ok(UploadConfirmation {
            key: key.to_string(),
            size,
            etag: output.e_tag().map(|tag| tag.trim_matches('"').to_string()),
        })
    }
}
