//! HTTP handlers for the image routes.
//! Streams download bodies to avoid buffering in memory and delegates all
//! storage concerns to the configured `ObjectStore`.

use crate::{
    errors::AppError,
    models::{object::ImageObject, upload::UploadConfirmation},
    services::object_store::{ObjectDownload, SharedStore, StoreError},
};
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};

/// Largest accepted upload payload. Enforced at the router so oversized
/// requests are refused by the transport before any handler runs.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Multipart field that carries the image payload.
const UPLOAD_FIELD: &str = "image";

/// GET `/images` — metadata for every object in the bucket, store order.
pub async fn list_images(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<ImageObject>>, AppError> {
    let objects = store
        .list_objects()
        .await
        .map_err(|err| store_failure(err, "Error listing images"))?;

    Ok(Json(objects))
}

/// GET `/images/{key}` — stream one object back to the client.
///
/// Headers are written before the first body chunk; once streaming has
/// begun an upstream read failure aborts the transfer instead of
/// pretending the truncated payload was complete.
pub async fn get_image(
    State(store): State<SharedStore>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let download = store
        .get_object(&key)
        .await
        .map_err(|err| store_failure(err, "Error retrieving image"))?;

    Ok(download_response(download))
}

/// POST `/images` — ingest a multipart upload and forward it to the store.
///
/// Expects a field named `image` with a declared filename; the filename
/// becomes the object key, so an existing key is overwritten. Requests
/// without such a field are rejected before any store call is made.
pub async fn upload_image(
    State(store): State<SharedStore>,
    mut multipart: Multipart,
) -> Result<Json<UploadConfirmation>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_failure)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            // A nameless part cannot become an object key.
            break;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_failure)?;

        let confirmation = store
            .put_object(&filename, content_type, data)
            .await
            .map_err(|err| store_failure(err, "Error uploading image"))?;

        return Ok(Json(confirmation));
    }

    Err(AppError::new(StatusCode::BAD_REQUEST, "No file uploaded."))
}

/// Build the streaming response for a download, propagating the
/// store-reported content type and length.
fn download_response(download: ObjectDownload) -> Response {
    let mut response = Response::new(Body::from_stream(download.body));
    let headers = response.headers_mut();

    let content_type = download
        .content_type
        .unwrap_or_else(|| "application/octet-stream".into());
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );

    if let Some(length) = download.content_length {
        if let Ok(value) = HeaderValue::from_str(&length.to_string()) {
            headers.insert(header::CONTENT_LENGTH, value);
        }
    }

    response
}

/// Map a store failure onto the response contract: missing keys are the
/// client's problem (404), everything else means the store is out of
/// reach (503, detail logged server-side only).
fn store_failure(err: StoreError, message: &'static str) -> AppError {
    match err {
        StoreError::NotFound { .. } => AppError::not_found(err.to_string()),
        StoreError::Unavailable(detail) => {
            tracing::error!("{}: {}", message, detail);
            AppError::unavailable(message)
        }
    }
}

/// Surface a malformed or over-limit multipart body with the status the
/// transport layer assigned to it (413 for oversized payloads).
fn multipart_failure(err: MultipartError) -> AppError {
    AppError::new(err.status(), err.body_text())
}
