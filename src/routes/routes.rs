//! Defines routes for the image gateway.
//!
//! ## Structure
//! - `GET  /` — static client page
//! - `GET  /images` — list object metadata as JSON
//! - `GET  /images/{key}` — stream one object body
//! - `POST /images` — multipart upload (field `image`, ≤ 50 MiB)
//!
//! Health endpoints (`/healthz`, `/readyz`) are mounted alongside.

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        image_handlers::{MAX_UPLOAD_BYTES, get_image, list_images, upload_image},
    },
    services::object_store::SharedStore,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};
use tower_http::services::ServeFile;

/// Build and return the router for the gateway.
///
/// The router carries shared state (the `ObjectStore` handle) to all
/// handlers. The body limit rejects oversized uploads at the transport
/// layer, before any handler executes.
pub fn routes() -> Router<SharedStore> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // static client page
        .route_service("/", ServeFile::new("static/index.html"))
        // image routes
        .route("/images", get(list_images).post(upload_image))
        .route("/images/{key}", get(get_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
