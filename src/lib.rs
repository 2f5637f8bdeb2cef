//! HTTP image gateway backed by an S3-compatible object store.
//!
//! Translates three HTTP operations (list, fetch, upload) into object-store
//! calls against a single configured bucket, streaming download bodies and
//! mapping store outcomes to HTTP semantics.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
