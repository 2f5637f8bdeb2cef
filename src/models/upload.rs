//! Confirmation returned to the client after a successful upload.

use serde::{Deserialize, Serialize};

/// What the gateway reports back once the store has accepted an upload.
///
/// Replaces the opaque store response the client used to receive with a
/// schema both sides can rely on.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfirmation {
    /// Key the payload was stored under (the uploaded filename).
    pub key: String,

    /// Number of bytes written.
    pub size: i64,

    /// Entity tag reported by the store, unquoted, when available.
    pub etag: Option<String>,
}
