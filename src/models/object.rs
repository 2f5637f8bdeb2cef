//! Represents one stored image, addressed by its key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a single image in the bucket.
///
/// The key doubles as the display filename. Content type is only resolved
/// on fetch, so listings carry none.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImageObject {
    /// Object key, unique within the bucket.
    pub key: String,

    /// Size in bytes.
    pub size: i64,

    /// Timestamp when the object was last written.
    pub last_modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_field_names() {
        let object = ImageObject {
            key: "cat.png".into(),
            size: 10240,
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json["key"], "cat.png");
        assert_eq!(json["size"], 10240);
        assert!(json.get("lastModified").is_some());
        assert!(json.get("last_modified").is_none());
    }
}
