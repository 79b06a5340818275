//! Storage objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type used when neither the object nor its listing declares one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// One entry of a bucket listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Object path within the bucket.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// Backend-specific metadata (size, mimetype, ...).
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl ObjectEntry {
    /// Create an entry for a real object.
    pub fn file(name: impl Into<String>, id: impl Into<String>, mimetype: Option<&str>) -> Self {
        let metadata = match mimetype {
            Some(mimetype) => serde_json::json!({ "mimetype": mimetype }),
            None => serde_json::json!({}),
        };
        Self {
            name: Some(name.into()),
            id: Some(id.into()),
            metadata: Some(metadata),
        }
    }

    /// Create a folder placeholder entry.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            id: None,
            metadata: None,
        }
    }

    /// The usable path of this entry, if any.
    pub fn path(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Folder markers carry neither metadata nor an id.
    pub fn is_placeholder(&self) -> bool {
        self.metadata.is_none() && self.id.is_none()
    }

    /// The content type recorded in the listing metadata.
    pub fn mimetype(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("mimetype"))
            .and_then(Value::as_str)
    }
}

/// Pick the upload content type: declared type, then fallback, then
/// [`DEFAULT_CONTENT_TYPE`]. Empty values count as absent.
pub fn resolve_content_type(declared: Option<&str>, fallback: Option<&str>) -> String {
    declared
        .filter(|t| !t.trim().is_empty())
        .or_else(|| fallback.filter(|t| !t.trim().is_empty()))
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}
