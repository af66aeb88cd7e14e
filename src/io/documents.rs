//! Best-effort loading of the gallery's JSON source documents

use serde_json::Value;
use std::path::Path;

/// Read and parse a JSON document, treating any failure as absence
///
/// Missing files and malformed JSON both yield `None`; the caller then
/// proceeds as if the source contributed zero records.
pub fn load_optional_json(path: &Path) -> Option<Value> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "source document unavailable");
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "source document is not valid JSON");
            None
        }
    }
}

/// The two catalogue documents a gallery is built from
#[derive(Debug, Clone, Default)]
pub struct SourceDocuments {
    /// Objects document
    pub primary: Option<Value>,
    /// Protest/event info document
    pub secondary: Option<Value>,
}

impl SourceDocuments {
    /// Load both documents; either may be absent
    pub fn load(primary: &Path, secondary: &Path) -> Self {
        Self {
            primary: load_optional_json(primary),
            secondary: load_optional_json(secondary),
        }
    }
}
