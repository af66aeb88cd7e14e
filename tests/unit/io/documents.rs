//! Tests for best-effort source document loading

#[cfg(test)]
mod tests {
    use gallery_scatter::io::documents::{SourceDocuments, load_optional_json};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_document() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("data.json");
        fs::write(&path, r#"[{"id": "a"}]"#).expect("write document");

        let value = load_optional_json(&path).expect("document should load");
        assert!(value.is_array());
    }

    // Tests missing and malformed documents both count as absent
    #[test]
    fn test_missing_or_malformed_is_none() {
        let dir = TempDir::new().expect("temp dir");
        assert!(load_optional_json(&dir.path().join("missing.json")).is_none());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").expect("write document");
        assert!(load_optional_json(&broken).is_none());
    }

    #[test]
    fn test_source_documents_load_independently() {
        let dir = TempDir::new().expect("temp dir");
        let primary = dir.path().join("objects.json");
        fs::write(&primary, r#"{"objects": []}"#).expect("write document");

        let documents = SourceDocuments::load(&primary, &dir.path().join("info.json"));
        assert!(documents.primary.is_some());
        assert!(documents.secondary.is_none());
    }
}
