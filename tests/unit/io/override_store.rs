//! Tests for manual override loading, layering, lookup and persistence

#[cfg(test)]
mod tests {
    use gallery_scatter::analysis::grouping::group_by_src;
    use gallery_scatter::analysis::normalize::{GalleryItem, SourceKind};
    use gallery_scatter::io::error::GalleryError;
    use gallery_scatter::io::override_store::{
        Override, OverrideDocument, OverrideForm, OverrideStore,
    };
    use std::fs;
    use tempfile::TempDir;

    fn item(id: Option<&str>, src: &str) -> GalleryItem {
        GalleryItem {
            id: id.map(str::to_string),
            title: String::new(),
            src: src.to_string(),
            source_kind: SourceKind::Primary,
            is_placeholder: false,
            from_gallery: false,
        }
    }

    #[test]
    fn test_form_interpretation() {
        let grid: Override = serde_json::from_str(r#"{"col": 3, "row": 2}"#).expect("parse");
        assert_eq!(
            grid.form(),
            Some(OverrideForm::Grid {
                col: 3.0,
                row: Some(2.0),
                col_span: 1.0,
                offset_x: 0.0,
                offset_y: 0.0,
            })
        );

        let absolute: Override = serde_json::from_str(r#"{"x": 10, "y": 20}"#).expect("parse");
        assert_eq!(absolute.form(), Some(OverrideForm::Absolute { x: 10.0, y: 20.0 }));

        // Neither shape
        let partial: Override = serde_json::from_str(r#"{"x": 10, "colSpan": 2}"#).expect("parse");
        assert_eq!(partial.form(), None);
    }

    #[test]
    fn test_grid_form_takes_precedence() {
        let both: Override =
            serde_json::from_str(r#"{"col": 1, "offsetY": 5, "x": 10, "y": 20}"#).expect("parse");
        assert!(matches!(
            both.form(),
            Some(OverrideForm::Grid {
                row: None,
                offset_y,
                ..
            }) if (offset_y - 5.0).abs() < f64::EPSILON
        ));
    }

    // Tests the local layer wins per key and other keys survive
    #[test]
    fn test_local_layer_wins() {
        let dir = TempDir::new().expect("temp dir");
        let checked_in = dir.path().join("manual_positions.json");
        let local = dir.path().join("local.json");
        fs::write(
            &checked_in,
            r#"{"byId": {"a": {"x": 1, "y": 1}, "b": {"x": 2, "y": 2}}, "bySrc": {}, "meta": {"v": 1}}"#,
        )
        .expect("write");
        fs::write(&local, r#"{"byId": {"a": {"col": 4, "row": 4}}}"#).expect("write");

        let store = OverrideStore::load(&checked_in, Some(&local));
        let document = store.document();
        let expected = Override {
            col: Some(4.0),
            row: Some(4.0),
            ..Override::default()
        };
        assert_eq!(document.by_id.get("a"), Some(&expected));
        assert_eq!(document.by_id.get("b"), Some(&Override::absolute(2.0, 2.0)));
        assert!(document.meta.contains_key("v"));
    }

    #[test]
    fn test_missing_or_malformed_documents_are_empty() {
        let dir = TempDir::new().expect("temp dir");
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").expect("write");

        assert!(OverrideDocument::load(&dir.path().join("missing.json")).is_empty());
        assert!(OverrideDocument::load(&broken).is_empty());
    }

    // Tests strict loading rejects a broken local layer but not a broken checked-in one
    #[test]
    fn test_strict_loading() {
        let dir = TempDir::new().expect("temp dir");
        let broken = dir.path().join("broken.json");
        let local = dir.path().join("local.json");
        fs::write(&broken, "{").expect("write");
        fs::write(&local, r#"{"bySrc": {"a.jpg": {"x": 4, "y": 8}}}"#).expect("write");

        let missing = OverrideDocument::load_strict(&dir.path().join("missing.json"))
            .expect("missing file is empty");
        assert!(missing.is_empty());
        assert!(matches!(
            OverrideDocument::load_strict(&broken),
            Err(GalleryError::Json { .. })
        ));

        let store = OverrideStore::load_strict(&broken, Some(&local)).expect("lenient base");
        assert_eq!(
            store.document().by_src.get("a.jpg"),
            Some(&Override::absolute(4.0, 8.0))
        );
        assert!(OverrideStore::load_strict(&local, Some(&broken)).is_err());
    }

    // Tests group lookup prefers any member id over the shared source
    #[test]
    fn test_group_lookup() {
        let mut document = OverrideDocument::default();
        document.by_id.insert("second".to_string(), Override::absolute(5.0, 5.0));
        document.by_src.insert("shared.jpg".to_string(), Override::absolute(9.0, 9.0));
        document.by_src.insert("other.jpg".to_string(), Override::absolute(7.0, 7.0));
        let store = OverrideStore::new(document);

        let groups = group_by_src(&[
            item(Some("first"), "shared.jpg"),
            item(Some("second"), "shared.jpg"),
            item(Some("third"), "other.jpg"),
        ]);
        assert_eq!(store.for_group(&groups[0]), Some(&Override::absolute(5.0, 5.0)));
        assert_eq!(store.for_group(&groups[1]), Some(&Override::absolute(7.0, 7.0)));

        assert_eq!(
            store.for_item(&item(Some("first"), "shared.jpg")),
            Some(&Override::absolute(9.0, 9.0))
        );
        assert_eq!(store.for_item(&item(None, "none.jpg")), None);
    }

    #[test]
    fn test_record_drop_snapped() {
        let mut store = OverrideStore::default();
        let groups = group_by_src(&[item(Some("a"), "s.jpg"), item(Some("b"), "s.jpg")]);

        let entry = store.record_drop(&groups[0], 1060, 690, 330, 350, true);
        assert_eq!(entry, Override::grid(3.0, 2.0, 1.0));
        assert_eq!(store.document().by_id.get("a"), Some(&entry));
        assert_eq!(store.document().by_id.get("b"), Some(&entry));
        assert!(store.document().by_src.is_empty());
    }

    #[test]
    fn test_record_drop_absolute_without_ids() {
        let mut store = OverrideStore::default();
        let groups = group_by_src(&[item(None, "anon.jpg")]);

        let entry = store.record_drop(&groups[0], 120, 45, 200, 350, false);
        assert_eq!(entry, Override::absolute(120.0, 45.0));
        assert_eq!(store.document().by_src.get("anon.jpg"), Some(&entry));
    }

    #[test]
    fn test_save_and_reset() {
        let dir = TempDir::new().expect("temp dir");
        let local = dir.path().join("local.json");
        let mut store = OverrideStore::default();
        let groups = group_by_src(&[item(Some("a"), "a.jpg")]);
        store.record_drop(&groups[0], 0, 0, 350, 350, true);

        store.save_local(&local).expect("save overrides");
        let reloaded = OverrideStore::load(&dir.path().join("none.json"), Some(&local));
        assert_eq!(reloaded.document().by_id.len(), 1);
        let text = fs::read_to_string(&local).expect("read");
        assert!(text.contains("\"byId\""));
        assert!(text.contains("\"colSpan\""));

        store.reset(&local).expect("reset overrides");
        assert!(store.document().is_empty());
        assert!(!local.exists());
        // Resetting again with no file is fine
        store.reset(&local).expect("reset without file");
    }
}
