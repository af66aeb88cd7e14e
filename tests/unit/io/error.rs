//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use gallery_scatter::GalleryError;
    use gallery_scatter::io::error::{file_system_error, invalid_parameter};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system_error("/tmp/plan.json", "write plan", io_error);

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("write plan"));
        assert!(message.contains("/tmp/plan.json"));
    }

    // Tests InvalidParameter error contains all fields
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("spawn_probability", &1.5, &"must lie within [0, 1]");

        let message = error.to_string();
        assert!(message.contains("spawn_probability"));
        assert!(message.contains("1.5"));
        assert!(message.contains("must lie within [0, 1]"));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = GalleryError::ImageExport {
            path: PathBuf::from("/tmp/preview.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/tmp/preview.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated JSON");
        let error = GalleryError::from(json_error);

        assert!(matches!(error, GalleryError::Json { .. }));
        assert!(error.source().is_some());
    }
}
