//! Tests for argument parsing and the end-to-end gallery processor

#[cfg(test)]
mod tests {
    use clap::Parser;
    use gallery_scatter::io::cli::{Cli, GalleryProcessor};
    use gallery_scatter::io::render::GalleryPlan;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_gallery(dir: &Path) {
        fs::write(
            dir.join("protest_data.json"),
            r#"{"objects": [
                {"id": "o1", "title": "Banner", "image_filename": "banner.png"},
                {"id": "o2", "title": "Badge", "image_filename": "badge.png"},
                {"id": "o3", "title": "No photo"}
            ]}"#,
        )
        .expect("write data");
        fs::write(
            dir.join("protest_info.json"),
            r#"[{"id": "march", "title": "March", "images": ["banner.png"]}]"#,
        )
        .expect("write info");
        image::RgbaImage::new(400, 300)
            .save(dir.join("banner.png"))
            .expect("write png");
        image::RgbaImage::new(120, 240)
            .save(dir.join("badge.png"))
            .expect("write png");
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["scatter"]).expect("parse");
        assert_eq!(cli.target, PathBuf::from("."));
        assert_eq!(cli.viewports, vec![1440]);
        assert_eq!(cli.data, PathBuf::from("protest_data.json"));
        assert_eq!(cli.overrides, PathBuf::from("manual_positions.json"));
        assert!(cli.seed.is_none());
        assert!(cli.should_show_progress());
    }

    #[test]
    fn test_repeated_viewports() {
        let cli = Cli::try_parse_from(["scatter", "site", "-w", "1440", "--viewport", "800", "-q"])
            .expect("parse");
        assert_eq!(cli.viewports, vec![1440, 800]);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.in_target(Path::new("out.json")), PathBuf::from("site/out.json"));
    }

    #[test]
    fn test_zero_viewport_rejected() {
        assert!(Cli::try_parse_from(["scatter", "-w", "0"]).is_err());
    }

    #[test]
    fn test_schedule_flag() {
        let cli = Cli::try_parse_from(["scatter", "--no-batch-delay"]).expect("parse");
        assert!(cli.schedule().delay.is_zero());
        let default = Cli::try_parse_from(["scatter"]).expect("parse");
        assert!(!default.schedule().delay.is_zero());
    }

    // Tests a full run writes a plan, a preview and the size cache
    #[tokio::test]
    async fn test_process_writes_outputs() {
        let dir = TempDir::new().expect("temp dir");
        write_gallery(dir.path());
        let target = dir.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "scatter",
            target.as_str(),
            "--seed",
            "7",
            "--quiet",
            "--no-batch-delay",
            "--size-cache",
            "sizes.json",
            "--preview",
            "preview.png",
        ])
        .expect("parse");

        let plan = GalleryProcessor::new(cli).process().await.expect("process");

        // Three distinct images on a 5400 px canvas always fit
        let GalleryPlan::Scatter { tiles, .. } = &plan else {
            panic!("expected a scatter plan, got {plan:?}");
        };
        assert_eq!(tiles.len(), 3);
        let banner = tiles
            .iter()
            .find(|tile| tile.src == "banner.png")
            .expect("banner tile");
        assert_eq!(banner.count, 2);
        assert_eq!((banner.rect.width, banner.rect.height), (340, 255));

        assert!(dir.path().join("gallery_plan.json").exists());
        assert!(dir.path().join("preview.png").exists());
        let sizes = fs::read_to_string(dir.path().join("sizes.json")).expect("read cache");
        assert!(sizes.contains("badge.png"));
    }

    #[tokio::test]
    async fn test_process_empty_gallery() {
        let dir = TempDir::new().expect("temp dir");
        let target = dir.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["scatter", target.as_str(), "-q"]).expect("parse");

        let plan = GalleryProcessor::new(cli).process().await.expect("process");
        assert!(matches!(plan, GalleryPlan::Message { ref text } if text.starts_with("No images found")));
    }

    #[tokio::test]
    async fn test_invalid_spawn_probability() {
        let dir = TempDir::new().expect("temp dir");
        let target = dir.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["scatter", target.as_str(), "-q", "--spawn-probability", "2"])
            .expect("parse");

        assert!(GalleryProcessor::new(cli).process().await.is_err());
    }

    #[tokio::test]
    async fn test_strict_overrides_reject_broken_local_layer() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("local_positions.json"), "[1,").expect("write");
        let target = dir.path().to_string_lossy().to_string();
        let args = [
            "scatter",
            target.as_str(),
            "-q",
            "--local-overrides",
            "local_positions.json",
        ];

        let lenient = Cli::try_parse_from(args).expect("parse");
        assert!(GalleryProcessor::new(lenient).process().await.is_ok());

        let strict = Cli::try_parse_from(args.into_iter().chain(["--strict-overrides"])).expect("parse");
        assert!(strict.strict_overrides);
        assert!(GalleryProcessor::new(strict).process().await.is_err());
    }
}
