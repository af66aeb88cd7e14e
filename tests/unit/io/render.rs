//! Tests for scatter tiles, gallery plans and the recording sink

#[cfg(test)]
mod tests {
    use gallery_scatter::algorithm::coverage::flat_grid;
    use gallery_scatter::algorithm::executor::{Placement, PlacementOutcome, PlacementPass};
    use gallery_scatter::analysis::grouping::group_by_src;
    use gallery_scatter::analysis::normalize::{GalleryItem, SourceKind};
    use gallery_scatter::io::render::{GalleryPlan, PlanRecorder, RenderSink, scatter_tiles};
    use gallery_scatter::spatial::geometry::{PlacedRect, TileSize};
    use gallery_scatter::spatial::layout::LayoutParameters;
    use tempfile::TempDir;

    fn item(id: &str, src: &str) -> GalleryItem {
        GalleryItem {
            id: Some(id.to_string()),
            title: format!("Title {id}"),
            src: src.to_string(),
            source_kind: SourceKind::Secondary,
            is_placeholder: false,
            from_gallery: false,
        }
    }

    fn outcome_for(group_indices: &[usize], srcs: &[&str]) -> PlacementOutcome {
        let placements = group_indices
            .iter()
            .zip(srcs)
            .zip(0..)
            .map(|((&group_index, src), offset)| Placement {
                group_index,
                rect: PlacedRect::new(offset * 500, 0, TileSize::new(200, 150), *src),
                pass: PlacementPass::JitteredGrid,
            })
            .collect();
        PlacementOutcome {
            params: LayoutParameters::for_viewport(1440),
            placements,
            unplaced: Vec::new(),
        }
    }

    // Tests shared images list every member and single ones do not
    #[test]
    fn test_scatter_tiles() {
        let groups = group_by_src(&[item("1", "a.jpg"), item("2", "a.jpg"), item("3", "b.jpg")]);
        let tiles = scatter_tiles(&groups, &outcome_for(&[0, 1], &["a.jpg", "b.jpg"]));

        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].count, 2);
        assert_eq!(tiles[0].href, "protest.html?id=1");
        assert_eq!(tiles[0].member_ids, vec!["1", "2"]);
        assert_eq!(tiles[0].member_links.len(), 2);
        assert_eq!(tiles[1].count, 1);
        assert!(tiles[1].member_links.is_empty());
        assert_eq!(tiles[1].title, "Title 3");
    }

    #[test]
    fn test_recorder_keeps_plans_in_order() {
        let params = LayoutParameters::for_viewport(1440);
        let groups = group_by_src(&[item("1", "a.jpg")]);
        let tiles = scatter_tiles(&groups, &outcome_for(&[0], &["a.jpg"]));

        let mut recorder = PlanRecorder::new();
        recorder.show_message("nothing");
        recorder.render_scatter(&params, &tiles);
        recorder.render_flat_grid(&flat_grid(&[item("1", "a.jpg"), item("2", "b.jpg")], 1440));

        assert_eq!(recorder.plans().len(), 3);
        assert_eq!(recorder.plans()[0].tile_count(), 0);
        assert_eq!(recorder.plans()[1].tile_count(), 1);
        assert!(matches!(recorder.last(), Some(GalleryPlan::FlatGrid { tiles }) if tiles.len() == 2));
    }

    // Tests the JSON plan is tagged by view
    #[test]
    fn test_plan_json_shape() {
        let params = LayoutParameters::for_viewport(1440);
        let groups = group_by_src(&[item("1", "a.jpg")]);
        let mut recorder = PlanRecorder::new();
        recorder.render_scatter(&params, &scatter_tiles(&groups, &outcome_for(&[0], &["a.jpg"])));
        let plan = recorder.into_last().expect("a plan was recorded");

        let value = serde_json::to_value(&plan).expect("serialize plan");
        assert_eq!(value["view"], "scatter");
        assert_eq!(value["canvas"]["width"], 5400);
        assert_eq!(value["canvas"]["layout_key"], "5400-350");
        assert_eq!(value["tiles"][0]["src"], "a.jpg");
        assert_eq!(value["tiles"][0]["pass"], "jittered_grid");
        assert_eq!(value["tiles"][0]["rect"]["width"], 200);

        let message = serde_json::to_value(GalleryPlan::Message {
            text: "hello".to_string(),
        })
        .expect("serialize message");
        assert_eq!(message["view"], "message");
        assert_eq!(message["text"], "hello");
    }

    #[test]
    fn test_flat_plan_tiles() {
        let mut recorder = PlanRecorder::new();
        recorder.render_flat_grid(&flat_grid(&[item("9", "z.jpg")], 800));
        let value = serde_json::to_value(recorder.last()).expect("serialize plan");

        assert_eq!(value["view"], "flat_grid");
        assert_eq!(value["tiles"][0]["id"], "9");
        assert_eq!(value["tiles"][0]["href"], "protest.html?id=9");
        assert_eq!(value["tiles"][0]["title"], "Title 9");
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("plan.json");
        let plan = GalleryPlan::Message {
            text: "empty".to_string(),
        };
        plan.write_json(&path).expect("write plan");

        let text = std::fs::read_to_string(&path).expect("read plan");
        assert!(text.contains("\"view\": \"message\""));
        assert!(plan.write_json(&dir.path().join("missing/plan.json")).is_err());
    }
}
