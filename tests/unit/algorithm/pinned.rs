//! Tests for rectangles of manually positioned groups

#[cfg(test)]
mod tests {
    use gallery_scatter::algorithm::pinned::pinned_rect;
    use gallery_scatter::io::override_store::OverrideForm;
    use gallery_scatter::io::size_cache::ImageSize;
    use gallery_scatter::spatial::geometry::TileSize;
    use gallery_scatter::spatial::layout::LayoutParameters;

    fn grid(col: f64, row: Option<f64>, col_span: f64, offset_x: f64, offset_y: f64) -> OverrideForm {
        OverrideForm::Grid {
            col,
            row,
            col_span,
            offset_x,
            offset_y,
        }
    }

    // Tests grid units map to cells and width follows the span
    #[test]
    fn test_grid_form() {
        let params = LayoutParameters::for_viewport(1440);
        let natural = ImageSize::new(800, 400);

        let (origin, size) = pinned_rect(grid(2.0, Some(3.0), 1.0, 10.0, -5.0), natural, false, &params);
        assert_eq!(origin, (710, 1045));
        assert_eq!(size, TileSize::new(350, 175));

        let (_, wide) = pinned_rect(grid(0.0, Some(0.0), 2.0, 0.0, 0.0), natural, false, &params);
        assert_eq!(wide, TileSize::new(700, 350));
    }

    #[test]
    fn test_grid_form_without_row_uses_offset() {
        let params = LayoutParameters::for_viewport(1440);
        let (origin, _) = pinned_rect(
            grid(1.0, None, 1.0, 0.0, 90.0),
            ImageSize::new(100, 100),
            false,
            &params,
        );
        assert_eq!(origin, (350, 90));
    }

    // Tests the origin is clamped so the tile stays on the canvas
    #[test]
    fn test_grid_form_clamped() {
        let params = LayoutParameters::for_viewport(1440);
        let (origin, size) = pinned_rect(
            grid(40.0, Some(-3.0), 1.0, 0.0, 0.0),
            ImageSize::new(100, 100),
            false,
            &params,
        );
        assert_eq!(origin, (5400 - size.width, 0));
    }

    #[test]
    fn test_grid_form_gallery_variant() {
        let params = LayoutParameters::for_viewport(1440);
        let (_, size) = pinned_rect(grid(0.0, Some(0.0), 1.0, 0.0, 0.0), ImageSize::new(100, 100), true, &params);
        assert_eq!(size, TileSize::new(245, 245));
    }

    #[test]
    fn test_absolute_form() {
        let params = LayoutParameters::for_viewport(1440);
        let natural = ImageSize::new(1000, 500);

        let (origin, size) = pinned_rect(OverrideForm::Absolute { x: 120.4, y: 80.6 }, natural, false, &params);
        assert_eq!(origin, (120, 81));
        assert_eq!(size, TileSize::new(340, 170));

        let (_, shrunk) = pinned_rect(OverrideForm::Absolute { x: 0.0, y: 0.0 }, natural, true, &params);
        assert_eq!(shrunk, TileSize::new(238, 119));

        let (clamped, _) = pinned_rect(OverrideForm::Absolute { x: -50.0, y: 9000.0 }, natural, false, &params);
        assert_eq!(clamped, (0, 5400 - 170));
    }

    // Tests spans and aspect ratios far beyond the canvas are capped to it
    #[test]
    fn test_oversized_tiles_fit_canvas() {
        let params = LayoutParameters::for_viewport(1440);

        let (origin, size) = pinned_rect(grid(2.0, Some(2.0), 1e12, 0.0, 0.0), ImageSize::new(800, 400), false, &params);
        assert_eq!(size, TileSize::new(5400, 2700));
        assert_eq!(origin, (0, 700));

        let (origin, size) = pinned_rect(grid(1.0, Some(1.0), 1.0, 0.0, 0.0), ImageSize::new(10, u32::MAX), false, &params);
        assert_eq!(size, TileSize::new(350, 5400));
        assert_eq!(origin, (350, 0));
    }
}
