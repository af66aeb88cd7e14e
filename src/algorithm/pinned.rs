//! Rectangles for groups with a manual position override

use crate::io::override_store::OverrideForm;
use crate::io::size_cache::ImageSize;
use crate::spatial::geometry::{TileSize, clamp_origin};
use crate::spatial::layout::LayoutParameters;

/// Canvas rectangle an override pins a group to
///
/// The grid form sizes the tile to `col_span` cells wide with the natural
/// aspect ratio; the absolute form uses the regular display size. Gallery
/// variants shrink in both forms. Neither side exceeds the canvas, and the
/// origin is clamped so the tile stays on it. No collision test is involved.
pub fn pinned_rect(
    form: OverrideForm,
    natural: ImageSize,
    gallery_variant: bool,
    params: &LayoutParameters,
) -> ((i32, i32), TileSize) {
    match form {
        OverrideForm::Grid {
            col,
            row,
            col_span,
            offset_x,
            offset_y,
        } => {
            let cell = f64::from(params.cell_size);
            let width = params.floor_dim(col_span * cell);
            let height = if natural.width == 0 {
                params.min_tile_dim
            } else {
                params.floor_dim(
                    f64::from(natural.height) * (f64::from(width) / f64::from(natural.width)),
                )
            };
            let size = params.fit_canvas(shrink_if(TileSize::new(width, height), gallery_variant, params));

            let x = col.mul_add(cell, offset_x).round() as i32;
            let y = row.map_or(offset_y, |row| row.mul_add(cell, offset_y)).round() as i32;
            (clamp_to_canvas(x, y, size, params), size)
        }
        OverrideForm::Absolute { x, y } => {
            let size = params.fit_canvas(params.tile_size(natural.width, natural.height, gallery_variant));
            (
                clamp_to_canvas(x.round() as i32, y.round() as i32, size, params),
                size,
            )
        }
    }
}

fn shrink_if(size: TileSize, gallery_variant: bool, params: &LayoutParameters) -> TileSize {
    if gallery_variant {
        params.shrink_gallery_variant(size)
    } else {
        size
    }
}

fn clamp_to_canvas(x: i32, y: i32, size: TileSize, params: &LayoutParameters) -> (i32, i32) {
    (
        clamp_origin(x, size.width, params.canvas_width),
        clamp_origin(y, size.height, params.canvas_height),
    )
}
