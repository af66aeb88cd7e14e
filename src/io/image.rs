//! PNG preview of a scatter plan, tiles filled by the pass that seated them

use crate::algorithm::executor::PlacementPass;
use crate::io::error::{GalleryError, Result, file_system_error, invalid_parameter};
use crate::io::render::{CanvasInfo, ScatterTile};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);
const OUTLINE: Rgba<u8> = Rgba([32, 32, 32, 255]);

/// Fill colour for tiles seated by a pass
pub const fn pass_color(pass: PlacementPass) -> Rgba<u8> {
    match pass {
        PlacementPass::Override => Rgba([214, 69, 65, 255]),
        PlacementPass::JitteredGrid => Rgba([66, 133, 244, 255]),
        PlacementPass::RandomRetry => Rgba([244, 180, 0, 255]),
    }
}

/// Draw the canvas at `1 / downscale` resolution
///
/// # Errors
///
/// Returns an error if `downscale` is zero
pub fn render_preview(canvas: &CanvasInfo, tiles: &[ScatterTile], downscale: u32) -> Result<RgbaImage> {
    if downscale == 0 {
        return Err(invalid_parameter("downscale", &downscale, &"must be positive"));
    }
    let scale = downscale as i32;
    let width = (canvas.width / scale).max(1) as u32;
    let height = (canvas.height / scale).max(1) as u32;
    let mut img = ImageBuffer::from_pixel(width, height, BACKGROUND);

    for tile in tiles {
        let left = (tile.rect.x / scale).max(0) as u32;
        let top = (tile.rect.y / scale).max(0) as u32;
        let right = (tile.rect.right() / scale).max(0) as u32;
        let bottom = (tile.rect.bottom() / scale).max(0) as u32;
        let fill = pass_color(tile.pass);

        for y in top..bottom.min(height) {
            for x in left..right.min(width) {
                let edge = x == left || y == top || x + 1 == right || y + 1 == bottom;
                img.put_pixel(x, y, if edge { OUTLINE } else { fill });
            }
        }
    }

    Ok(img)
}

/// Write a preview PNG, creating the parent directory if needed
///
/// # Errors
///
/// Returns an error if:
/// - `downscale` is zero
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(
    canvas: &CanvasInfo,
    tiles: &[ScatterTile],
    downscale: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_preview(canvas, tiles, downscale)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    img.save(output_path).map_err(|e| GalleryError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}
