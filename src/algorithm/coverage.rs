//! Reachability check for every catalogue object and the flat-grid fallback

use crate::algorithm::executor::PlacementOutcome;
use crate::analysis::normalize::GalleryItem;
use crate::io::configuration::{
    FLAT_GRID_CAPTION_HEIGHT, FLAT_GRID_COMPACT_IMAGE_HEIGHT, FLAT_GRID_COMPACT_VIEWPORT,
    FLAT_GRID_GAP, FLAT_GRID_IMAGE_HEIGHT, FLAT_GRID_MAX_WIDTH, FLAT_GRID_MIN_COLUMN,
    FLAT_GRID_PADDING,
};
use crate::io::links::link_for_item;
use serde::Serialize;
use std::collections::HashSet;

/// First item for each distinct object, keyed by id when present, else by source
pub fn distinct_objects(items: &[GalleryItem]) -> Vec<&GalleryItem> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| !item.src.is_empty())
        .filter(|item| seen.insert(item.object_key()))
        .collect()
}

/// How many objects a scatter layout makes reachable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Number of distinct objects
    pub total_objects: usize,
    /// Objects whose image source received a tile
    pub placed_objects: usize,
    /// Object keys left without a tile
    pub missing: Vec<String>,
}

impl CoverageReport {
    /// Whether every object is reachable from the scatter layout
    pub const fn is_complete(&self) -> bool {
        self.placed_objects >= self.total_objects
    }
}

/// Count objects whose source appears among the placed rectangles
///
/// A placed source covers every object using it, since the shared tile lists
/// all of them.
pub fn assess(items: &[GalleryItem], outcome: &PlacementOutcome) -> CoverageReport {
    let placed_srcs = outcome.placed_srcs();
    let objects = distinct_objects(items);
    let missing: Vec<String> = objects
        .iter()
        .filter(|item| !placed_srcs.contains(item.src.as_str()))
        .map(|item| item.object_key())
        .collect();

    CoverageReport {
        total_objects: objects.len(),
        placed_objects: objects.len() - missing.len(),
        missing,
    }
}

/// Position of a fallback tile in the reflowing grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowRect {
    /// Left edge relative to the page
    pub x: u32,
    /// Top edge relative to the page
    pub y: u32,
    /// Tile width
    pub width: u32,
    /// Tile height including caption
    pub height: u32,
}

/// One tile of the fallback grid, one per object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatTile {
    /// Object shown by the tile
    pub item: GalleryItem,
    /// Caption
    pub label: String,
    /// Navigation target
    pub href: String,
    /// Auto-flow position
    pub rect: FlowRect,
}

/// Column geometry of the fallback grid at a viewport width
///
/// Mirrors `repeat(auto-fill, minmax(180px, 1fr))` inside a padded container
/// of at most 1400 px content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatGridGeometry {
    /// Number of columns
    pub columns: u32,
    /// Width of each column
    pub column_width: u32,
    /// Height of each row, thumbnail plus caption
    pub row_height: u32,
}

impl FlatGridGeometry {
    /// Geometry for a viewport width
    pub fn for_viewport(viewport_width: u32) -> Self {
        let content = viewport_width
            .saturating_sub(2 * FLAT_GRID_PADDING)
            .min(FLAT_GRID_MAX_WIDTH)
            .max(FLAT_GRID_MIN_COLUMN);
        let columns = ((content + FLAT_GRID_GAP) / (FLAT_GRID_MIN_COLUMN + FLAT_GRID_GAP)).max(1);
        let column_width = (content - FLAT_GRID_GAP * (columns - 1)) / columns;
        let image_height = if viewport_width <= FLAT_GRID_COMPACT_VIEWPORT {
            FLAT_GRID_COMPACT_IMAGE_HEIGHT
        } else {
            FLAT_GRID_IMAGE_HEIGHT
        };
        Self {
            columns,
            column_width,
            row_height: image_height + FLAT_GRID_CAPTION_HEIGHT,
        }
    }

    /// Rectangle of the tile at a flow position
    pub const fn rect_at(&self, position: u32) -> FlowRect {
        let column = position % self.columns;
        let row = position / self.columns;
        FlowRect {
            x: FLAT_GRID_PADDING + column * (self.column_width + FLAT_GRID_GAP),
            y: FLAT_GRID_PADDING + row * (self.row_height + FLAT_GRID_GAP),
            width: self.column_width,
            height: self.row_height,
        }
    }
}

/// Lay out one tile per distinct object, each linking to its own page
pub fn flat_grid(items: &[GalleryItem], viewport_width: u32) -> Vec<FlatTile> {
    let geometry = FlatGridGeometry::for_viewport(viewport_width);
    distinct_objects(items)
        .into_iter()
        .zip(0u32..)
        .map(|(item, position)| FlatTile {
            label: item.label(),
            href: link_for_item(item),
            rect: geometry.rect_at(position),
            item: item.clone(),
        })
        .collect()
}
