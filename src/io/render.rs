//! Render sinks and the serialisable gallery plan

use crate::algorithm::coverage::{FlatTile, FlowRect};
use crate::algorithm::executor::{PlacementOutcome, PlacementPass};
use crate::analysis::grouping::Group;
use crate::io::error::{Result, file_system_error};
use crate::io::links::link_for_item;
use crate::spatial::geometry::PlacedRect;
use crate::spatial::layout::LayoutParameters;
use serde::Serialize;
use std::path::Path;

/// Receives the finished layout; rendering never feeds back into placement
pub trait RenderSink {
    /// Show a single text message instead of any tiles
    fn show_message(&mut self, text: &str);

    /// Show the scatter canvas
    fn render_scatter(&mut self, params: &LayoutParameters, tiles: &[ScatterTile]);

    /// Show the flat fallback grid
    fn render_flat_grid(&mut self, tiles: &[FlatTile]);
}

/// A placed group as the scatter view draws it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterTile {
    /// Image source
    pub src: String,
    /// Caption of the representative item
    pub title: String,
    /// Navigation target of the representative item
    pub href: String,
    /// Number of objects sharing the image
    pub count: usize,
    /// Ids of the objects sharing the image
    pub member_ids: Vec<String>,
    /// Overlay entries as `(label, url)` when the image is shared
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub member_links: Vec<(String, String)>,
    /// Canvas rectangle
    pub rect: PlacedRect,
    /// Pass that seated the tile
    pub pass: PlacementPass,
}

/// Pair each placement with its group to form drawable tiles
pub fn scatter_tiles(groups: &[Group], outcome: &PlacementOutcome) -> Vec<ScatterTile> {
    outcome
        .placements
        .iter()
        .filter_map(|placement| {
            let group = groups.get(placement.group_index)?;
            let member_links = if group.count() > 1 {
                group.member_links()
            } else {
                Vec::new()
            };
            Some(ScatterTile {
                src: group.src.clone(),
                title: group.representative.title.clone(),
                href: link_for_item(&group.representative),
                count: group.count(),
                member_ids: group.member_ids(),
                member_links,
                rect: placement.rect.clone(),
                pass: placement.pass,
            })
        })
        .collect()
}

/// Canvas description of a scatter plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanvasInfo {
    /// Canvas width in pixels
    pub width: i32,
    /// Canvas height in pixels
    pub height: i32,
    /// Cell edge length
    pub cell_size: i32,
    /// Key deciding whether a relayout is needed
    pub layout_key: String,
}

impl From<&LayoutParameters> for CanvasInfo {
    fn from(params: &LayoutParameters) -> Self {
        Self {
            width: params.canvas_width,
            height: params.canvas_height,
            cell_size: params.cell_size,
            layout_key: params.layout_key(),
        }
    }
}

/// Fallback tile as written to the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatPlanTile {
    /// Object id, when the object has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Caption
    pub title: String,
    /// Image source
    pub src: String,
    /// Navigation target
    pub href: String,
    /// Auto-flow position
    pub rect: FlowRect,
}

impl From<&FlatTile> for FlatPlanTile {
    fn from(tile: &FlatTile) -> Self {
        Self {
            id: tile.item.id.clone(),
            title: tile.label.clone(),
            src: tile.item.src.clone(),
            href: tile.href.clone(),
            rect: tile.rect,
        }
    }
}

/// Everything the page would show for one layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum GalleryPlan {
    /// No tiles, only a message
    Message {
        /// Message text
        text: String,
    },
    /// Scatter canvas with placed tiles
    Scatter {
        /// Canvas geometry
        canvas: CanvasInfo,
        /// Placed tiles in placement order
        tiles: Vec<ScatterTile>,
    },
    /// Flat grid with one tile per object
    FlatGrid {
        /// Tiles in flow order
        tiles: Vec<FlatPlanTile>,
    },
}

impl GalleryPlan {
    /// Number of tiles in the plan
    pub fn tile_count(&self) -> usize {
        match self {
            Self::Message { .. } => 0,
            Self::Scatter { tiles, .. } => tiles.len(),
            Self::FlatGrid { tiles } => tiles.len(),
        }
    }

    /// Write the plan as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the file write fails
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| file_system_error(path, "write plan", e))
    }
}

/// Sink that keeps every plan it receives
#[derive(Debug, Default)]
pub struct PlanRecorder {
    plans: Vec<GalleryPlan>,
}

impl PlanRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All plans in the order received
    pub fn plans(&self) -> &[GalleryPlan] {
        &self.plans
    }

    /// Most recent plan
    pub fn last(&self) -> Option<&GalleryPlan> {
        self.plans.last()
    }

    /// Consume the recorder, keeping the most recent plan
    pub fn into_last(self) -> Option<GalleryPlan> {
        self.plans.into_iter().next_back()
    }
}

impl RenderSink for PlanRecorder {
    fn show_message(&mut self, text: &str) {
        self.plans.push(GalleryPlan::Message {
            text: text.to_string(),
        });
    }

    fn render_scatter(&mut self, params: &LayoutParameters, tiles: &[ScatterTile]) {
        self.plans.push(GalleryPlan::Scatter {
            canvas: CanvasInfo::from(params),
            tiles: tiles.to_vec(),
        });
    }

    fn render_flat_grid(&mut self, tiles: &[FlatTile]) {
        self.plans.push(GalleryPlan::FlatGrid {
            tiles: tiles.iter().map(FlatPlanTile::from).collect(),
        });
    }
}
