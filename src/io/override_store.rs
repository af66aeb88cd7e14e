//! Manual position overrides: loading, layering, lookup and persistence
//!
//! Overrides come from a checked-in `manual_positions.json` and a local
//! document written by the layout editor. Both share the shape
//! `{ "byId": {..}, "bySrc": {..}, "meta": {..} }`; on a key conflict the
//! local entry wins.

use crate::analysis::grouping::Group;
use crate::analysis::normalize::GalleryItem;
use crate::io::error::{GalleryError, Result, file_system_error};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// One stored override entry as it appears in JSON
///
/// Entries carrying neither a `col` nor both `x` and `y` are kept on disk
/// but ignored by placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Override {
    /// Grid column of the tile's left edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<f64>,
    /// Grid row of the tile's top edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<f64>,
    /// Tile width in cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<f64>,
    /// Pixel nudge added to the grid x position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    /// Pixel nudge added to the grid y position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    /// Absolute left edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Absolute top edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Placement directive an [`Override`] resolves to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideForm {
    /// Position in grid units; width spans `col_span` cells
    Grid {
        /// Grid column
        col: f64,
        /// Grid row, or `None` to use `offset_y` alone
        row: Option<f64>,
        /// Width in cells
        col_span: f64,
        /// Horizontal pixel nudge
        offset_x: f64,
        /// Vertical pixel nudge
        offset_y: f64,
    },
    /// Absolute canvas position
    Absolute {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
    },
}

impl Override {
    /// Grid-unit override spanning `col_span` cells
    pub const fn grid(col: f64, row: f64, col_span: f64) -> Self {
        Self {
            col: Some(col),
            row: Some(row),
            col_span: Some(col_span),
            offset_x: None,
            offset_y: None,
            x: None,
            y: None,
        }
    }

    /// Absolute pixel override
    pub const fn absolute(x: f64, y: f64) -> Self {
        Self {
            col: None,
            row: None,
            col_span: None,
            offset_x: None,
            offset_y: None,
            x: Some(x),
            y: Some(y),
        }
    }

    /// Interpret the entry; the grid form takes precedence
    pub fn form(&self) -> Option<OverrideForm> {
        if let Some(col) = self.col {
            return Some(OverrideForm::Grid {
                col,
                row: self.row,
                col_span: self.col_span.unwrap_or(1.0),
                offset_x: self.offset_x.unwrap_or(0.0),
                offset_y: self.offset_y.unwrap_or(0.0),
            });
        }
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(OverrideForm::Absolute { x, y }),
            _ => None,
        }
    }
}

/// The override document shape shared by the checked-in and local layers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideDocument {
    /// Overrides keyed by item id
    #[serde(default)]
    pub by_id: BTreeMap<String, Override>,
    /// Overrides keyed by image source
    #[serde(default)]
    pub by_src: BTreeMap<String, Override>,
    /// Free-form metadata, carried through untouched
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl OverrideDocument {
    /// Parse a document, treating absence or malformed JSON as empty
    pub fn load(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&text).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "ignoring malformed override document");
            Self::default()
        })
    }

    /// Parse a document, failing on malformed JSON
    ///
    /// A missing file is still an empty document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load_strict(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(file_system_error(path, "read overrides", e)),
        };
        serde_json::from_str(&text).map_err(|source| GalleryError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer `other` on top of `self`, entry by entry
    pub fn merge(&mut self, other: Self) {
        self.by_id.extend(other.by_id);
        self.by_src.extend(other.by_src);
        self.meta.extend(other.meta);
    }

    /// Whether no override is defined
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.by_src.is_empty()
    }
}

/// Merged overrides plus the location edits are persisted to
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    document: OverrideDocument,
}

impl OverrideStore {
    /// Wrap an already merged document
    pub const fn new(document: OverrideDocument) -> Self {
        Self { document }
    }

    /// Load the checked-in document and layer the local one over it
    pub fn load(checked_in: &Path, local: Option<&Path>) -> Self {
        let mut document = OverrideDocument::load(checked_in);
        if let Some(local_path) = local {
            document.merge(OverrideDocument::load(local_path));
        }
        tracing::debug!(
            by_id = document.by_id.len(),
            by_src = document.by_src.len(),
            "loaded manual overrides"
        );
        Self { document }
    }

    /// As [`Self::load`], but a malformed local document is an error
    ///
    /// The checked-in layer stays lenient.
    ///
    /// # Errors
    ///
    /// Returns an error if the local document exists but cannot be read or parsed
    pub fn load_strict(checked_in: &Path, local: Option<&Path>) -> Result<Self> {
        let mut document = OverrideDocument::load(checked_in);
        if let Some(local_path) = local {
            document.merge(OverrideDocument::load_strict(local_path)?);
        }
        Ok(Self { document })
    }

    /// Merged document
    pub const fn document(&self) -> &OverrideDocument {
        &self.document
    }

    /// Override for a single item: by id first, then by source
    pub fn for_item(&self, item: &GalleryItem) -> Option<&Override> {
        item.id
            .as_ref()
            .and_then(|id| self.document.by_id.get(id))
            .or_else(|| self.document.by_src.get(&item.src))
    }

    /// Override for a group: the first member id with an entry, then the shared source
    pub fn for_group(&self, group: &Group) -> Option<&Override> {
        group
            .members
            .iter()
            .filter_map(|item| item.id.as_ref())
            .find_map(|id| self.document.by_id.get(id))
            .or_else(|| self.document.by_src.get(&group.src))
    }

    /// Record where a tile was dropped in the layout editor
    ///
    /// With `snap` the drop is stored in grid units (`col`, `row`, `colSpan`),
    /// otherwise as absolute pixels. The entry is written for every member id
    /// so other objects sharing the image are not moved by accident; groups
    /// without ids are keyed by source.
    pub fn record_drop(
        &mut self,
        group: &Group,
        left: i32,
        top: i32,
        width: i32,
        cell_size: i32,
        snap: bool,
    ) -> Override {
        let entry = if snap {
            let cell = f64::from(cell_size.max(1));
            Override::grid(
                (f64::from(left) / cell).round().max(0.0),
                (f64::from(top) / cell).round().max(0.0),
                (f64::from(width) / cell).round().max(1.0),
            )
        } else {
            Override::absolute(f64::from(left), f64::from(top))
        };

        let ids = group.member_ids();
        if ids.is_empty() {
            self.document.by_src.insert(group.src.clone(), entry.clone());
        } else {
            for id in ids {
                self.document.by_id.insert(id, entry.clone());
            }
        }
        entry
    }

    /// Drop every override
    pub fn clear(&mut self) {
        self.document = OverrideDocument::default();
    }

    /// Write the merged document to the local layer
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written
    pub fn save_local(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.document)?;
        std::fs::write(path, text).map_err(|e| file_system_error(path, "write overrides", e))
    }

    /// Clear all overrides and delete the local layer
    ///
    /// # Errors
    ///
    /// Returns an error if the local file exists but cannot be removed
    pub fn reset(&mut self, local: &Path) -> Result<()> {
        self.clear();
        match std::fs::remove_file(local) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(file_system_error(local, "remove overrides", e)),
        }
    }
}
