//! Breakpoint-driven canvas parameters and tile sizing

use crate::io::configuration::{GALLERY_VARIANT_SCALE, MIN_VIEWPORT_WIDTH};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::geometry::TileSize;
use serde::Serialize;

/// Canvas and tile constants for one viewport breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutParameters {
    /// Canvas width in pixels
    pub canvas_width: i32,
    /// Canvas height in pixels
    pub canvas_height: i32,
    /// Side of one placement cell
    pub cell_size: i32,
    /// Nominal column count of the breakpoint
    pub canvas_cols: i32,
    /// Longest side a tile may be scaled to
    pub max_tile_dim: i32,
    /// Floor applied to each tile dimension
    pub min_tile_dim: i32,
    /// Minimum separation between automatically placed tiles
    pub gap: i32,
    /// Largest jitter offset from a cell centre
    pub jitter_radius: i32,
    /// Probability that a cell attempts to spawn a tile
    pub spawn_probability: f64,
}

impl LayoutParameters {
    /// Parameters for a viewport width
    ///
    /// Four fixed tuples, selected by breakpoint and never interpolated.
    pub const fn for_viewport(viewport_width: u32) -> Self {
        let width = if viewport_width < MIN_VIEWPORT_WIDTH {
            MIN_VIEWPORT_WIDTH
        } else {
            viewport_width
        };

        if width >= 1400 {
            Self::breakpoint(5400, 350, 36, 340, 56, 56, 150, 0.95)
        } else if width >= 1000 {
            Self::breakpoint(4800, 320, 30, 300, 48, 48, 140, 0.92)
        } else if width >= 700 {
            Self::breakpoint(3600, 260, 24, 260, 40, 40, 120, 0.9)
        } else {
            Self::breakpoint(2400, 180, 12, 180, 36, 28, 80, 0.85)
        }
    }

    const fn breakpoint(
        canvas: i32,
        cell_size: i32,
        canvas_cols: i32,
        max_tile_dim: i32,
        min_tile_dim: i32,
        gap: i32,
        jitter_radius: i32,
        spawn_probability: f64,
    ) -> Self {
        Self {
            canvas_width: canvas,
            canvas_height: canvas,
            cell_size,
            canvas_cols,
            max_tile_dim,
            min_tile_dim,
            gap,
            jitter_radius,
            spawn_probability,
        }
    }

    /// Copy with a different spawn probability
    ///
    /// # Errors
    ///
    /// Returns an error if the probability lies outside `[0, 1]`
    pub fn with_spawn_probability(self, spawn_probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&spawn_probability) {
            return Err(invalid_parameter(
                "spawn_probability",
                &spawn_probability,
                &"must lie within [0, 1]",
            ));
        }
        Ok(Self {
            spawn_probability,
            ..self
        })
    }

    /// Check that a hand-built parameter set can drive a layout pass
    ///
    /// # Errors
    ///
    /// Returns an error naming the first dimension that is not positive,
    /// or a tile floor larger than the tile ceiling
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("cell_size", self.cell_size),
            ("max_tile_dim", self.max_tile_dim),
            ("min_tile_dim", self.min_tile_dim),
        ] {
            if value <= 0 {
                return Err(invalid_parameter(name, &value, &"must be positive"));
            }
        }
        if self.min_tile_dim > self.max_tile_dim {
            return Err(invalid_parameter(
                "min_tile_dim",
                &self.min_tile_dim,
                &format!("exceeds max_tile_dim {}", self.max_tile_dim),
            ));
        }
        if self.gap < 0 || self.jitter_radius < 0 {
            return Err(invalid_parameter(
                "gap",
                &self.gap,
                &"gap and jitter radius must not be negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(invalid_parameter(
                "spawn_probability",
                &self.spawn_probability,
                &"must lie within [0, 1]",
            ));
        }
        Ok(())
    }

    /// Key identifying layouts that would place tiles identically
    pub fn layout_key(&self) -> String {
        format!("{}-{}", self.canvas_width, self.cell_size)
    }

    /// Fit a natural image size into the tile bounds
    ///
    /// Scales uniformly so the longer side is at most `max_tile_dim`, then
    /// floors each side at `min_tile_dim`. The floor may distort the aspect
    /// ratio of very thin images.
    pub fn display_size(&self, natural_width: u32, natural_height: u32) -> TileSize {
        if natural_width == 0 || natural_height == 0 {
            return TileSize::new(self.min_tile_dim, self.min_tile_dim);
        }
        let longest = f64::from(natural_width.max(natural_height));
        let scale = (f64::from(self.max_tile_dim) / longest).min(1.0);
        TileSize::new(
            self.floor_dim(f64::from(natural_width) * scale),
            self.floor_dim(f64::from(natural_height) * scale),
        )
    }

    /// Shrink a gallery-variant tile, keeping the dimension floor
    pub fn shrink_gallery_variant(&self, size: TileSize) -> TileSize {
        TileSize::new(
            self.floor_dim(f64::from(size.width) * GALLERY_VARIANT_SCALE),
            self.floor_dim(f64::from(size.height) * GALLERY_VARIANT_SCALE),
        )
    }

    /// Size of an automatically placed tile for a group
    pub fn tile_size(&self, natural_width: u32, natural_height: u32, gallery_variant: bool) -> TileSize {
        let size = self.display_size(natural_width, natural_height);
        if gallery_variant {
            self.shrink_gallery_variant(size)
        } else {
            size
        }
    }

    /// Cap each side of a tile at the canvas extent
    pub fn fit_canvas(&self, size: TileSize) -> TileSize {
        TileSize::new(
            size.width.min(self.canvas_width),
            size.height.min(self.canvas_height),
        )
    }

    pub(crate) fn floor_dim(&self, value: f64) -> i32 {
        let ceiling = self.canvas_width.max(self.canvas_height).max(self.min_tile_dim);
        (value.round() as i32).clamp(self.min_tile_dim, ceiling)
    }
}
