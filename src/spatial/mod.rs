//! Canvas geometry and grid partitioning
//!
//! This module contains spatial-related functionality including:
//! - Rectangles and the gap-expanded overlap test
//! - Breakpoint layout parameters and tile sizing
//! - The centre-ordered placement cell grid

/// Centre-ordered placement cells
pub mod cells;
/// Rectangles, clamping and collision tests
pub mod geometry;
/// Viewport breakpoints and tile sizing
pub mod layout;

pub use geometry::{PlacedRect, TileSize};
pub use layout::LayoutParameters;
