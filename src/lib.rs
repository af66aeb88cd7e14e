//! Scatter layout engine for image gallery tiles
//!
//! Source records are normalised into gallery items, grouped by image, sized
//! from their natural aspect ratio and seated on a large canvas by a
//! centre-biased jittered grid with manual overrides. When stochastic
//! placement misses any object, a flat grid with one tile per object is
//! produced instead.

#![forbid(unsafe_code)]

/// Placement passes, coverage fallback and the layout session
pub mod algorithm;
/// Normalisation, placeholders and grouping of source records
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Randomness helpers for the placement passes
pub mod math;
/// Canvas geometry, layout parameters and the cell grid
pub mod spatial;

pub use io::error::{GalleryError, Result};
