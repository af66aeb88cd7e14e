//! Candidate generation and collision-aware seating for automatic placement

use crate::io::configuration::{JITTER_FALLOFF, JITTER_SAMPLES};
use crate::math::random::{RandomSelector, jitter_factor};
use crate::spatial::geometry::{PlacedRect, TileSize, clamp_origin, collides};
use crate::spatial::layout::LayoutParameters;

/// Top-left position that centres a tile inside a cell
pub const fn centred_in_cell(cell_x: i32, cell_y: i32, cell_size: i32, size: TileSize) -> (i32, i32) {
    (
        cell_x + cell_size / 2 - size.width / 2,
        cell_y + cell_size / 2 - size.height / 2,
    )
}

/// Candidate origins for one cell: the centred position, then jittered samples
///
/// Sample `s` is offset by up to `jitter_radius * jitter_factor(s)` on each
/// axis, so early samples roam widely and later ones tighten on the centre.
pub fn cell_candidates(
    centre: (i32, i32),
    params: &LayoutParameters,
    selector: &mut RandomSelector,
) -> Vec<(i32, i32)> {
    let mut candidates = Vec::with_capacity(JITTER_SAMPLES + 1);
    candidates.push(centre);
    let radius = f64::from(params.jitter_radius);
    for sample in 0..JITTER_SAMPLES {
        let reach = radius * jitter_factor(sample, JITTER_SAMPLES, JITTER_FALLOFF);
        let dx = selector.jitter(reach);
        let dy = selector.jitter(reach);
        candidates.push((centre.0 + dx, centre.1 + dy));
    }
    candidates
}

/// Seat a tile in a cell, trying each candidate in order
///
/// Every candidate is clamped inside the canvas before the collision test.
/// Returns `None` when all candidates conflict with placed tiles.
pub fn seat_in_cell(
    cell_origin: (i32, i32),
    size: TileSize,
    params: &LayoutParameters,
    placed: &[PlacedRect],
    selector: &mut RandomSelector,
) -> Option<(i32, i32)> {
    let centre = centred_in_cell(cell_origin.0, cell_origin.1, params.cell_size, size);
    cell_candidates(centre, params, selector)
        .into_iter()
        .map(|(x, y)| {
            (
                clamp_origin(x, size.width, params.canvas_width),
                clamp_origin(y, size.height, params.canvas_height),
            )
        })
        .find(|&(x, y)| !collides(x, y, size, placed, params.gap))
}

/// Seat a tile at uniformly random canvas positions
///
/// Positions are drawn from `[0, canvas - size)` on each axis, up to
/// `attempts` times; the first one clear of every placed tile wins.
pub fn seat_randomly(
    size: TileSize,
    params: &LayoutParameters,
    placed: &[PlacedRect],
    selector: &mut RandomSelector,
    attempts: usize,
) -> Option<(i32, i32)> {
    (0..attempts)
        .map(|_| {
            let x = selector.below(params.canvas_width - size.width);
            let y = selector.below(params.canvas_height - size.height);
            (x, y)
        })
        .find(|&(x, y)| !collides(x, y, size, placed, params.gap))
}
