/// Candidate positions inside a cell and on the open canvas
pub mod candidates;
/// Coverage check and flat-grid fallback
pub mod coverage;
/// Three-pass placement engine
pub mod executor;
/// Rectangles for manually positioned groups
pub mod pinned;
/// Cooperative batching of the grid pass
pub mod schedule;
/// Layout session with the relayout guard
pub mod session;
