//! Input documents, persistence, rendering and the command-line surface

/// Command-line arguments and the batch processor
pub mod cli;
/// Tunable constants
pub mod configuration;
/// Loading of the primary and secondary source documents
pub mod documents;
/// Error types
pub mod error;
/// PNG preview export
pub mod image;
/// Navigation URLs for items
pub mod links;
/// Manual position overrides
pub mod override_store;
/// Progress bars for layout runs
pub mod progress;
/// Render sinks and gallery plans
pub mod render;
/// Persistent image size memo
pub mod size_cache;
/// Natural image size resolution
pub mod size_oracle;
