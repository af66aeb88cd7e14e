//! Source record preprocessing: normalization, placeholders and grouping

/// Deduplication and grouping by image source
pub mod grouping;
/// Conversion of raw documents into gallery items
pub mod normalize;
/// Inline SVG placeholders for entries without a photo
pub mod placeholder;

pub use grouping::Group;
pub use normalize::{GalleryItem, Normalizer, SourceKind};
