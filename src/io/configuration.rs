//! Layout constants and runtime configuration defaults

use std::time::Duration;

// Size oracle
/// Upper bound on a single natural-size resolution
pub const SIZE_RESOLUTION_TIMEOUT: Duration = Duration::from_secs(10);
/// Natural size assumed when an image cannot be measured
pub const DEFAULT_NATURAL_SIZE: u32 = 200;

// Tile sizing
/// Scale applied to groups drawn only from multi-photo gallery fields
pub const GALLERY_VARIANT_SCALE: f64 = 0.7;

// Jittered grid pass
/// Number of jittered candidates tried after the centred one
pub const JITTER_SAMPLES: usize = 12;
/// Fraction of the jitter radius lost by the final sample
pub const JITTER_FALLOFF: f64 = 0.6;
/// Minimum Manhattan radius of the synchronously processed centre cells
pub const MIN_INITIAL_RADIUS: usize = 2;
/// Cells processed between cooperative pauses
pub const BATCH_SIZE: usize = 12;
/// Length of the cooperative pause between batches
pub const BATCH_DELAY: Duration = Duration::from_millis(40);

// Random retry pass
/// Uniformly random positions tried per leftover group
pub const MAX_RETRY_ATTEMPTS: usize = 200;

// Viewport handling
/// Narrowest viewport the breakpoint table distinguishes
pub const MIN_VIEWPORT_WIDTH: u32 = 320;
/// Quiet period callers should wait after the last resize before relaying out
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(180);

// Flat grid fallback
/// Minimum column width of the fallback grid
pub const FLAT_GRID_MIN_COLUMN: u32 = 180;
/// Gap between fallback tiles
pub const FLAT_GRID_GAP: u32 = 12;
/// Maximum content width of the fallback grid
pub const FLAT_GRID_MAX_WIDTH: u32 = 1400;
/// Padding around the fallback grid
pub const FLAT_GRID_PADDING: u32 = 10;
/// Thumbnail height in the fallback grid
pub const FLAT_GRID_IMAGE_HEIGHT: u32 = 140;
/// Thumbnail height on narrow viewports
pub const FLAT_GRID_COMPACT_IMAGE_HEIGHT: u32 = 110;
/// Viewport width at or below which compact thumbnails are used
pub const FLAT_GRID_COMPACT_VIEWPORT: u32 = 520;
/// Height of the caption row under each fallback thumbnail
pub const FLAT_GRID_CAPTION_HEIGHT: u32 = 34;

// Placeholders
/// Width of synthesized placeholder images
pub const PLACEHOLDER_WIDTH: u32 = 640;
/// Height of synthesized placeholder images
pub const PLACEHOLDER_HEIGHT: u32 = 360;

// Navigation targets
/// Page showing a primary catalogue object
pub const OBJECT_DETAIL_PAGE: &str = "object-detail.html";
/// Page showing a secondary protest/event entry
pub const PROTEST_PAGE: &str = "protest.html";

/// Message surfaced when neither source yields any item
pub const NO_IMAGES_MESSAGE: &str = "No images found. If you opened this page via file:// your \
browser blocks fetch(); serve the folder over HTTP (eg. python3 -m http.server 8000) and open \
http://localhost:8000/welcome.html.";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Default file names
/// Checked-in manual position document
pub const DEFAULT_MANUAL_POSITIONS: &str = "manual_positions.json";
/// Primary objects document
pub const DEFAULT_DATA_DOCUMENT: &str = "protest_data.json";
/// Secondary info document
pub const DEFAULT_INFO_DOCUMENT: &str = "protest_info.json";
/// Default viewport width when none is given
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1440;
/// Default size cache file
pub const DEFAULT_SIZE_CACHE: &str = "image_sizes.json";
/// Default plan output file
pub const DEFAULT_PLAN_OUTPUT: &str = "gallery_plan.json";
/// Canvas pixels per preview pixel
pub const PREVIEW_DOWNSCALE: u32 = 6;
