//! Natural-size resolution with a timeout and a success-only memo

use crate::analysis::placeholder::{PLACEHOLDER_PREFIX, is_inline_svg};
use crate::io::configuration::{DEFAULT_NATURAL_SIZE, SIZE_RESOLUTION_TIMEOUT};
use crate::io::links::decode_uri_component;
use crate::io::size_cache::{CacheStats, ImageSize, SizeCache};
use regex::Regex;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

/// Measures the natural size of an image source
///
/// `None` means the source could not be measured; the oracle never caches it.
pub trait SizeResolver {
    /// Resolve the natural size of `src`
    fn resolve(&self, src: &str) -> impl Future<Output = Option<ImageSize>>;
}

/// Memoizing front for a [`SizeResolver`]
///
/// Each uncached resolution is bounded by a timeout. Only successes are
/// stored, so a source that failed or timed out is retried on the next call.
pub struct SizeOracle<R> {
    resolver: R,
    cache: SizeCache,
    timeout: Duration,
    /// Cache performance statistics
    pub stats: CacheStats,
}

impl<R: SizeResolver> SizeOracle<R> {
    /// Create an oracle with an empty cache and the default timeout
    pub fn new(resolver: R) -> Self {
        Self::with_cache(resolver, SizeCache::new())
    }

    /// Create an oracle seeded from a previously saved cache
    pub fn with_cache(resolver: R, cache: SizeCache) -> Self {
        Self {
            resolver,
            cache,
            timeout: SIZE_RESOLUTION_TIMEOUT,
            stats: CacheStats::default(),
        }
    }

    /// Replace the per-resolution timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Current memo contents
    pub const fn cache(&self) -> &SizeCache {
        &self.cache
    }

    /// Resolve a natural size, or `None` after an error or the timeout
    pub async fn resolve(&mut self, src: &str) -> Option<ImageSize> {
        if let Some(size) = self.cache.get(src) {
            self.stats.hits += 1;
            return Some(size);
        }
        self.stats.misses += 1;

        match tokio::time::timeout(self.timeout, self.resolver.resolve(src)).await {
            Ok(Some(size)) => {
                self.cache.insert(src, size);
                Some(size)
            }
            Ok(None) => {
                tracing::debug!(src = %short_src(src), "image size unavailable");
                None
            }
            Err(_elapsed) => {
                tracing::debug!(src = %short_src(src), timeout = ?self.timeout, "image size timed out");
                None
            }
        }
    }

    /// Resolve a natural size, substituting the default square on failure
    pub async fn resolve_or_default(&mut self, src: &str) -> ImageSize {
        self.resolve(src)
            .await
            .unwrap_or(ImageSize::new(DEFAULT_NATURAL_SIZE, DEFAULT_NATURAL_SIZE))
    }
}

fn short_src(src: &str) -> &str {
    if is_inline_svg(src) { "<inline svg>" } else { src }
}

/// Resolves sources against a local directory
///
/// Raster headers are read on a blocking thread with the `image` crate.
/// SVG files and inline SVG data URLs are measured from their root element.
/// Remote `http(s)` sources cannot be measured offline.
#[derive(Debug, Clone)]
pub struct FileSizeResolver {
    base_dir: PathBuf,
}

impl FileSizeResolver {
    /// Resolve relative sources against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn local_path(&self, src: &str) -> PathBuf {
        let trimmed = src.split(['?', '#']).next().unwrap_or(src);
        self.base_dir.join(decode_uri_component(trimmed))
    }
}

impl SizeResolver for FileSizeResolver {
    fn resolve(&self, src: &str) -> impl Future<Output = Option<ImageSize>> {
        async move {
            if let Some(encoded) = src.strip_prefix(PLACEHOLDER_PREFIX) {
                return svg_dimensions(&decode_uri_component(encoded));
            }
            if src.starts_with("http://") || src.starts_with("https://") {
                return None;
            }

            let path = self.local_path(src);
            if has_svg_extension(&path) {
                let text = tokio::task::spawn_blocking(move || std::fs::read_to_string(path))
                    .await
                    .ok()?
                    .ok()?;
                return svg_dimensions(&text);
            }

            let (width, height) =
                tokio::task::spawn_blocking(move || image::image_dimensions(&path))
                    .await
                    .ok()?
                    .ok()?;
            Some(ImageSize::new(width, height))
        }
    }
}

/// Resolves sources from a fixed in-memory table
#[derive(Debug, Clone, Default)]
pub struct TableSizeResolver {
    sizes: HashMap<String, ImageSize>,
}

impl TableSizeResolver {
    /// Create a resolver answering from `sizes`
    pub const fn new(sizes: HashMap<String, ImageSize>) -> Self {
        Self { sizes }
    }
}

impl FromIterator<(String, ImageSize)> for TableSizeResolver {
    fn from_iter<I: IntoIterator<Item = (String, ImageSize)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl SizeResolver for TableSizeResolver {
    fn resolve(&self, src: &str) -> impl Future<Output = Option<ImageSize>> {
        std::future::ready(self.sizes.get(src).copied())
    }
}

fn has_svg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

static SVG_ROOT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)<svg\b([^>]*)>").ok());
static SVG_WIDTH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)width\s*=\s*['"]\s*([0-9]+(?:\.[0-9]+)?)\s*(?:px)?\s*['"]"#).ok());
static SVG_HEIGHT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)height\s*=\s*['"]\s*([0-9]+(?:\.[0-9]+)?)\s*(?:px)?\s*['"]"#).ok());
static SVG_VIEWBOX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)viewBox\s*=\s*['"]\s*[-0-9.]+[\s,]+[-0-9.]+[\s,]+([0-9.]+)[\s,]+([0-9.]+)"#)
        .ok()
});

/// Natural size of an SVG document from its root `width`/`height`, else its `viewBox`
pub fn svg_dimensions(svg: &str) -> Option<ImageSize> {
    let attributes = SVG_ROOT
        .as_ref()?
        .captures(svg)?
        .get(1)?
        .as_str()
        .to_string();

    let attribute = |pattern: &LazyLock<Option<Regex>>| -> Option<u32> {
        let value = pattern.as_ref()?.captures(&attributes)?.get(1)?.as_str();
        parse_dimension(value)
    };

    if let (Some(width), Some(height)) = (attribute(&SVG_WIDTH), attribute(&SVG_HEIGHT)) {
        return Some(ImageSize::new(width, height));
    }

    let view_box = SVG_VIEWBOX.as_ref()?.captures(&attributes)?;
    let width = parse_dimension(view_box.get(1)?.as_str())?;
    let height = parse_dimension(view_box.get(2)?.as_str())?;
    Some(ImageSize::new(width, height))
}

fn parse_dimension(value: &str) -> Option<u32> {
    let parsed: f64 = value.parse().ok()?;
    (parsed.is_finite() && parsed >= 1.0).then(|| parsed.round() as u32)
}
