//! Long-lived layout state: items, overrides, size memo and the relayout guard

use crate::algorithm::coverage::{FlatTile, assess, flat_grid};
use crate::algorithm::executor::{PlacementEngine, PlacementOutcome};
use crate::algorithm::schedule::BatchSchedule;
use crate::analysis::grouping::build_groups;
use crate::analysis::normalize::{GalleryItem, Normalizer};
use crate::io::configuration::{MAX_RETRY_ATTEMPTS, NO_IMAGES_MESSAGE};
use crate::io::documents::SourceDocuments;
use crate::io::error::{Result, invalid_parameter};
use crate::io::override_store::OverrideStore;
use crate::io::render::{RenderSink, scatter_tiles};
use crate::io::size_oracle::{SizeOracle, SizeResolver};
use crate::spatial::layout::LayoutParameters;
use indicatif::ProgressBar;

/// What a call to [`PlacementSession::place_all`] produced
#[derive(Debug, Clone)]
pub enum LayoutRun {
    /// No items; the sink was shown the empty-gallery message
    NoImages,
    /// Same layout key as the previous run; nothing was done
    Unchanged,
    /// Every object is reachable from the scatter canvas
    Scatter(PlacementOutcome),
    /// Placement missed at least one object; the flat grid was shown
    FlatGrid(Vec<FlatTile>),
}

impl LayoutRun {
    /// Short name used in logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoImages => "no_images",
            Self::Unchanged => "unchanged",
            Self::Scatter(_) => "scatter",
            Self::FlatGrid(_) => "flat_grid",
        }
    }
}

/// Owns everything that outlives a single layout pass
pub struct PlacementSession<R> {
    normalizer: Normalizer,
    oracle: SizeOracle<R>,
    overrides: OverrideStore,
    items: Vec<GalleryItem>,
    last_layout_key: Option<String>,
    seed: Option<u64>,
    runs: u64,
    schedule: BatchSchedule,
    spawn_probability: Option<f64>,
    retry_attempts: usize,
}

impl<R: SizeResolver> PlacementSession<R> {
    /// Create a session with no items
    pub fn new(oracle: SizeOracle<R>, overrides: OverrideStore) -> Self {
        Self {
            normalizer: Normalizer::new(),
            oracle,
            overrides,
            items: Vec::new(),
            last_layout_key: None,
            seed: None,
            runs: 0,
            schedule: BatchSchedule::default(),
            spawn_probability: None,
            retry_attempts: MAX_RETRY_ATTEMPTS,
        }
    }

    /// Derive every run's random stream from `seed`
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the batching schedule of the grid pass
    #[must_use]
    pub const fn with_schedule(mut self, schedule: BatchSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the per-group attempt budget of the retry pass
    #[must_use]
    pub const fn with_retry_attempts(mut self, attempts: usize) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// Use a fixed spawn probability instead of the breakpoint value
    ///
    /// # Errors
    ///
    /// Returns an error if the probability lies outside `[0, 1]`
    pub fn with_spawn_probability(mut self, probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(invalid_parameter(
                "spawn_probability",
                &probability,
                &"must lie within [0, 1]",
            ));
        }
        self.spawn_probability = Some(probability);
        Ok(self)
    }

    /// Normalise both source documents and replace the item list
    ///
    /// Clears the layout guard so the next run lays out again.
    pub fn load_items(&mut self, documents: &SourceDocuments) -> usize {
        self.items = self
            .normalizer
            .normalize(documents.primary.as_ref(), documents.secondary.as_ref());
        self.invalidate();
        tracing::info!(
            items = self.items.len(),
            placeholders = self.normalizer.placeholders_issued(),
            "items normalised"
        );
        self.items.len()
    }

    /// Replace the item list directly
    pub fn set_items(&mut self, items: Vec<GalleryItem>) {
        self.items = items;
        self.invalidate();
    }

    /// Normalised items
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Forget the last layout key so the next run is not skipped
    pub fn invalidate(&mut self) {
        self.last_layout_key = None;
    }

    /// Key of the last layout run, if any
    pub fn last_layout_key(&self) -> Option<&str> {
        self.last_layout_key.as_deref()
    }

    /// Override store
    pub const fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    /// Mutable override store; edits invalidate the current layout
    pub fn overrides_mut(&mut self) -> &mut OverrideStore {
        self.invalidate();
        &mut self.overrides
    }

    /// Size oracle with its memo and statistics
    pub const fn oracle(&self) -> &SizeOracle<R> {
        &self.oracle
    }

    /// Number of layouts actually run
    pub const fn runs(&self) -> u64 {
        self.runs
    }

    /// Layout parameters this session uses for a viewport width
    pub fn parameters_for(&self, viewport_width: u32) -> LayoutParameters {
        let params = LayoutParameters::for_viewport(viewport_width);
        match self.spawn_probability {
            Some(spawn_probability) => LayoutParameters {
                spawn_probability,
                ..params
            },
            None => params,
        }
    }

    /// Lay out for a viewport width and hand the result to `sink`
    pub async fn place_all(&mut self, viewport_width: u32, sink: &mut impl RenderSink) -> LayoutRun {
        self.place_all_with_progress(viewport_width, sink, None).await
    }

    /// As [`Self::place_all`], reporting grid-pass progress on a bar
    pub async fn place_all_with_progress(
        &mut self,
        viewport_width: u32,
        sink: &mut impl RenderSink,
        progress: Option<ProgressBar>,
    ) -> LayoutRun {
        if self.items.is_empty() {
            sink.show_message(NO_IMAGES_MESSAGE);
            tracing::warn!("no displayable items");
            return LayoutRun::NoImages;
        }

        let params = self.parameters_for(viewport_width);
        let layout_key = params.layout_key();
        if self.last_layout_key.as_deref() == Some(layout_key.as_str()) {
            tracing::debug!(layout = %layout_key, "layout unchanged, skipping");
            return LayoutRun::Unchanged;
        }
        self.last_layout_key = Some(layout_key);

        let (unique, groups) = build_groups(&self.items);
        let seed = self.seed.map(|seed| seed.wrapping_add(self.runs));
        self.runs += 1;

        let engine = match PlacementEngine::new(params, &mut self.oracle, seed) {
            Ok(engine) => engine,
            Err(error) => {
                tracing::error!(%error, "layout parameters rejected, showing flat grid");
                return Self::fall_back(&unique, viewport_width, sink);
            }
        };
        let mut engine = engine
            .with_schedule(self.schedule)
            .with_retry_attempts(self.retry_attempts);
        if let Some(bar) = progress {
            engine = engine.with_progress(bar);
        }
        let outcome = engine.place_all(&groups, &self.overrides).await;

        let coverage = assess(&unique, &outcome);
        if coverage.is_complete() {
            sink.render_scatter(&params, &scatter_tiles(&groups, &outcome));
            LayoutRun::Scatter(outcome)
        } else {
            tracing::warn!(
                placed = coverage.placed_objects,
                total = coverage.total_objects,
                "placement missed objects, showing flat grid"
            );
            Self::fall_back(&unique, viewport_width, sink)
        }
    }

    fn fall_back(unique: &[GalleryItem], viewport_width: u32, sink: &mut impl RenderSink) -> LayoutRun {
        let tiles = flat_grid(unique, viewport_width);
        sink.render_flat_grid(&tiles);
        LayoutRun::FlatGrid(tiles)
    }
}
