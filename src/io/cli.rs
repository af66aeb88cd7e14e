//! Command-line interface for laying out a gallery folder at one or more viewport widths

use crate::algorithm::schedule::BatchSchedule;
use crate::algorithm::session::PlacementSession;
use crate::io::configuration::{
    BATCH_SIZE, DEFAULT_DATA_DOCUMENT, DEFAULT_INFO_DOCUMENT, DEFAULT_MANUAL_POSITIONS,
    DEFAULT_PLAN_OUTPUT, DEFAULT_VIEWPORT_WIDTH, PREVIEW_DOWNSCALE,
};
use crate::io::documents::SourceDocuments;
use crate::io::error::Result;
use crate::io::image::export_preview_png;
use crate::io::override_store::OverrideStore;
use crate::io::progress::ProgressManager;
use crate::io::render::{GalleryPlan, PlanRecorder};
use crate::io::size_cache::SizeCache;
use crate::io::size_oracle::{FileSizeResolver, SizeOracle};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "scatter")]
#[command(
    author,
    version,
    about = "Lay out gallery tiles on a jittered scatter canvas"
)]
/// Command-line arguments for the gallery layout tool
pub struct Cli {
    /// Gallery folder holding the JSON documents and images
    #[arg(value_name = "TARGET", default_value = ".")]
    pub target: PathBuf,

    /// Primary objects document, relative to TARGET
    #[arg(long, default_value = DEFAULT_DATA_DOCUMENT)]
    pub data: PathBuf,

    /// Secondary info document, relative to TARGET
    #[arg(long, default_value = DEFAULT_INFO_DOCUMENT)]
    pub info: PathBuf,

    /// Checked-in manual positions, relative to TARGET
    #[arg(long, default_value = DEFAULT_MANUAL_POSITIONS)]
    pub overrides: PathBuf,

    /// Local manual positions merged over the checked-in ones
    #[arg(long)]
    pub local_overrides: Option<PathBuf>,

    /// Fail on a malformed local overrides document instead of ignoring it
    #[arg(long)]
    pub strict_overrides: bool,

    /// Image size memo loaded before and saved after the run
    #[arg(long)]
    pub size_cache: Option<PathBuf>,

    /// Viewport width to lay out for; repeat to simulate resizes
    #[arg(
        short = 'w',
        long = "viewport",
        default_values_t = [DEFAULT_VIEWPORT_WIDTH],
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub viewports: Vec<u32>,

    /// Random seed for reproducible layouts
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the breakpoint spawn probability
    #[arg(long)]
    pub spawn_probability: Option<f64>,

    /// Plan output file, relative to TARGET
    #[arg(short, long, default_value = DEFAULT_PLAN_OUTPUT)]
    pub output: PathBuf,

    /// Write a PNG preview of the final scatter canvas
    #[arg(short, long)]
    pub preview: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Run the grid pass without pausing between batches
    #[arg(long)]
    pub no_batch_delay: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Resolve a path relative to the gallery folder
    pub fn in_target(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.target.join(path)
        }
    }

    /// Batching schedule for the grid pass
    pub fn schedule(&self) -> BatchSchedule {
        if self.no_batch_delay {
            BatchSchedule::immediate(BATCH_SIZE)
        } else {
            BatchSchedule::default()
        }
    }
}

/// Runs a layout session over the requested viewports and writes the result
pub struct GalleryProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl GalleryProcessor {
    /// Create a processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Lay out every viewport and write the final plan
    ///
    /// # Errors
    ///
    /// Returns an error if the spawn probability is invalid, strict override
    /// loading fails, or an output file cannot be written
    pub async fn process(&mut self) -> Result<GalleryPlan> {
        let start_time = Instant::now();
        let documents = SourceDocuments::load(
            &self.cli.in_target(&self.cli.data),
            &self.cli.in_target(&self.cli.info),
        );

        let cache_path = self.cli.size_cache.as_deref().map(|path| self.cli.in_target(path));
        let cache = cache_path
            .as_deref()
            .map(SizeCache::load)
            .unwrap_or_default();
        let oracle = SizeOracle::with_cache(FileSizeResolver::new(&self.cli.target), cache);

        let local_overrides = self
            .cli
            .local_overrides
            .as_deref()
            .map(|path| self.cli.in_target(path));
        let checked_in = self.cli.in_target(&self.cli.overrides);
        let overrides = if self.cli.strict_overrides {
            OverrideStore::load_strict(&checked_in, local_overrides.as_deref())?
        } else {
            OverrideStore::load(&checked_in, local_overrides.as_deref())
        };

        let mut session = PlacementSession::new(oracle, overrides).with_schedule(self.cli.schedule());
        if let Some(seed) = self.cli.seed {
            session = session.with_seed(seed);
        }
        if let Some(probability) = self.cli.spawn_probability {
            session = session.with_spawn_probability(probability)?;
        }
        session.load_items(&documents);

        let mut recorder = PlanRecorder::new();
        for &viewport in &self.cli.viewports {
            let bar = self.progress_manager.start_run(&format!("{viewport}px"), 0);
            let run = session
                .place_all_with_progress(viewport, &mut recorder, Some(bar))
                .await;
            tracing::info!(viewport, result = run.kind(), "viewport laid out");
        }
        self.progress_manager.finish();

        let plan = recorder.into_last().unwrap_or_else(|| GalleryPlan::Message {
            text: String::new(),
        });
        plan.write_json(&self.cli.in_target(&self.cli.output))?;

        if let (Some(preview), GalleryPlan::Scatter { canvas, tiles }) = (&self.cli.preview, &plan) {
            export_preview_png(canvas, tiles, PREVIEW_DOWNSCALE, &self.cli.in_target(preview))?;
        }

        if let Some(path) = &cache_path {
            session.oracle().cache().save(path)?;
        }

        let stats = session.oracle().stats;
        tracing::info!(
            runs = session.runs(),
            tiles = plan.tile_count(),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "gallery plan written"
        );

        Ok(plan)
    }
}
