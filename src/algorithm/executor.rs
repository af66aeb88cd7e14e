//! Three-pass placement of groups onto the scatter canvas
//!
//! 1. Overrides: groups with a manual position are pinned without any
//!    collision test.
//! 2. Jittered grid: cells are visited from the centre outward; each cell
//!    offers its slot to the next unplaced group in round-robin order.
//! 3. Random retry: groups still unplaced get a bounded number of uniformly
//!    random positions.
//!
//! Groups left over after pass 3 are simply absent; the coverage check is the
//! backstop for that.

use crate::algorithm::candidates::{seat_in_cell, seat_randomly};
use crate::algorithm::pinned::pinned_rect;
use crate::algorithm::schedule::BatchSchedule;
use crate::analysis::grouping::Group;
use crate::io::configuration::MAX_RETRY_ATTEMPTS;
use crate::io::error::Result;
use crate::io::override_store::OverrideStore;
use crate::io::progress::report_cells;
use crate::io::size_oracle::{SizeOracle, SizeResolver};
use crate::math::random::RandomSelector;
use crate::spatial::cells::{Cell, CellGrid};
use crate::spatial::geometry::{PlacedRect, TileSize};
use crate::spatial::layout::LayoutParameters;
use indicatif::ProgressBar;
use serde::Serialize;
use std::collections::HashSet;

/// Pass that seated a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPass {
    /// Pinned by a manual override
    Override,
    /// Seated in a cell by the jittered-grid pass
    JitteredGrid,
    /// Seated at a random position by the retry pass
    RandomRetry,
}

/// One group seated on the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Index of the group in the pass input
    pub group_index: usize,
    /// Seated rectangle
    pub rect: PlacedRect,
    /// Pass that produced it
    pub pass: PlacementPass,
}

/// Result of one layout pass
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    /// Parameters the pass ran with
    pub params: LayoutParameters,
    /// Seated groups in placement order
    pub placements: Vec<Placement>,
    /// Indices of groups that received no tile
    pub unplaced: Vec<usize>,
}

impl PlacementOutcome {
    /// Rectangles in placement order
    pub fn rects(&self) -> impl Iterator<Item = &PlacedRect> {
        self.placements.iter().map(|placement| &placement.rect)
    }

    /// Image sources that received a tile
    pub fn placed_srcs(&self) -> HashSet<&str> {
        self.rects().map(|rect| rect.src.as_str()).collect()
    }

    /// Placement of a group, if it was seated
    pub fn placement_for(&self, group_index: usize) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|placement| placement.group_index == group_index)
    }

    /// Number of tiles seated by a pass
    pub fn count_by_pass(&self, pass: PlacementPass) -> usize {
        self.placements
            .iter()
            .filter(|placement| placement.pass == pass)
            .count()
    }
}

/// Accumulator owned by a single pass and discarded afterwards
#[derive(Debug, Default)]
struct PassState {
    placed: Vec<PlacedRect>,
    placed_keys: HashSet<String>,
    placements: Vec<Placement>,
}

impl PassState {
    fn is_placed(&self, group: &Group) -> bool {
        self.placed_keys.contains(&group.placement_key())
    }

    fn seat(&mut self, group_index: usize, group: &Group, rect: PlacedRect, pass: PlacementPass) {
        self.placed.push(rect.clone());
        self.placed_keys.insert(group.placement_key());
        self.placements.push(Placement {
            group_index,
            rect,
            pass,
        });
    }
}

/// Round-robin cursor handing cells to groups that still lack a tile
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobin {
    cursor: usize,
}

impl RoundRobin {
    /// Next unplaced group index, advancing the cursor past it
    ///
    /// Placed groups are skipped, wrapping at most once around the list.
    /// When every group is placed the cursor still advances by one and
    /// `None` is returned.
    pub fn next_unplaced(&mut self, groups: &[Group], is_placed: impl Fn(&Group) -> bool) -> Option<usize> {
        if groups.is_empty() {
            return None;
        }
        for _ in 0..groups.len() {
            let index = self.cursor % groups.len();
            self.cursor += 1;
            if groups.get(index).is_some_and(|group| !is_placed(group)) {
                return Some(index);
            }
        }
        self.cursor += 1;
        None
    }
}

/// Runs the three placement passes for one layout
pub struct PlacementEngine<'a, R> {
    params: LayoutParameters,
    oracle: &'a mut SizeOracle<R>,
    selector: RandomSelector,
    schedule: BatchSchedule,
    progress: Option<ProgressBar>,
    retry_attempts: usize,
}

impl<'a, R: SizeResolver> PlacementEngine<'a, R> {
    /// Create an engine; `seed` fixes the random stream when given
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail [`LayoutParameters::validate`]
    pub fn new(params: LayoutParameters, oracle: &'a mut SizeOracle<R>, seed: Option<u64>) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            oracle,
            selector: RandomSelector::new(seed),
            schedule: BatchSchedule::default(),
            progress: None,
            retry_attempts: MAX_RETRY_ATTEMPTS,
        })
    }

    /// Replace the batching schedule of the grid pass
    #[must_use]
    pub const fn with_schedule(mut self, schedule: BatchSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Report grid-pass progress on a bar
    #[must_use]
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Replace the per-group attempt budget of the retry pass
    #[must_use]
    pub const fn with_retry_attempts(mut self, attempts: usize) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// Seat as many groups as possible, starting from an empty canvas
    pub async fn place_all(&mut self, groups: &[Group], overrides: &OverrideStore) -> PlacementOutcome {
        let mut state = PassState::default();

        self.place_overrides(groups, overrides, &mut state).await;
        let pinned = state.placements.len();

        self.place_jittered_grid(groups, &mut state).await;
        let gridded = state.placements.len() - pinned;

        self.place_leftovers(groups, &mut state).await;
        let retried = state.placements.len() - pinned - gridded;

        let unplaced: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| !state.is_placed(group))
            .map(|(index, _)| index)
            .collect();

        tracing::info!(
            layout = %self.params.layout_key(),
            groups = groups.len(),
            pinned,
            gridded,
            retried,
            unplaced = unplaced.len(),
            "layout pass complete"
        );

        PlacementOutcome {
            params: self.params,
            placements: state.placements,
            unplaced,
        }
    }

    async fn tile_size(&mut self, group: &Group) -> TileSize {
        let natural = self.oracle.resolve_or_default(&group.src).await;
        self.params
            .tile_size(natural.width, natural.height, group.is_gallery_variant)
    }

    async fn place_overrides(&mut self, groups: &[Group], overrides: &OverrideStore, state: &mut PassState) {
        for (index, group) in groups.iter().enumerate() {
            let Some(form) = overrides.for_group(group).and_then(|entry| entry.form()) else {
                continue;
            };
            let natural = self.oracle.resolve_or_default(&group.src).await;
            let ((x, y), size) = pinned_rect(form, natural, group.is_gallery_variant, &self.params);
            state.seat(
                index,
                group,
                PlacedRect::new(x, y, size, group.src.clone()),
                PlacementPass::Override,
            );
        }
    }

    async fn place_jittered_grid(&mut self, groups: &[Group], state: &mut PassState) {
        let grid = CellGrid::new(&self.params);
        if let Some(bar) = &self.progress {
            bar.set_length(grid.len() as u64);
        }
        let mut round_robin = RoundRobin::default();
        let mut processed = 0;

        for &cell in grid.initial() {
            self.place_cell(&grid, cell, groups, &mut round_robin, state).await;
            processed += 1;
        }
        report_cells(self.progress.as_ref(), processed, state.placements.len());

        for batch in grid.remaining().chunks(self.schedule.chunk_len()) {
            for &cell in batch {
                self.place_cell(&grid, cell, groups, &mut round_robin, state).await;
            }
            processed += batch.len();
            report_cells(self.progress.as_ref(), processed, state.placements.len());
            self.schedule.pause().await;
        }

        if let Some(bar) = &self.progress {
            bar.finish();
        }
    }

    async fn place_cell(
        &mut self,
        grid: &CellGrid,
        cell: Cell,
        groups: &[Group],
        round_robin: &mut RoundRobin,
        state: &mut PassState,
    ) {
        if !self.selector.spawns(self.params.spawn_probability) {
            return;
        }
        let Some(index) = round_robin.next_unplaced(groups, |group| state.is_placed(group)) else {
            return;
        };
        let Some(group) = groups.get(index) else {
            return;
        };

        let size = self.tile_size(group).await;
        let seated = seat_in_cell(grid.origin(cell), size, &self.params, &state.placed, &mut self.selector);
        if let Some((x, y)) = seated {
            state.seat(
                index,
                group,
                PlacedRect::new(x, y, size, group.src.clone()),
                PlacementPass::JitteredGrid,
            );
        }
    }

    async fn place_leftovers(&mut self, groups: &[Group], state: &mut PassState) {
        let leftovers: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| !state.is_placed(group))
            .map(|(index, _)| index)
            .collect();

        for index in leftovers {
            let Some(group) = groups.get(index) else {
                continue;
            };
            let size = self.tile_size(group).await;
            let seated = seat_randomly(size, &self.params, &state.placed, &mut self.selector, self.retry_attempts);
            match seated {
                Some((x, y)) => state.seat(
                    index,
                    group,
                    PlacedRect::new(x, y, size, group.src.clone()),
                    PlacementPass::RandomRetry,
                ),
                None => tracing::debug!(src = %group.representative.label(), "no free position after retries"),
            }
        }
    }
}
