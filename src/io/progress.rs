//! Progress display for layout passes, one bar per viewport run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!("{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress bars for the jittered-grid pass of each layout run
///
/// Bars can be shared by reference; `indicatif` handles interior updates.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
        }
    }

    /// Create a manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            bars: Vec::new(),
        }
    }

    /// Add a bar for a run over `cells` cells and return it
    pub fn start_run(&mut self, label: &str, cells: usize) -> ProgressBar {
        let bar = self.multi_progress.add(ProgressBar::new(cells as u64));
        bar.set_style(CELL_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.bars.push(bar.clone());
        bar
    }

    /// Number of runs started
    pub fn runs(&self) -> usize {
        self.bars.len()
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in &self.bars {
            if !bar.is_finished() {
                bar.finish();
            }
        }
        let _ = self.multi_progress.clear();
    }
}

/// Report cells processed and tiles seated on a run's bar
pub fn report_cells(bar: Option<&ProgressBar>, processed: usize, seated: usize) {
    if let Some(bar) = bar {
        bar.set_position(processed as u64);
        bar.set_message(format!("({seated} tiles)"));
    }
}
