//! Terminal progress display for tile loading and mosaic composition

use crate::algorithm::compositor::CellObserver;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Cells: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{percent:>3}}%"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static LOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Coordinates the loading spinner and the per-cell progress bar
///
/// A hidden manager accepts every call but draws nothing, so callers never
/// need to branch on whether progress is shown.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    load_spinner: Option<ProgressBar>,
    cell_bar: Option<ProgressBar>,
    visible: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager that draws to the terminal
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            load_spinner: None,
            cell_bar: None,
            visible: true,
        }
    }

    /// Create a manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(
                indicatif::ProgressDrawTarget::hidden(),
            ),
            load_spinner: None,
            cell_bar: None,
            visible: false,
        }
    }

    /// Whether progress is drawn
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Start the spinner shown while tiles are loaded
    pub fn start_loading(&mut self) {
        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(LOAD_STYLE.clone());
        spinner.set_message("Reading tiles...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.load_spinner = Some(spinner);
    }

    /// Report the number of tiles loaded so far
    pub fn tiles_loaded(&self, count: usize) {
        if let Some(ref spinner) = self.load_spinner {
            spinner.set_message(format!("Loaded {count} tiles"));
        }
    }

    /// Stop the loading spinner, leaving the final count visible
    pub fn finish_loading(&mut self, count: usize) {
        if let Some(spinner) = self.load_spinner.take() {
            spinner.finish_with_message(format!("Loaded {count} tiles"));
        }
    }

    /// Create the per-cell bar for a grid of `cell_count` cells
    pub fn start_cells(&mut self, cell_count: usize) {
        let bar = self
            .multi_progress
            .add(ProgressBar::new(cell_count as u64));
        bar.set_style(CELL_STYLE.clone());
        self.cell_bar = Some(bar);
    }

    /// Number of cells recorded as finished
    pub fn cells_completed(&self) -> u64 {
        self.cell_bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        if let Some(ref bar) = self.cell_bar {
            bar.finish();
        }
        if let Some(spinner) = self.load_spinner.take() {
            spinner.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}

impl CellObserver for ProgressManager {
    fn cell_completed(&self, _cell_index: usize) {
        if let Some(ref bar) = self.cell_bar {
            bar.inc(1);
        }
    }
}
