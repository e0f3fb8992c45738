//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use crate::sorting::progress::{ProgressObserver, ProgressStep};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::{Arc, LazyLock, Mutex};

/// Coordinates progress display for batch operations
///
/// Automatically switches between individual progress bars (for small batches)
/// and a single batch progress bar (for large batches) based on file count.
/// Methods take `&self` so per-file observers can report from the pipeline.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    state: Mutex<ProgressState>,
}

#[derive(Default)]
struct ProgressState {
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    /// Stores (`filename`, `rows_sorted`, `rows_total`) for rolling window display
    file_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            state: Mutex::new(ProgressState::default()),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&self, file_count: usize) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.file_count = file_count;

        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            state.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            state.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of files the manager was initialized for
    pub fn file_count(&self) -> usize {
        self.state.lock().map_or(0, |state| state.file_count)
    }

    /// Configure progress bar for a new file
    pub fn start_file(&self, index: usize, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.update_state(|state| {
            if index >= state.file_states.len() {
                state.file_states.resize(index + 1, (String::new(), 0, 0));
            }
            if let Some(entry) = state.file_states.get_mut(index) {
                *entry = (display_name, 0, 0);
            }
        });
    }

    /// Report rows sorted so far for a file
    pub fn update_rows(&self, index: usize, completed: usize, total: usize) {
        self.update_state(|state| {
            if let Some(entry) = state.file_states.get_mut(index) {
                entry.1 = completed;
                entry.2 = total;
            }
        });
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&self, index: usize) {
        self.update_state(|state| {
            if let Some(ref batch_bar) = state.batch_bar {
                batch_bar.inc(1);
            }

            if let Some(entry) = state.file_states.get_mut(index) {
                // Effects report no rows, so completion fills the bar
                let total = entry.2.max(1);
                entry.0 = format!("✓ {}", entry.0);
                entry.1 = total;
                entry.2 = total;
            }
        });
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Ok(state) = self.state.lock()
            && let Some(ref batch_bar) = state.batch_bar
        {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Observer forwarding pipeline steps of file `index` to this manager
    pub fn observer(self: &Arc<Self>, index: usize) -> Arc<dyn ProgressObserver> {
        Arc::new(FileProgress {
            manager: Arc::clone(self),
            index,
        })
    }

    fn update_state(&self, update: impl FnOnce(&mut ProgressState)) {
        if let Ok(mut state) = self.state.lock() {
            update(&mut state);
            state.update_bars();
        }
    }
}

impl ProgressState {
    /// Update all progress bars to show the last N active files
    fn update_bars(&self) {
        let active_files: Vec<_> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        // Take the last N files
        let start_idx = active_files
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_files = active_files.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, current, max)) in visible_files.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(*max as u64);
                bar.set_position(*current as u64);
                let max_width = max.to_string().len();
                bar.set_message(format!("{current:>max_width$}/{max} rows"));
                bar.set_prefix(name.clone());
            }
        }

        // Clear any unused bars
        for bar in self.file_bars.iter().skip(visible_files.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}

/// Pipeline observer for one file of a batch
struct FileProgress {
    manager: Arc<ProgressManager>,
    index: usize,
}

impl ProgressObserver for FileProgress {
    fn on_step(&self, step: ProgressStep) {
        match step {
            ProgressStep::Rotated { height, .. } => {
                self.manager.update_rows(self.index, 0, height);
            }
            ProgressStep::RowsSorted { completed, total } => {
                self.manager.update_rows(self.index, completed, total);
            }
            ProgressStep::EffectApplied | ProgressStep::Reassembled => {}
        }
    }
}
