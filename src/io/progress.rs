//! Batch progress display for multi-file recovery runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Problems: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress display for a batch of problem files
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    completed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bar yet
    pub const fn new() -> Self {
        Self {
            bar: None,
            completed: 0,
        }
    }

    /// Show a bar for `file_count` problems
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
        self.completed = 0;
    }

    /// Show the name of the problem being solved
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            bar.set_message(path.file_name().unwrap_or_default().to_string_lossy().to_string());
        }
    }

    /// Mark the current problem as solved
    pub fn complete_file(&mut self) {
        self.completed += 1;
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Number of problems solved since [`initialize`](Self::initialize)
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Close the bar with a summary line
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message(format!("{} solved", self.completed));
        }
    }
}
