//! Progress reporting for multi-file runs

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar over input files, hidden when quiet
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Start a bar over `total_files` inputs
    pub fn init_files(&mut self, total_files: u64) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total_files);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Record one split input
    pub fn file_completed(&self, name: &str, chunks: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{name}: {chunks} chunks"));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }

    /// Whether a bar is active
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }
}
