// Progress sink for the aggregation pass: a terminal bar or nothing.

use indicatif::{ProgressBar, ProgressStyle};

/// Observes the aggregation pass. Implementations are shared across tasks.
pub trait Progress: Send + Sync {
    fn start(&self, total: u64);
    fn increment(&self);
    fn finish(&self, message: &str);
}

/// indicatif bar drawn on stderr.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} apps {msg}")
        {
            bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn start(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn increment(&self) {
        self.bar.inc(1);
    }

    fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Used with `--no-progress` and when output is not a terminal.
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn start(&self, _total: u64) {}
    fn increment(&self) {}
    fn finish(&self, _message: &str) {}
}
