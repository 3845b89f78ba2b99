//! Per-file progress reporting for batch jobs.

use indicatif::{ProgressBar, ProgressStyle};

/// Receives progress events from a batch. Implementations must be shareable
/// across worker threads.
pub trait Progress: Sync {
    /// Called once the number of items is known.
    fn start(&self, _total: usize) {}

    /// Called after each item, with its file name.
    fn advance(&self, _item: &str) {}

    /// Called when the batch is done.
    fn finish(&self) {}
}

/// Discards all progress events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

const BAR_TEMPLATE: &str = "{prefix} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}";

/// Terminal progress bar drawn on stderr.
#[derive(Debug, Clone)]
pub struct ProgressBarReporter {
    bar: ProgressBar,
}

impl ProgressBarReporter {
    /// Create a bar labelled with `prefix`.
    pub fn new(prefix: &str) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(0).with_style(style);
        bar.set_prefix(prefix.to_string());
        Self { bar }
    }

    /// A bar that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Items completed so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Progress for ProgressBarReporter {
    fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn advance(&self, item: &str) {
        self.bar.set_message(item.to_string());
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
