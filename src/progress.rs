// src/progress.rs
use tracing::{error, info};

/// Lightweight progress reporting for the scrape loop.
/// The CLI logs through tracing; tests can count calls.
pub trait Progress {
    /// Called at the start with the total number of receipt numbers.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One receipt number was fetched and parsed.
    fn item_done(&mut self, _receipt_number: &str) {}

    /// One receipt number was dropped.
    fn item_failed(&mut self, _receipt_number: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress as tracing events, with a running `done/total` count.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        info!(total, "checking case statuses");
    }

    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }

    fn item_done(&mut self, receipt_number: &str) {
        self.done += 1;
        info!("[{}/{}] {receipt_number}", self.done + self.failed, self.total);
    }

    fn item_failed(&mut self, receipt_number: &str, reason: &str) {
        self.failed += 1;
        error!("[{}/{}] {receipt_number}: {reason}", self.done + self.failed, self.total);
    }

    fn finish(&mut self) {
        info!(done = self.done, failed = self.failed, "scrape finished");
    }
}
