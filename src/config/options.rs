// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    /// Active-cases CSV read by `fetch`.
    pub input: PathBuf,
    /// Directory for default output file names.
    pub out_dir: PathBuf,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            scrape: ScrapeOptions::default(),
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl AppOptions {
    /// `<out_dir>/<name>`
    pub fn out_file(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }

    /// Use `explicit` when given, else the default file under `out_dir`.
    pub fn out_or_default(&self, explicit: Option<&Path>, name: &str) -> PathBuf {
        match explicit {
            Some(p) => crate::file::resolve_out_path(p, name),
            None => self.out_file(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub endpoint: String,
    pub workers: usize,
    pub request_pause_ms: u64,
    pub jitter_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            endpoint: s!(ENDPOINT),
            workers: WORKERS,
            request_pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
            timeout_secs: TIMEOUT_SECS,
        }
    }
}

impl ScrapeOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pause after the `i`-th request. Jitter is derived from the index so runs are repeatable.
    pub fn pause_after(&self, i: usize) -> Duration {
        if self.request_pause_ms == 0 {
            return Duration::ZERO;
        }
        let jitter = if self.jitter_ms == 0 { 0 } else { (i as u64 * 31) % self.jitter_ms };
        Duration::from_millis(self.request_pause_ms + jitter)
    }
}
