// src/scrape/mod.rs
mod scrape;

pub use scrape::{ScrapeOutcome, collect_cases};
