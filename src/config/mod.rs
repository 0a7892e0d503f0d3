// src/config/mod.rs

pub mod consts;
pub mod load;
pub mod options;

pub use load::load;
pub use options::{AppOptions, ScrapeOptions};
