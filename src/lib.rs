// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod specs;

pub mod aggregate;
pub mod csv;
pub mod file;
pub mod generate;
pub mod progress;
pub mod records;
pub mod scrape;
pub mod store;
pub mod track;
pub mod transform;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
