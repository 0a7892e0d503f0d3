// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for receipt number {receipt_number}")]
    Status { status: u16, receipt_number: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Expected markup was not present in a case status page.
    #[error("`{0}` not found in response")]
    MissingElement(&'static str),

    #[error("column `{column}` not found in {path}")]
    MissingColumn { column: &'static str, path: String },

    #[error("invalid seed receipt number `{0}` (expected 4-char prefix + digits)")]
    InvalidSeed(String),

    #[error("{path}:{line}: {msg}")]
    Config { path: String, line: usize, msg: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
