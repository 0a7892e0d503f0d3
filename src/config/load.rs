// src/config/load.rs
//
// key = value config file, '#' starts a comment line.
//
//   endpoint         = https://egov.uscis.gov/casestatus/mycasestatus.do
//   workers          = 4
//   request_pause_ms = 75
//   jitter_ms        = 50
//   timeout_secs     = 30
//   input            = active_cases/active_cases.csv
//   out_dir          = out

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use super::consts::CONFIG_FILE;
use super::options::AppOptions;
use crate::error::{Error, Result};

/// Load options from `path`, or from `case_scrape.cfg` in the working directory.
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load(path: Option<&Path>) -> Result<AppOptions> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };
    if !explicit && !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppOptions::default());
    }
    let text = fs::read_to_string(&path)?;
    debug!(path = %path.display(), "loading config");
    parse(&text, &path.display().to_string())
}

/// Parse config text on top of the defaults. `origin` is only used in error messages.
pub fn parse(text: &str, origin: &str) -> Result<AppOptions> {
    let mut cfg = AppOptions::default();

    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }

        let err = |msg: String| Error::Config { path: s!(origin), line: n + 1, msg };

        let Some(eq) = line.find('=') else {
            return Err(err(format!("expected `key = value`, got `{line}`")));
        };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();

        match key {
            "endpoint" => cfg.scrape.endpoint = s!(val),
            "workers" => cfg.scrape.workers = number(val).map_err(err)?,
            "request_pause_ms" => cfg.scrape.request_pause_ms = number(val).map_err(err)?,
            "jitter_ms" => cfg.scrape.jitter_ms = number(val).map_err(err)?,
            "timeout_secs" => cfg.scrape.timeout_secs = number(val).map_err(err)?,
            "input" => cfg.input = PathBuf::from(val),
            "out_dir" => cfg.out_dir = PathBuf::from(val),
            other => return Err(err(format!("unknown key `{other}`"))),
        }
    }

    if cfg.scrape.workers == 0 {
        return Err(Error::Config { path: s!(origin), line: 0, msg: s!("workers must be at least 1") });
    }
    Ok(cfg)
}

fn number<T: FromStr>(val: &str) -> std::result::Result<T, String> {
    val.parse().map_err(|_| format!("`{val}` is not a valid number"))
}
