// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::SEP;
use crate::csv::write_row;
use crate::error::Result;

/// Create/truncate `path` (and its parent dirs) and write a header plus rows.
pub fn write_table(path: &Path, headers: Option<&[&str]>, rows: &[Vec<String>]) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    if let Some(h) = headers {
        write_row(&mut out, h, SEP)?;
    }
    for row in rows {
        write_row(&mut out, row, SEP)?;
    }
    out.flush()?;
    Ok(())
}

/// An explicit `-o` that names a directory (existing, or ending in a separator)
/// gets the default file name appended.
pub fn resolve_out_path(user_o: &Path, default_filename: &str) -> PathBuf {
    if looks_like_dir_hint(user_o) || user_o.is_dir() {
        user_o.join(default_filename)
    } else {
        user_o.to_path_buf()
    }
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::other(format!("path exists but is not a directory: {}", dir.display())).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
