// src/store.rs
//
// CSV tables on disk <-> typed records. Columns are located by header name,
// so hand-edited files with reordered or extra columns still load.

use std::{fs, path::Path};

use tracing::debug;

use crate::config::consts::SEP;
use crate::csv::parse_rows;
use crate::error::{Error, Result};
use crate::file::write_table;
use crate::records::*;
use crate::transform::transform;

pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    /// Read a CSV file; the first row is taken as headers when `has_headers`.
    pub fn load(path: &Path, has_headers: bool) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut rows = parse_rows(&text, SEP);
        let headers = if has_headers && !rows.is_empty() { Some(rows.remove(0)) } else { None };
        debug!(path = %path.display(), rows = rows.len(), "loaded table");
        Ok(Self { headers, rows })
    }

    /// Index of the first header matching any of `names` (ASCII case-insensitive).
    fn column(&self, names: &[&'static str], path: &Path) -> Result<usize> {
        self.headers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
            .ok_or_else(|| Error::MissingColumn { column: names[0], path: path.display().to_string() })
    }
}

fn cell(row: &[String], ix: usize) -> String {
    row.get(ix).cloned().unwrap_or_default()
}

const RECEIPT_COLUMN: &[&str] = &[RECEIPT_NUMBER, RECEIPT_NUMBER_LEGACY];

/* ---------------- Receipt number lists ---------------- */

/// Active-cases file: no header, receipt number in the first column.
pub fn load_receipts(path: &Path) -> Result<Vec<String>> {
    let ds = DataSet::load(path, false)?;
    Ok(ds
        .rows
        .into_iter()
        .filter_map(|r| r.into_iter().next())
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect())
}

pub fn save_receipts(path: &Path, receipts: &[String]) -> Result<()> {
    let rows: Vec<Vec<String>> = receipts.iter().map(|r| row![r]).collect();
    write_table(path, None, &rows)
}

/* ---------------- Case dumps ---------------- */

/// Load a case dump and re-derive Date/Form-Type/RNS from each description.
/// Works for raw three-column dumps as well as full transformed dumps.
pub fn load_cases(path: &Path) -> Result<Vec<TransformedRecord>> {
    let ds = DataSet::load(path, true)?;
    let rn = ds.column(RECEIPT_COLUMN, path)?;
    let st = ds.column(&[CASE_STATUS], path)?;
    let de = ds.column(&[DESCRIPTION], path)?;

    let cases = ds
        .rows
        .iter()
        .map(|r| CaseRecord {
            receipt_number: cell(r, rn),
            case_status: cell(r, st),
            description: cell(r, de),
        })
        .collect();
    Ok(transform(cases))
}

pub fn save_cases(path: &Path, records: &[TransformedRecord]) -> Result<()> {
    let rows: Vec<Vec<String>> = records.iter().map(TransformedRecord::to_row).collect();
    write_table(path, Some(&TransformedRecord::HEADERS), &rows)
}

pub fn save_approved(path: &Path, approved: &[ApprovedCase]) -> Result<()> {
    let rows: Vec<Vec<String>> = approved.iter().map(ApprovedCase::to_row).collect();
    write_table(path, Some(&ApprovedCase::HEADERS), &rows)
}

/* ---------------- Status history ---------------- */

pub fn load_history(path: &Path) -> Result<Vec<HistoryRecord>> {
    let ds = DataSet::load(path, true)?;
    let rn = ds.column(RECEIPT_COLUMN, path)?;
    let ft = ds.column(&[FORM_TYPE], path)?;
    let st = ds.column(&[CASE_STATUS], path)?;
    let dt = ds.column(&[DATE], path)?;
    let sn = ds.column(&[CASE_STATUS_NEW], path)?;
    let dn = ds.column(&[DATE_NEW], path)?;

    Ok(ds
        .rows
        .iter()
        .map(|r| HistoryRecord {
            receipt_number: cell(r, rn),
            form_type: cell(r, ft),
            case_status: cell(r, st),
            date: cell(r, dt),
            case_status_new: cell(r, sn),
            date_new: cell(r, dn),
        })
        .collect())
}

pub fn save_history(path: &Path, history: &[HistoryRecord]) -> Result<()> {
    let rows: Vec<Vec<String>> = history.iter().map(HistoryRecord::to_row).collect();
    write_table(path, Some(&HistoryRecord::HEADERS), &rows)
}
