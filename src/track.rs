// src/track.rs
//
// Status history: stored rows keep the baseline status/date and a "latest"
// status/date pair. A new snapshot is left-joined on (receipt number, form
// type); a recent status that matches neither stored value is a new change
// and replaces the latest pair.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::records::{HistoryRecord, TransformedRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeState {
    /// No row in the new snapshot for this key.
    Unseen,
    /// Recent status equals the baseline or the already recorded latest status.
    Unchanged,
    /// Recent status is new; latest status/date get overwritten.
    Changed,
}

pub fn classify(stored: &HistoryRecord, recent_status: Option<&str>) -> ChangeState {
    match recent_status {
        None => ChangeState::Unseen,
        Some(r) if r != stored.case_status && r != stored.case_status_new => ChangeState::Changed,
        Some(_) => ChangeState::Unchanged,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeReport {
    pub unseen: usize,
    pub unchanged: usize,
    pub changed: usize,
}

impl ChangeReport {
    fn count(&mut self, state: ChangeState) {
        match state {
            ChangeState::Unseen => self.unseen += 1,
            ChangeState::Unchanged => self.unchanged += 1,
            ChangeState::Changed => self.changed += 1,
        }
    }
}

type Key<'a> = (&'a str, &'a str);

fn index_recent(recent: &[TransformedRecord]) -> HashMap<Key<'_>, Vec<&TransformedRecord>> {
    let mut by_key: HashMap<Key<'_>, Vec<&TransformedRecord>> = HashMap::new();
    for r in recent {
        by_key.entry((r.receipt_number(), r.form_type.as_str())).or_default().push(r);
    }
    by_key
}

/// Merge and report. Every stored row yields one output row per matching recent
/// row (duplicate keys fan out) or one unchanged row when nothing matches.
/// Recent rows without a stored row are not part of the result.
pub fn merge_with_report(
    history: &[HistoryRecord],
    recent: &[TransformedRecord],
) -> (Vec<HistoryRecord>, ChangeReport) {
    let by_key = index_recent(recent);
    let mut report = ChangeReport::default();
    let mut out = Vec::with_capacity(history.len());

    for stored in history {
        let key = (stored.receipt_number.as_str(), stored.form_type.as_str());
        let Some(matches) = by_key.get(&key) else {
            report.count(ChangeState::Unseen);
            out.push(stored.clone());
            continue;
        };

        for r in matches {
            // An empty status in the snapshot counts as missing.
            let status = Some(r.case_status()).filter(|s| !s.is_empty());
            let state = classify(stored, status);
            report.count(state);

            let mut row = stored.clone();
            if state == ChangeState::Changed {
                debug!(
                    receipt_number = %stored.receipt_number,
                    from = %stored.case_status_new,
                    to = r.case_status(),
                    "status changed"
                );
                row.case_status_new = s!(r.case_status());
                row.date_new = r.date.clone();
            }
            out.push(row);
        }
    }

    info!(changed = report.changed, unchanged = report.unchanged, unseen = report.unseen, "history merged");
    (out, report)
}

pub fn update_status_changes(history: &[HistoryRecord], recent: &[TransformedRecord]) -> Vec<HistoryRecord> {
    merge_with_report(history, recent).0
}

/// Initial history from a snapshot.
pub fn baseline(records: &[TransformedRecord]) -> Vec<HistoryRecord> {
    records.iter().map(HistoryRecord::baseline).collect()
}

/// Snapshot rows whose key has no history row yet.
pub fn unseen_in_history<'a>(history: &[HistoryRecord], recent: &'a [TransformedRecord]) -> Vec<&'a TransformedRecord> {
    let known: HashSet<Key<'_>> = history
        .iter()
        .map(|h| (h.receipt_number.as_str(), h.form_type.as_str()))
        .collect();
    recent
        .iter()
        .filter(|r| !known.contains(&(r.receipt_number(), r.form_type.as_str())))
        .collect()
}
