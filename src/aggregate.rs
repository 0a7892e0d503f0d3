// src/aggregate.rs
// Status buckets are plain substring matches on the status label.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::NaiveDate;

use crate::records::{ApprovedCase, TransformedRecord};

/// Any of these in a status means a decision was made.
pub const DECIDED_KEYWORDS: [&str; 5] = ["Card", "Rejected", "Approved", "Closed", "Denied"];
pub const APPROVED_KEYWORDS: [&str; 2] = ["Card", "Approved"];
pub const REJECTED_KEYWORDS: [&str; 2] = ["Denied", "Rejected"];
pub const RFE_SENT: &str = "Request for Initial Evidence Was Sent";
pub const RFE_RECEIVED: &str = "Request For Evidence Was Received";

const DATE_FORMAT: &str = "%m-%d-%Y";

fn contains_any(status: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| status.contains(k))
}

pub fn is_decided(status: &str) -> bool { contains_any(status, &DECIDED_KEYWORDS) }
pub fn is_approved(status: &str) -> bool { contains_any(status, &APPROVED_KEYWORDS) }
pub fn is_rejected(status: &str) -> bool { contains_any(status, &REJECTED_KEYWORDS) }

/// Receipt numbers still waiting for a decision, in table order.
/// A receipt number with a decided status on any row is excluded entirely.
pub fn active_cases(records: &[TransformedRecord]) -> Vec<String> {
    let decided: HashSet<&str> = records
        .iter()
        .filter(|r| is_decided(r.case_status()))
        .map(|r| r.receipt_number())
        .collect();

    records
        .iter()
        .map(|r| r.receipt_number())
        .filter(|rn| !decided.contains(rn))
        .map(String::from)
        .collect()
}

pub fn approved_cases(records: &[TransformedRecord]) -> Vec<ApprovedCase> {
    records
        .iter()
        .filter(|r| is_approved(r.case_status()))
        .map(ApprovedCase::from)
        .collect()
}

/// Counts per status bucket. `other` is what is left of the total after the
/// four named buckets, so a status that lands in two buckets pushes it down
/// (possibly below zero).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub rfe_sent: usize,
    pub rfe_received: usize,
    pub other: i64,
}

impl Summary {
    pub fn rows(&self) -> [(&'static str, i64); 5] {
        [
            ("Approved", self.approved as i64),
            ("Rejected or Denied", self.rejected as i64),
            ("RFE Sent", self.rfe_sent as i64),
            ("RFE Received", self.rfe_received as i64),
            ("Other", self.other),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20} {:>7}", "Case Status", "Count")?;
        for (label, count) in self.rows() {
            writeln!(f, "{label:<20} {count:>7}")?;
        }
        Ok(())
    }
}

pub fn summary(records: &[TransformedRecord]) -> Summary {
    let count = |pred: &dyn Fn(&str) -> bool| records.iter().filter(|r| pred(r.case_status())).count();

    let approved = count(&is_approved);
    let rejected = count(&is_rejected);
    let rfe_sent = count(&|s: &str| s.contains(RFE_SENT));
    let rfe_received = count(&|s: &str| s.contains(RFE_RECEIVED));
    let total = records.len();
    let other = total as i64 - (approved + rejected + rfe_sent + rfe_received) as i64;

    Summary { total, approved, rejected, rfe_sent, rfe_received, other }
}

/// Overview for one form type: how many rows carry any form type, the date
/// range of the whole table, and the status counts for `form_type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
    pub form_type: String,
    pub with_form_type: usize,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
    /// Most frequent first; ties by status text.
    pub statuses: Vec<(String, usize)>,
}

pub fn parse_case_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

pub fn distribution(records: &[TransformedRecord], form_type: &str) -> Distribution {
    let with_form_type = records.iter().filter(|r| !r.form_type.is_empty()).count();

    let dates: Vec<NaiveDate> = records.iter().filter_map(|r| parse_case_date(&r.date)).collect();
    let earliest = dates.iter().min().copied();
    let latest = dates.iter().max().copied();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records.iter().filter(|r| r.form_type == form_type) {
        *counts.entry(r.case_status()).or_default() += 1;
    }
    let mut statuses: Vec<(String, usize)> = counts.into_iter().map(|(s, n)| (s!(s), n)).collect();
    statuses.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Distribution { form_type: s!(form_type), with_form_type, earliest, latest, statuses }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |d: Option<NaiveDate>| d.map_or_else(|| s!("?"), |d| d.to_string());
        writeln!(
            f,
            "{} cases from {} to {}",
            self.with_form_type,
            show(self.earliest),
            show(self.latest)
        )?;
        writeln!(f, "\nCase Status Distribution ({}):", self.form_type)?;
        for (status, n) in &self.statuses {
            writeln!(f, "{n:>7}  {status}")?;
        }
        Ok(())
    }
}
