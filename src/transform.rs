// src/transform.rs
// Derived columns, all read out of the free-text description.

use tracing::trace;

use crate::records::{CaseRecord, TransformedRecord};
use crate::specs::case_status;

pub const DATE_SENTINEL: &str = "NaN";
const DATE_WINDOW: usize = 30;

pub const FORM_MARKER: &str = "I-";
const FORM_TYPE_LEN: usize = 5;

static MONTHS: [(&str, &str); 12] = [
    ("JANUARY", "01"), ("FEBRUARY", "02"), ("MARCH", "03"),
    ("APRIL", "04"), ("MAY", "05"), ("JUNE", "06"), ("JULY", "07"),
    ("AUGUST", "08"), ("SEPTEMBER", "09"), ("OCTOBER", "10"),
    ("NOVEMBER", "11"), ("DECEMBER", "12"),
];

fn month_number(name: &str) -> Option<&'static str> {
    let upper = name.to_uppercase();
    MONTHS.iter().find(|(m, _)| *m == upper).map(|(_, n)| *n)
}

fn remove_first(tokens: &mut Vec<&str>, word: &str) -> bool {
    match tokens.iter().position(|t| *t == word) {
        Some(i) => { tokens.remove(i); true }
        None => false,
    }
}

fn parse_date(description: &str) -> Option<String> {
    let head: String = description.chars().take(DATE_WINDOW).collect();
    let mut tokens: Vec<&str> = head.split_whitespace().collect();

    // "As of <date>, ..." or "On <date>, ..."
    if !(remove_first(&mut tokens, "As") && remove_first(&mut tokens, "of")) {
        remove_first(&mut tokens, "On");
    }

    let [month, day, year, ..] = tokens.as_slice() else { return None };
    let month = month_number(month)?;
    Some([month, *day, *year].join("-").replace(',', ""))
}

/// `"As of January 5, 2021, ..."` → `"01-5-2021"`; `"NaN"` when there is no leading date.
pub fn get_date(description: &str) -> String {
    parse_date(description).unwrap_or_else(|| {
        trace!(description, "no leading date");
        s!(DATE_SENTINEL)
    })
}

/// Five characters starting at the first `I-` (`"I-130"`); empty when absent.
pub fn get_form_type(description: &str) -> String {
    description
        .find(FORM_MARKER)
        .map(|i| description[i..].chars().take(FORM_TYPE_LEN).collect())
        .unwrap_or_default()
}

/// Receipt number quoted in the description; empty when absent.
pub fn get_rcpt_num(description: &str) -> String {
    case_status::receipt_number(description).map(String::from).unwrap_or_default()
}

pub fn transform_record(case: CaseRecord) -> TransformedRecord {
    let date = get_date(&case.description);
    let form_type = get_form_type(&case.description);
    let rns = get_rcpt_num(&case.description);
    TransformedRecord { case, date, form_type, rns }
}

pub fn transform(cases: Vec<CaseRecord>) -> Vec<TransformedRecord> {
    cases.into_iter().map(transform_record).collect()
}
