// src/records.rs
//
// Row types flowing through the pipeline:
//   CaseRecord        – one scraped status page
//   TransformedRecord – CaseRecord + fields derived from the description
//   HistoryRecord     – baseline vs latest status per (receipt, form type)
//   ApprovedCase      – projection written by `approved`

pub const RECEIPT_NUMBER: &str = "Receipt_Number";
/// Misspelled header found in older dumps; accepted on read only.
pub const RECEIPT_NUMBER_LEGACY: &str = "Reciept_Number";
pub const CASE_STATUS: &str = "Case_Status";
pub const DESCRIPTION: &str = "Description";
pub const DATE: &str = "Date";
pub const FORM_TYPE: &str = "Form-Type";
pub const RNS: &str = "RNS";
pub const CASE_STATUS_NEW: &str = "Case_Status_new";
pub const DATE_NEW: &str = "Date_new";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseRecord {
    pub receipt_number: String,
    pub case_status: String,
    pub description: String,
}

impl CaseRecord {
    pub const HEADERS: [&'static str; 3] = [RECEIPT_NUMBER, CASE_STATUS, DESCRIPTION];

    pub fn to_row(&self) -> Vec<String> {
        row![&self.receipt_number, &self.case_status, &self.description]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformedRecord {
    pub case: CaseRecord,
    /// `MM-D-YYYY`, or `"NaN"` when the description has no leading date.
    pub date: String,
    /// `I-xxx`, empty when absent.
    pub form_type: String,
    /// Receipt number re-read from the description, empty when absent.
    pub rns: String,
}

impl TransformedRecord {
    pub const HEADERS: [&'static str; 6] = [RECEIPT_NUMBER, CASE_STATUS, DESCRIPTION, DATE, FORM_TYPE, RNS];

    pub fn receipt_number(&self) -> &str { &self.case.receipt_number }
    pub fn case_status(&self) -> &str { &self.case.case_status }

    pub fn to_row(&self) -> Vec<String> {
        let mut row = self.case.to_row();
        row.extend(row![&self.date, &self.form_type, &self.rns]);
        row
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRecord {
    pub receipt_number: String,
    pub form_type: String,
    /// Baseline status, never overwritten.
    pub case_status: String,
    pub date: String,
    /// Latest known status, overwritten when a new change shows up.
    pub case_status_new: String,
    pub date_new: String,
}

impl HistoryRecord {
    pub const HEADERS: [&'static str; 6] = [RECEIPT_NUMBER, FORM_TYPE, CASE_STATUS, DATE, CASE_STATUS_NEW, DATE_NEW];

    /// First sighting: latest == baseline.
    pub fn baseline(rec: &TransformedRecord) -> Self {
        Self {
            receipt_number: rec.case.receipt_number.clone(),
            form_type: rec.form_type.clone(),
            case_status: rec.case.case_status.clone(),
            date: rec.date.clone(),
            case_status_new: rec.case.case_status.clone(),
            date_new: rec.date.clone(),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        row![
            &self.receipt_number,
            &self.form_type,
            &self.case_status,
            &self.date,
            &self.case_status_new,
            &self.date_new,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovedCase {
    pub receipt_number: String,
    pub form_type: String,
    pub case_status: String,
    pub date: String,
}

impl ApprovedCase {
    pub const HEADERS: [&'static str; 4] = [RECEIPT_NUMBER, FORM_TYPE, CASE_STATUS, DATE];

    pub fn to_row(&self) -> Vec<String> {
        row![&self.receipt_number, &self.form_type, &self.case_status, &self.date]
    }
}

impl From<&TransformedRecord> for ApprovedCase {
    fn from(rec: &TransformedRecord) -> Self {
        Self {
            receipt_number: rec.case.receipt_number.clone(),
            form_type: rec.form_type.clone(),
            case_status: rec.case.case_status.clone(),
            date: rec.date.clone(),
        }
    }
}
