// src/config/consts.rs

// Net config
pub const ENDPOINT: &str = "https://egov.uscis.gov/casestatus/mycasestatus.do";
pub const USER_AGENT: &str = concat!("case_scrape/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 30;

// Form fields posted per receipt number
pub const FORM_LOCALE: &str = "changeLocale";
pub const FORM_RECEIPT: &str = "appReceiptNum";
pub const FORM_SEARCH: &str = "initCaseSearch";
pub const FORM_SEARCH_VALUE: &str = "CHECK STATUS";

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const CONFIG_FILE: &str = "case_scrape.cfg";
pub const SEP: char = ',';

// Input / output
pub const DEFAULT_INPUT: &str = "active_cases/active_cases.csv";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const CASES_FILE: &str = "cases.csv";
pub const HISTORY_FILE: &str = "history.csv";
pub const APPROVED_FILE: &str = "approved.csv";
pub const ACTIVE_FILE: &str = "active_cases.csv";
pub const RECEIPTS_FILE: &str = "receipts.csv";

// Receipt numbers
pub const RECEIPT_LEN: usize = 13;
pub const LOCATION_PREFIX_LEN: usize = 4;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
