// tests/pipeline.rs
//
// Scrape → transform → store → track, end to end over canned status pages.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use case_scrape::config::ScrapeOptions;
use case_scrape::core::CaseSource;
use case_scrape::error::{Error, Result};
use case_scrape::records::HistoryRecord;
use case_scrape::{aggregate, scrape, store, track, transform};

fn page(status: &str, description: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Case Status</title></head><body>
        <div class="container"><form action="/casestatus/mycasestatus.do" method="post">
          <div class="rows text-center">
            <h1>{status}</h1>
            <p>{description}</p>
          </div>
        </form></div></body></html>"#
    )
}

struct Snapshot(HashMap<&'static str, String>);

impl CaseSource for Snapshot {
    fn fetch(&self, receipt_number: &str) -> Result<String> {
        self.0
            .get(receipt_number)
            .cloned()
            .ok_or(Error::Status { status: 404, receipt_number: receipt_number.to_string() })
    }
}

fn day_one() -> Snapshot {
    Snapshot(HashMap::from([
        ("IOE0900000001", page(
            "Case Was Received",
            "On January 5, 2021, we received your Form I-130, Petition for Alien Relative, Receipt Number IOE0900000001, and sent you the receipt notice.",
        )),
        ("IOE0900000002", page(
            "Request for Initial Evidence Was Sent",
            "On February 11, 2021, we sent a request for initial evidence for your Form I-485, Receipt Number IOE0900000002.",
        )),
        ("IOE0900000003", page(
            "Case Was Approved",
            "As of March 3, 2021, we approved your Form I-765, Application for Employment Authorization, Receipt Number IOE0900000003.",
        )),
    ]))
}

fn day_two() -> Snapshot {
    let mut s = day_one();
    s.0.insert("IOE0900000001", page(
        "Case Was Approved",
        "On April 20, 2021, we approved your Form I-130, Petition for Alien Relative, Receipt Number IOE0900000001.",
    ));
    s
}

fn quick() -> ScrapeOptions {
    ScrapeOptions { workers: 2, request_pause_ms: 0, ..ScrapeOptions::default() }
}

fn receipts(dir: &Path) -> Vec<String> {
    let path = dir.join("active_cases.csv");
    fs::write(&path, "IOE0900000001\nIOE0900000002\nIOE0900000003\nIOE0900000004\n").unwrap();
    store::load_receipts(&path).unwrap()
}

#[test]
fn fetch_transform_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let rns = receipts(dir.path());

    let outcome = scrape::collect_cases(&day_one(), &rns, &quick(), None);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, "IOE0900000004");

    let records = transform::transform(outcome.records);
    let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["01-5-2021", "02-11-2021", "03-3-2021"]);
    let forms: Vec<&str> = records.iter().map(|r| r.form_type.as_str()).collect();
    assert_eq!(forms, vec!["I-130", "I-485", "I-765"]);
    assert!(records.iter().all(|r| r.rns == r.receipt_number()));

    // Dump and reload: the stored file is the source for the reports.
    let cases = dir.path().join("out/cases.csv");
    store::save_cases(&cases, &records).unwrap();
    let loaded = store::load_cases(&cases).unwrap();
    assert_eq!(loaded, records);

    assert_eq!(aggregate::active_cases(&loaded), vec!["IOE0900000001", "IOE0900000002"]);
    let s = aggregate::summary(&loaded);
    assert_eq!((s.approved, s.rfe_sent, s.other), (1, 1, 1));
    let approved = aggregate::approved_cases(&loaded);
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].form_type, "I-765");
}

#[test]
fn history_tracks_changes_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let rns = receipts(dir.path());
    let history_path = dir.path().join("history.csv");

    let first = transform::transform(scrape::collect_cases(&day_one(), &rns, &quick(), None).records);
    store::save_history(&history_path, &track::baseline(&first)).unwrap();

    let second = transform::transform(scrape::collect_cases(&day_two(), &rns, &quick(), None).records);
    let history = store::load_history(&history_path).unwrap();
    let (merged, report) = track::merge_with_report(&history, &second);
    assert_eq!((report.changed, report.unchanged, report.unseen), (1, 2, 0));
    store::save_history(&history_path, &merged).unwrap();

    let text = fs::read_to_string(&history_path).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header, HistoryRecord::HEADERS.join(","));
    assert!(!header.contains("Status Changed"));

    let reloaded = store::load_history(&history_path).unwrap();
    let changed = &reloaded[0];
    assert_eq!(changed.case_status, "Case Was Received");
    assert_eq!(changed.date, "01-5-2021");
    assert_eq!(changed.case_status_new, "Case Was Approved");
    assert_eq!(changed.date_new, "04-20-2021");

    // Running the same snapshot again records nothing new.
    let (again, report) = track::merge_with_report(&reloaded, &second);
    assert_eq!(report.changed, 0);
    assert_eq!(again, reloaded);
}
