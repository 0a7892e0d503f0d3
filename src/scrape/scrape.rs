// src/scrape/scrape.rs
use std::{
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }},
    thread,
};

use crate::{
    config::ScrapeOptions,
    core::CaseSource,
    error::Result,
    progress::Progress,
    records::CaseRecord,
    specs::case_status,
};

/// Parsed records in input order, plus the receipt numbers that were dropped.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    pub records: Vec<CaseRecord>,
    pub failed: Vec<(String, String)>,
}

/// Fetch and parse every receipt number. A failure drops only that record.
pub fn collect_cases<S: CaseSource + Sync + ?Sized>(
    source: &S,
    receipts: &[String],
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> ScrapeOutcome {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(receipts.len());
    }
    if receipts.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No receipt numbers to check.");
            p.finish();
        }
        return ScrapeOutcome::default();
    }

    // Concurrency
    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<CaseRecord>)>();
    let workers = opts.workers.min(receipts.len()).max(1);

    let mut done: Vec<(usize, CaseRecord)> = Vec::with_capacity(receipts.len());
    let mut failed: Vec<(usize, String)> = Vec::new();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    let Some(rn) = receipts.get(i) else { break };
                    let result = case_status::fetch(source, rn);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    thread::sleep(opts.pause_after(i)); // be polite
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx {
            let rn = &receipts[i];
            match result {
                Ok(rec) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(rn);
                    }
                    done.push((i, rec));
                }
                Err(e) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(rn, &e.to_string());
                    }
                    tracing::error!(receipt_number = %rn, error = %e, "record dropped");
                    failed.push((i, e.to_string()));
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    done.sort_by_key(|(i, _)| *i);
    failed.sort_by_key(|(i, _)| *i);

    ScrapeOutcome {
        records: done.into_iter().map(|(_, rec)| rec).collect(),
        failed: failed.into_iter().map(|(i, msg)| (receipts[i].clone(), msg)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use crate::error::Error;

    /// Serves a page quoting the requested number; `BAD` numbers get a page without a heading.
    struct FakeSite {
        calls: Mutex<Vec<String>>,
    }

    impl CaseSource for FakeSite {
        fn fetch(&self, receipt_number: &str) -> Result<String> {
            self.calls.lock().unwrap().push(s!(receipt_number));
            if receipt_number.starts_with("BAD") {
                return Ok(s!("<div><p>Service unavailable</p></div>"));
            }
            if receipt_number.starts_with("DOWN") {
                return Err(Error::Status { status: 503, receipt_number: s!(receipt_number) });
            }
            Ok(format!(
                "<div><h1>Case Was Received</h1><p>On May 2, 2020, we received your Form I-485, Receipt Number {receipt_number}, and</p></div>"
            ))
        }
    }

    fn opts(workers: usize) -> ScrapeOptions {
        ScrapeOptions { workers, request_pause_ms: 0, ..ScrapeOptions::default() }
    }

    #[derive(Default)]
    struct Counting { begun: usize, done: usize, failed: usize, finished: bool }

    impl Progress for Counting {
        fn begin(&mut self, total: usize) { self.begun = total; }
        fn item_done(&mut self, _: &str) { self.done += 1; }
        fn item_failed(&mut self, _: &str, _: &str) { self.failed += 1; }
        fn finish(&mut self) { self.finished = true; }
    }

    #[test]
    fn results_keep_input_order_and_failures_are_isolated() {
        let site = FakeSite { calls: Mutex::new(Vec::new()) };
        let receipts: Vec<String> = (0..20)
            .map(|i| match i {
                5 => s!("BAD0000000005"),
                11 => s!("DOWN000000011"),
                _ => format!("IOE09000000{i:02}"),
            })
            .collect();

        let mut progress = Counting::default();
        let out = collect_cases(&site, &receipts, &opts(4), Some(&mut progress));

        assert_eq!(out.records.len(), 18);
        let got: Vec<&str> = out.records.iter().map(|r| r.receipt_number.as_str()).collect();
        let want: Vec<&str> = receipts
            .iter()
            .map(String::as_str)
            .filter(|r| r.starts_with("IOE"))
            .collect();
        assert_eq!(got, want);

        assert_eq!(out.failed.len(), 2);
        assert_eq!(out.failed[0].0, "BAD0000000005");
        assert!(out.failed[0].1.contains("div h1"));
        assert_eq!(out.failed[1].0, "DOWN000000011");

        assert_eq!(site.calls.lock().unwrap().len(), 20);
        assert_eq!((progress.begun, progress.done, progress.failed, progress.finished), (20, 18, 2, true));
    }

    #[test]
    fn single_worker_and_empty_input() {
        let site = FakeSite { calls: Mutex::new(Vec::new()) };
        let out = collect_cases(&site, &[], &opts(4), None);
        assert!(out.records.is_empty() && out.failed.is_empty());

        let out = collect_cases(&site, &[s!("IOE0900000001")], &opts(1), None);
        assert_eq!(out.records[0].case_status, "Case Was Received");
    }
}
