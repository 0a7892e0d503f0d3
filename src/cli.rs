// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::{
    aggregate, config,
    config::AppOptions,
    config::consts::{ACTIVE_FILE, APPROVED_FILE, CASES_FILE, HISTORY_FILE, RECEIPTS_FILE},
    core::StatusClient,
    error::Result,
    generate, progress::LogProgress, scrape, store, track, transform,
};

/// Check USCIS case statuses and keep a status history.
#[derive(Debug, Parser)]
#[command(name = "case_scrape", version, about)]
pub struct Cli {
    /// key = value config file (default: ./case_scrape.cfg when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write receipt numbers around a seed, one per line.
    Generate(GenerateArgs),
    /// Check every receipt number in the input file and save the parsed cases.
    Fetch(FetchArgs),
    /// Print status bucket counts for a case dump.
    Summary(SummaryArgs),
    /// Write receipt numbers that are still waiting for a decision.
    Active(ActiveArgs),
    /// Write approved cases.
    Approved(ApprovedArgs),
    /// Merge a fresh case dump into the status history.
    Track(TrackArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Known receipt number, e.g. IOE0900000001.
    #[arg(long)]
    pub seed: String,
    /// How many numbers to generate.
    #[arg(long, default_value_t = 100)]
    pub count: usize,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Active-cases CSV (receipt number in the first column, no header).
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Concurrent requests.
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Case dump written by `fetch`.
    pub cases: PathBuf,
    /// Also print the status distribution for this form type (e.g. I-130).
    #[arg(long)]
    pub form_type: Option<String>,
}

#[derive(Debug, Args)]
pub struct ActiveArgs {
    pub cases: PathBuf,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ApprovedArgs {
    pub cases: PathBuf,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Status history; created from the recent dump when missing.
    #[arg(long)]
    pub history: Option<PathBuf>,
    /// Case dump to merge in.
    #[arg(long)]
    pub recent: PathBuf,
    /// Where to write the merged history (default: overwrite --history).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Add cases not yet in the history as new baseline rows.
    #[arg(long)]
    pub append_new: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    let mut opts = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(&opts, args),
        Command::Fetch(args) => {
            if let Some(w) = args.workers { opts.scrape.workers = w.max(1); }
            if let Some(i) = &args.input { opts.input = i.clone(); }
            run_fetch(&opts, args.out.as_deref())
        }
        Command::Summary(args) => run_summary(args),
        Command::Active(args) => run_active(&opts, args),
        Command::Approved(args) => run_approved(&opts, args),
        Command::Track(args) => run_track(&opts, args),
    }
}

fn run_generate(opts: &AppOptions, args: GenerateArgs) -> Result<()> {
    let receipts = generate::generate_receipt_numbers(&args.seed, args.count)?;
    if receipts.len() < args.count {
        warn!(requested = args.count, generated = receipts.len(), "sequence cut short at receipt number width");
    }
    let path = opts.out_or_default(args.out.as_deref(), RECEIPTS_FILE);
    store::save_receipts(&path, &receipts)?;
    println!("Wrote {} receipt numbers to {}", receipts.len(), path.display());
    Ok(())
}

fn run_fetch(opts: &AppOptions, out: Option<&Path>) -> Result<()> {
    let receipts = store::load_receipts(&opts.input)?;
    info!(input = %opts.input.display(), count = receipts.len(), "receipt numbers loaded");

    let client = StatusClient::new(&opts.scrape.endpoint, opts.scrape.timeout())?;
    let mut progress = LogProgress::default();
    let outcome = scrape::collect_cases(&client, &receipts, &opts.scrape, Some(&mut progress));

    let records = transform::transform(outcome.records);
    let path = opts.out_or_default(out, CASES_FILE);
    store::save_cases(&path, &records)?;

    if !outcome.failed.is_empty() {
        warn!(failed = outcome.failed.len(), "some receipt numbers could not be checked");
    }
    println!("Wrote {} cases to {} ({} failed)", records.len(), path.display(), outcome.failed.len());
    Ok(())
}

fn run_summary(args: SummaryArgs) -> Result<()> {
    let records = store::load_cases(&args.cases)?;
    print!("{}", aggregate::summary(&records));
    if let Some(form) = args.form_type {
        println!();
        print!("{}", aggregate::distribution(&records, &form));
    }
    Ok(())
}

fn run_active(opts: &AppOptions, args: ActiveArgs) -> Result<()> {
    let records = store::load_cases(&args.cases)?;
    let active = aggregate::active_cases(&records);
    let path = opts.out_or_default(args.out.as_deref(), ACTIVE_FILE);
    store::save_receipts(&path, &active)?;
    println!("Wrote {} active cases to {}", active.len(), path.display());
    Ok(())
}

fn run_approved(opts: &AppOptions, args: ApprovedArgs) -> Result<()> {
    let records = store::load_cases(&args.cases)?;
    let approved = aggregate::approved_cases(&records);
    let path = opts.out_or_default(args.out.as_deref(), APPROVED_FILE);
    store::save_approved(&path, &approved)?;
    println!("Wrote {} approved cases to {}", approved.len(), path.display());
    Ok(())
}

fn run_track(opts: &AppOptions, args: TrackArgs) -> Result<()> {
    let history_path = args.history.unwrap_or_else(|| opts.out_file(HISTORY_FILE));
    let out_path = args.out.unwrap_or_else(|| history_path.clone());
    let recent = store::load_cases(&args.recent)?;

    if !history_path.exists() {
        let history = track::baseline(&recent);
        store::save_history(&out_path, &history)?;
        println!("Started history with {} cases at {}", history.len(), out_path.display());
        return Ok(());
    }

    let history = store::load_history(&history_path)?;
    let (mut merged, report) = track::merge_with_report(&history, &recent);

    let mut added = 0;
    if args.append_new {
        let new_rows = track::unseen_in_history(&history, &recent);
        added = new_rows.len();
        merged.extend(new_rows.into_iter().map(crate::records::HistoryRecord::baseline));
    }

    store::save_history(&out_path, &merged)?;
    println!(
        "{} changed, {} unchanged, {} not in snapshot, {} added -> {}",
        report.changed,
        report.unchanged,
        report.unseen,
        added,
        out_path.display()
    );
    Ok(())
}
