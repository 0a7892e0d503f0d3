// src/bin/cli.rs
use clap::Parser;

use case_scrape::cli::{self, Cli};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    case_scrape::log::init(args.verbose);
    cli::run(args)?;
    Ok(())
}
