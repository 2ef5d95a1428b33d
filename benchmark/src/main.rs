use std::error::Error;

use clap::Parser;
use mass_fsync::{experiment, limits, Strategy};
use tracing::{debug, error, info, warn};

/// Time fsync of many freshly written files, sequentially, with one thread per
/// file, and with thread pools of several sizes.
///
/// Runs every strategy for 50, 500, 5000 and 50000 files. Takes no options;
/// set RUST_LOG to change verbosity.
#[derive(clap::Parser)]
#[command(version, about)]
struct Args {}

fn main() {
    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Args {} = Args::parse();

    // every file of a trial is open at once
    let max_file_count = experiment::FILE_COUNTS.iter().copied().max().unwrap_or(0);
    match limits::raise_open_file_limit() {
        Ok(limit) if limit < max_file_count as u64 => {
            warn!("open file limit is {limit}, the {max_file_count} file trial will likely fail")
        }
        Ok(limit) => debug!("open file limit is {limit}"),
        Err(e) => warn!("could not raise open file limit: {e}"),
    }

    let strategies = Strategy::benchmark_set();
    match experiment::run_all(&experiment::FILE_COUNTS, &strategies) {
        Ok(()) => info!("finished {} trials", experiment::FILE_COUNTS.len()),
        Err(e) => {
            let mut message = e.to_string();
            let mut cause = e.source();
            while let Some(c) = cause {
                message.push_str(&format!(": {c}"));
                cause = c.source();
            }
            error!("setup failed: {message}");
            std::process::exit(1);
        }
    }
}
