//! One trial per file count: create the files, warm up, then for every
//! strategy write a fresh byte into each file and time a full sync pass.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    time::{Duration, Instant},
};

use rand::Rng;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::{SetupError, SpawnFallback, Strategy, SyncTarget};

/// File counts of the full benchmark, run in this order.
pub const FILE_COUNTS: [usize; 4] = [50, 500, 5000, 50000];

const SCRATCH_DIR_PREFIX: &str = "massfsyncexperiment";

#[derive(Debug, Clone, Copy)]
pub struct StrategyTiming {
    pub strategy: Strategy,
    pub elapsed: Duration,
}

/// Timings of one trial, handed back to the caller of [`run_trial`] and not
/// kept anywhere else.
#[derive(Debug, Clone)]
pub struct TrialReport {
    pub file_count: usize,
    pub timings: Vec<StrategyTiming>,
}

/// Uniquely named directory in the OS temp area, removed on drop.
pub fn create_scratch_dir() -> Result<TempDir, SetupError> {
    tempfile::Builder::new()
        .prefix(SCRATCH_DIR_PREFIX)
        .tempdir()
        .map_err(SetupError::CreateScratchDir)
}

/// Create `count` empty files named `0..count` inside `dir`, in index order.
pub fn create_files(dir: &Path, count: usize) -> Result<Vec<File>, SetupError> {
    (0..count)
        .map(|index| {
            let path = dir.join(index.to_string());
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(&path)
                .map_err(|source| SetupError::CreateFile {
                    index,
                    path,
                    source,
                })
        })
        .collect()
}

/// Append one random byte to every file. Returns how many writes failed.
pub fn write_random_byte<R: Rng>(files: &[File], rng: &mut R) -> usize {
    let mut failed = 0;
    for mut file in files {
        if let Err(e) = file.write_all(&[rng.gen::<u8>()]) {
            if failed == 0 {
                warn!("write failed, continuing: {e}");
            }
            failed += 1;
        }
    }
    if failed > 0 {
        warn!("{failed} of {} writes failed", files.len());
    }
    failed
}

/// Wall-clock time of a single `strategy` pass over `targets`.
pub fn time_strategy<T>(strategy: Strategy, targets: &[T]) -> (Duration, SpawnFallback)
where
    T: SyncTarget + Sync,
{
    let start = Instant::now();
    let fallback = strategy.sync_all(targets);
    (start.elapsed(), fallback)
}

/// Run one trial in a fresh scratch directory that is removed afterwards,
/// also when setup fails half-way.
pub fn run_trial(file_count: usize, strategies: &[Strategy]) -> Result<TrialReport, SetupError> {
    info!("--- BEGIN {file_count} FILES ---");
    let scratch = create_scratch_dir()?;
    debug!("scratch directory {:?}", scratch.path());
    let report = run_trial_in(scratch.path(), file_count, strategies)?;
    // best-effort
    let _ = scratch.close();
    info!("");
    Ok(report)
}

/// Same as [`run_trial`], but inside a caller-owned directory.
pub fn run_trial_in(
    dir: &Path,
    file_count: usize,
    strategies: &[Strategy],
) -> Result<TrialReport, SetupError> {
    info!("creating {file_count} files");
    let files = create_files(dir, file_count)?;

    // first syncs after creation also persist directory metadata; keep them out of the measurements
    let _ = Strategy::Naive.sync_all(&files);

    let mut rng = rand::thread_rng();
    let mut timings = Vec::with_capacity(strategies.len());
    for &strategy in strategies {
        info!("writing random byte to {file_count} files");
        write_random_byte(&files, &mut rng);

        info!("syncing files using {strategy}");
        let (elapsed, fallback) = time_strategy(strategy, &files);
        info!("sync took {} seconds", elapsed.as_secs_f64());
        if let Some(e) = &fallback.first_error {
            warn!(
                "{strategy}: could not spawn {} threads, ran their work inline: {e}",
                fallback.inline_units
            );
        }

        timings.push(StrategyTiming { strategy, elapsed });
    }

    Ok(TrialReport {
        file_count,
        timings,
    })
}

/// Run trials back to back, stopping at the first setup failure. Timings
/// only go to the log.
pub fn run_all(file_counts: &[usize], strategies: &[Strategy]) -> Result<(), SetupError> {
    for &file_count in file_counts {
        run_trial(file_count, strategies)?;
    }
    Ok(())
}
