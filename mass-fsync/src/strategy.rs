use std::{
    fmt, io,
    num::NonZeroUsize,
    sync::{Mutex, PoisonError},
    thread::{self, Scope},
};

use crate::{partition::stride_indices, SyncTarget};


/// Pool sizes exercised by [`Strategy::benchmark_set`], in order.
pub const POOL_DEGREES: [usize; 4] = [32, 64, 128, 256];

// only ever runs fsync; the default 2 MiB adds up with one thread per file
const SYNC_THREAD_STACK_SIZE: usize = 256 * 1024;

/// How to sync a set of targets.
///
/// Every variant returns only after each target has been synced exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One target after another on the calling thread.
    Naive,
    /// One thread per target.
    FanOut,
    /// A fixed number of threads, each owning a strided slice of the targets.
    /// See [`crate::partition`].
    WorkerPool(NonZeroUsize),
}

impl Strategy {
    /// Naive, fan-out, then one worker pool per entry of [`POOL_DEGREES`].
    pub fn benchmark_set() -> Vec<Strategy> {
        let mut strategies = vec![Strategy::Naive, Strategy::FanOut];
        strategies.extend(
            POOL_DEGREES
                .iter()
                .filter_map(|&degree| NonZeroUsize::new(degree))
                .map(Strategy::WorkerPool),
        );
        strategies
    }

    pub fn name(&self) -> String {
        match self {
            Strategy::Naive => "naive".to_owned(),
            Strategy::FanOut => "thread-per-sync".to_owned(),
            Strategy::WorkerPool(degree) => format!("thread-pool-{degree}"),
        }
    }

    /// Sync every target, ignoring failures.
    pub fn sync_all<T>(&self, targets: &[T]) -> SpawnFallback
    where
        T: SyncTarget + Sync,
    {
        self.sync_all_with(targets, &|_: usize, _: io::Error| {})
    }

    /// Like [`Self::sync_all`], but every failed sync is passed to `on_error`
    /// together with the target's index. `on_error` may be called concurrently
    /// from several threads.
    pub fn sync_all_with<T, E>(&self, targets: &[T], on_error: &E) -> SpawnFallback
    where
        T: SyncTarget + Sync,
        E: Fn(usize, io::Error) + Sync,
    {
        if targets.is_empty() {
            return SpawnFallback::default();
        }
        match self {
            Strategy::Naive => sync_naive(targets, on_error),
            Strategy::FanOut => sync_fan_out(targets, on_error),
            Strategy::WorkerPool(degree) => sync_worker_pool(targets, *degree, on_error),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn sync_one<T, E>(targets: &[T], index: usize, on_error: &E)
where
    T: SyncTarget,
    E: Fn(usize, io::Error),
{
    if let Err(e) = targets[index].sync() {
        on_error(index, e);
    }
}

fn sync_naive<T, E>(targets: &[T], on_error: &E) -> SpawnFallback
where
    T: SyncTarget,
    E: Fn(usize, io::Error),
{
    for index in 0..targets.len() {
        sync_one(targets, index, on_error);
    }
    SpawnFallback::default()
}

fn sync_fan_out<T, E>(targets: &[T], on_error: &E) -> SpawnFallback
where
    T: SyncTarget + Sync,
    E: Fn(usize, io::Error) + Sync,
{
    let mut fallback = SpawnFallback::default();
    thread::scope(|scope| {
        for index in 0..targets.len() {
            fallback.spawn_or_run(scope, move || sync_one(targets, index, on_error));
        }
    });
    fallback
}

fn sync_worker_pool<T, E>(targets: &[T], degree: NonZeroUsize, on_error: &E) -> SpawnFallback
where
    T: SyncTarget + Sync,
    E: Fn(usize, io::Error) + Sync,
{
    let len = targets.len();
    let mut fallback = SpawnFallback::default();
    thread::scope(|scope| {
        for worker in 0..degree.get() {
            fallback.spawn_or_run(scope, move || {
                for index in stride_indices(worker, degree, len) {
                    sync_one(targets, index, on_error);
                }
            });
        }
    });
    fallback
}

/// Units of work a sync pass ran on the calling thread because the OS refused
/// to give it another thread. No target is ever skipped.
///
/// Strategies never log; callers report this after the pass.
#[derive(Debug, Default)]
pub struct SpawnFallback {
    pub inline_units: usize,
    pub first_error: Option<io::Error>,
}

impl SpawnFallback {
    fn spawn_or_run<'scope, 'env, F>(&mut self, scope: &'scope Scope<'scope, 'env>, work: F)
    where
        F: FnOnce() + Copy + Send + 'scope,
    {
        let spawned = thread::Builder::new()
            .stack_size(SYNC_THREAD_STACK_SIZE)
            .spawn_scoped(scope, work);
        if let Err(e) = spawned {
            self.inline_units += 1;
            self.first_error.get_or_insert(e);
            work();
        }
    }
}

/// Thread-safe collector for use with [`Strategy::sync_all_with`].
///
/// ```rust
/// use mass_fsync::{Strategy, SyncErrors};
///
/// let dir = tempfile::tempdir().unwrap();
/// let files = mass_fsync::experiment::create_files(dir.path(), 4).unwrap();
/// let errors = SyncErrors::new();
/// Strategy::FanOut.sync_all_with(&files, &|index, e| errors.record(index, e));
/// assert!(errors.into_inner().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct SyncErrors {
    errors: Mutex<Vec<(usize, io::Error)>>,
}

impl SyncErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, index: usize, error: io::Error) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((index, error));
    }

    /// The recorded errors, ordered by target index.
    pub fn into_inner(self) -> Vec<(usize, io::Error)> {
        let mut errors = self
            .errors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        errors.sort_by_key(|(index, _)| *index);
        errors
    }
}
