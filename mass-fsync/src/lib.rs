//! Measure the cost of durably persisting many freshly written files.
//!
//! # Usage
//!
//! 1. Pick a [`Strategy`]: [`Strategy::Naive`], [`Strategy::FanOut`] or a
//!    [`Strategy::WorkerPool`] with a fixed degree.
//! 2. Hand it a slice of [`SyncTarget`]s (usually [`std::fs::File`]s).
//! 3. [`Strategy::sync_all`] returns once every target has been synced.
//!
//! Sync failures are ignored by default. Use [`Strategy::sync_all_with`] and,
//! for example, a [`SyncErrors`] collector to observe them.
//!
//! ```rust
//! use mass_fsync::Strategy;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let files = mass_fsync::experiment::create_files(dir.path(), 8).unwrap();
//! for strategy in Strategy::benchmark_set() {
//!     strategy.sync_all(&files);
//! }
//! ```
//!
//! The [`experiment`] module drives all strategies over a scratch directory and
//! logs how long each one took.

mod error;
pub mod experiment;
pub mod limits;
pub mod partition;
mod strategy;
mod sync_target;

pub use error::SetupError;
pub use strategy::{SpawnFallback, Strategy, SyncErrors, POOL_DEGREES};
pub use sync_target::SyncTarget;
