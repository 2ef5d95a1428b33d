//! Every file of a trial stays open until the trial ends, so the largest trial
//! needs about as many file descriptors as it has files.

use nix::{
    libc::rlim_t,
    sys::resource::{getrlimit, setrlimit, Resource},
};
use tracing::debug;

/// Raise the soft `RLIMIT_NOFILE` to the hard limit and return the new soft limit.
pub fn raise_open_file_limit() -> nix::Result<rlim_t> {
    let (soft, hard) = getrlimit(Resource::RLIMIT_NOFILE)?;
    if soft < hard {
        setrlimit(Resource::RLIMIT_NOFILE, hard, hard)?;
        debug!("raised open file limit from {soft} to {hard}");
    }
    Ok(hard)
}
