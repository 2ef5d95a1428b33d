use std::{io, path::PathBuf};

/// Failure while preparing a trial. There is no recovery from these.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("create scratch directory")]
    CreateScratchDir(#[source] io::Error),
    #[error("create file {index} at {path:?}")]
    CreateFile {
        index: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
