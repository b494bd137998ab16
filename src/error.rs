use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or persisting the target file.
///
/// There is no recoverable variant: any of these aborts the run.
#[derive(Error, Debug)]
pub enum AugmentError {
    #[error("target file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

