//! Error types for fixdates.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A root directory or file is missing or cannot be stat'ed.
    #[error("not found: {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Every enabled date source came up empty.
    #[error("no date could be derived for {}", path.display())]
    DateParse { path: PathBuf },

    #[error("rename target already exists: {}", path.display())]
    TargetExists { path: PathBuf },

    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
