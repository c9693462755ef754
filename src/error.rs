//! Error types for the pager core

use std::io;
use std::path::PathBuf;

/// Errors surfaced by the chunked buffer subsystem
#[derive(Debug)]
pub enum PagerError {
    /// The file could not be opened or inspected at startup
    FileOpen { path: PathBuf, source: io::Error },

    /// A read or stat failed while the pager was running
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, PagerError>;

impl std::fmt::Display for PagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PagerError::FileOpen { path, source } => {
                write!(f, "cannot open {}: {}", path.display(), source)
            }
            PagerError::Io(err) => write!(f, "read error: {}", err),
        }
    }
}

impl std::error::Error for PagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PagerError::FileOpen { source, .. } => Some(source),
            PagerError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for PagerError {
    fn from(err: io::Error) -> Self {
        PagerError::Io(err)
    }
}
