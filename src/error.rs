//! Crate-wide error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnagramError>;

#[derive(Debug, Error)]
pub enum AnagramError {
    #[error("could not open dictionary file {path}: {source}")]
    DictionaryUnreadable { path: std::path::PathBuf, source: std::io::Error },

    #[error("terminal I/O error: {0}")]
    Terminal(#[from] std::io::Error),
}
