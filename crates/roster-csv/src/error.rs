//! Error types for the roster-csv import pipeline.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An import run was started with an empty file list.
  #[error("no files supplied for import")]
  NoFiles,

  /// The content has no non-blank line to use as a header.
  #[error("file has no header line")]
  MissingHeader,

  #[error("failed to read {path:?}: {source}")]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("{0:?} is not valid UTF-8 text")]
  NotUtf8(PathBuf),

  /// A per-file task panicked or was cancelled.
  #[error("import task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
