//! CSV import pipeline for Roster.
//!
//! Turns uploaded CSV text into validated [`StudentRecord`]s and per-row
//! failures. Parsing and mapping are pure and synchronous; only
//! [`process_files`] / [`process_paths`] touch the async runtime, fanning out
//! one task per file.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use roster_core::clock::SystemClock;
//! use roster_csv::{SourceFile, process_files};
//!
//! # async fn run() -> roster_csv::Result<()> {
//! let csv = "name,email,grade,course,enrollmentDate\n\
//!            Jane Doe,jane@example.com,95,Biology,2024-01-15\n";
//! let outcome = process_files(
//!   vec![SourceFile::new("students.csv", csv)],
//!   Arc::new(SystemClock),
//! )
//! .await?;
//! println!("{} ok, {} failed", outcome.successful.len(), outcome.failed.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
mod export;
mod import;
mod map;
mod parse;

pub use error::{Error, Result};
pub use export::{EXPORT_HEADERS, export_csv};
pub use import::{process_files, process_paths};
pub use map::map_rows_to_students;
pub use parse::parse_delimited_text;
use roster_core::{student::StudentRecord, validation::ValidationError};
use serde::{Deserialize, Serialize};

// ─── Public types ────────────────────────────────────────────────────────────

/// One uploaded file, already decoded to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
  pub name:    String,
  pub content: String,
}

impl SourceFile {
  pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
    Self { name: name.into(), content: content.into() }
  }
}

/// Tokenised CSV: the trimmed header cells and one token list per data line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
  pub headers: Vec<String>,
  pub rows:    Vec<Vec<String>>,
}

/// A rejected row: its raw tokens and every rule it broke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
  #[serde(rename = "rowData")]
  pub raw_row: Vec<String>,
  pub errors:  Vec<ValidationError>,
}

/// The rows of a single file, partitioned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedRows {
  pub students: Vec<StudentRecord>,
  pub failures: Vec<RowFailure>,
}

impl MappedRows {
  /// Rows that produced either a record or a failure.
  pub fn row_count(&self) -> usize { self.students.len() + self.failures.len() }
}

/// A file that contributed no rows, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
  pub file:   String,
  pub reason: String,
}

/// Aggregate of one import run over any number of files.
///
/// `successful` and `failed` are in file submission order, then row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
  pub successful:    Vec<StudentRecord>,
  pub failed:        Vec<RowFailure>,
  /// `successful.len() + failed.len()`; skipped blank rows are not counted.
  pub total_rows:    usize,
  pub skipped_files: Vec<SkippedFile>,
}
