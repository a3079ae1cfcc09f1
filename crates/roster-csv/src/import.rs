//! Multi-file import: one task per file, merged in submission order.

use std::{path::PathBuf, sync::Arc};

use roster_core::clock::Clock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
  ImportOutcome, MappedRows, SkippedFile, SourceFile,
  error::{Error, Result},
  map::map_rows_to_students,
  parse::parse_delimited_text,
};

/// What one file task produced.
#[derive(Debug)]
pub(crate) enum FileOutcome {
  Mapped { file: String, rows: MappedRows },
  Skipped(SkippedFile),
}

impl FileOutcome {
  fn from_content(
    file: String,
    content: &str,
    file_index: usize,
    clock: &dyn Clock,
  ) -> Self {
    match parse_delimited_text(content) {
      Ok(parsed) => Self::Mapped {
        rows: map_rows_to_students(&parsed, file_index, clock),
        file,
      },
      Err(e) => Self::skipped(file, &e),
    }
  }

  fn skipped(file: String, reason: &Error) -> Self {
    Self::Skipped(SkippedFile { file, reason: reason.to_string() })
  }
}

/// Parse, map and validate every file concurrently and merge the results.
///
/// Files that cannot be parsed contribute no rows and are listed in
/// [`ImportOutcome::skipped_files`]. The only errors are an empty `files`
/// list and a task that did not run to completion.
pub async fn process_files(
  files: Vec<SourceFile>,
  clock: Arc<dyn Clock>,
) -> Result<ImportOutcome> {
  if files.is_empty() {
    return Err(Error::NoFiles);
  }

  let handles = files
    .into_iter()
    .enumerate()
    .map(|(file_index, source)| {
      let clock = Arc::clone(&clock);
      tokio::spawn(async move {
        FileOutcome::from_content(
          source.name,
          &source.content,
          file_index,
          clock.as_ref(),
        )
      })
    })
    .collect();

  merge_in_order(handles).await
}

/// Like [`process_files`], but each task reads its file from disk first.
/// Unreadable or non-UTF-8 files are skipped.
pub async fn process_paths(
  paths: Vec<PathBuf>,
  clock: Arc<dyn Clock>,
) -> Result<ImportOutcome> {
  if paths.is_empty() {
    return Err(Error::NoFiles);
  }

  let handles = paths
    .into_iter()
    .enumerate()
    .map(|(file_index, path)| {
      let clock = Arc::clone(&clock);
      tokio::spawn(async move {
        let file = path.display().to_string();
        match read_text(path).await {
          Ok(content) => {
            FileOutcome::from_content(file, &content, file_index, clock.as_ref())
          }
          Err(e) => FileOutcome::skipped(file, &e),
        }
      })
    })
    .collect();

  merge_in_order(handles).await
}

async fn read_text(path: PathBuf) -> Result<String> {
  let bytes = match tokio::fs::read(&path).await {
    Ok(b) => b,
    Err(source) => return Err(Error::Io { path, source }),
  };
  String::from_utf8(bytes).map_err(|_| Error::NotUtf8(path))
}

/// Await every task in submission order, regardless of which finishes first,
/// and fold the per-file results into one outcome.
pub(crate) async fn merge_in_order(
  handles: Vec<JoinHandle<FileOutcome>>,
) -> Result<ImportOutcome> {
  let mut outcome = ImportOutcome::default();

  for handle in handles {
    match handle.await? {
      FileOutcome::Mapped { file, rows } => {
        info!(
          file = %file,
          successful = rows.students.len(),
          failed = rows.failures.len(),
          "file imported"
        );
        outcome.total_rows += rows.row_count();
        outcome.successful.extend(rows.students);
        outcome.failed.extend(rows.failures);
      }
      FileOutcome::Skipped(skipped) => {
        warn!(file = %skipped.file, reason = %skipped.reason, "file skipped");
        outcome.skipped_files.push(skipped);
      }
    }
  }

  Ok(outcome)
}
