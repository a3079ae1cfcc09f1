//! The `roster import` command: run the CSV pipeline over files on disk and
//! store the rows that passed validation.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use roster_core::{clock::Clock, store::StudentStore, student::NewStudent};
use roster_csv::{ImportOutcome, process_paths};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
  /// Validate and report only.
  pub dry_run:    bool,
  pub created_by: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImportReport {
  pub files:     usize,
  pub outcome:   ImportOutcome,
  /// Number of rows written to the store; `0` on a dry run.
  pub persisted: usize,
  pub dry_run:   bool,
}

/// Import `paths` into `store`.
pub async fn import_paths<S>(
  store: &S,
  paths: Vec<PathBuf>,
  opts:  &ImportOptions,
  clock: Arc<dyn Clock>,
) -> anyhow::Result<ImportReport>
where
  S: StudentStore,
{
  let files = paths.len();
  let outcome = process_paths(paths, clock)
    .await
    .context("import failed")?;

  let persisted = if opts.dry_run || outcome.successful.is_empty() {
    0
  } else {
    let inputs: Vec<NewStudent> = outcome
      .successful
      .iter()
      .cloned()
      .map(|r| NewStudent::from_record(r, opts.created_by.clone()))
      .collect();
    store
      .add_students(inputs)
      .await
      .context("failed to save imported students")?
      .len()
  };

  info!(files, persisted, dry_run = opts.dry_run, "import finished");

  Ok(ImportReport { files, outcome, persisted, dry_run: opts.dry_run })
}

/// Human-readable summary printed after an import.
pub fn summary(report: &ImportReport) -> String {
  let o = &report.outcome;

  let failures: String = o
    .failed
    .iter()
    .map(|failure| {
      let row = failure.errors.first().map_or(0, |e| e.row);
      let messages: Vec<&str> =
        failure.errors.iter().map(|e| e.message.as_str()).collect();
      format!("  row {row}: {}\n", messages.join("; "))
    })
    .collect();
  let skipped: String = o
    .skipped_files
    .iter()
    .map(|s| format!("  skipped {}: {}\n", s.file, s.reason))
    .collect();
  let footer = if report.dry_run {
    "Dry run: nothing was saved.".to_owned()
  } else {
    format!("Saved {} student(s).", report.persisted)
  };

  format!(
    "Processed {} rows from {} file(s): {} valid, {} invalid.\n{failures}{skipped}{footer}\n",
    o.total_rows,
    report.files,
    o.successful.len(),
    o.failed.len(),
  )
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use roster_core::{clock::FixedClock, store::StudentQuery};
  use roster_store_sqlite::SqliteStore;

  use super::*;

  const CSV: &str = "name,email,grade,course,enrollmentDate\n\
                     Jane Doe,jane@example.com,95,Biology,2024-01-15\n\
                     ,bad-email,150,,2024-13-45\n";

  fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()))
  }

  async fn write_csv() -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("roster-import-{}", uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let path = dir.join("students.csv");
    tokio::fs::write(&path, CSV).await.unwrap();
    (dir, path)
  }

  #[tokio::test]
  async fn import_saves_valid_rows() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let (dir, path) = write_csv().await;
    let opts = ImportOptions { dry_run: false, created_by: Some("admin".into()) };

    let report = import_paths(&store, vec![path], &opts, clock()).await.unwrap();
    assert_eq!(report.persisted, 1);
    assert_eq!(report.outcome.failed.len(), 1);

    let stored = store.list_students(&StudentQuery::default()).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].created_by.as_deref(), Some("admin"));

    let text = summary(&report);
    assert!(text.starts_with("Processed 2 rows from 1 file(s): 1 valid, 1 invalid."));
    assert!(text.contains("row 3: Name is required; Email is not valid"));
    assert!(text.contains("Saved 1 student(s)."));

    tokio::fs::remove_dir_all(&dir).await.ok();
  }

  #[tokio::test]
  async fn dry_run_saves_nothing() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let (dir, path) = write_csv().await;
    let opts = ImportOptions { dry_run: true, created_by: None };

    let report = import_paths(&store, vec![path], &opts, clock()).await.unwrap();
    assert_eq!(report.persisted, 0);
    assert_eq!(report.outcome.successful.len(), 1);
    assert!(store.list_students(&StudentQuery::default()).await.unwrap().is_empty());
    assert!(report.dry_run);
    let text = summary(&report);
    assert!(text.ends_with("Dry run: nothing was saved.\n"));
    assert!(!text.contains("Saved"));

    tokio::fs::remove_dir_all(&dir).await.ok();
  }

  #[tokio::test]
  async fn missing_file_is_listed_as_skipped() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let report = import_paths(
      &store,
      vec![PathBuf::from("/nonexistent/roster.csv")],
      &ImportOptions::default(),
      clock(),
    )
    .await
    .unwrap();

    assert_eq!(report.outcome.total_rows, 0);
    assert!(summary(&report).contains("skipped /nonexistent/roster.csv"));
  }
}
