//! Handler for `POST /imports`.
//!
//! Runs the CSV pipeline over the uploaded files and, unless `dryRun` is set,
//! persists every successful row in one batch. Failed rows are returned to the
//! caller and never stored.

use axum::{Json, extract::State};
use roster_core::{
  store::StudentStore,
  student::{NewStudent, Student},
};
use roster_csv::{ImportOutcome, SourceFile, process_files};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiState, error::ApiError};

/// One uploaded file, already decoded to text by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
  pub name:    String,
  pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBody {
  pub files:      Vec<UploadedFile>,
  /// Recorded as `createdBy` on every persisted student.
  pub created_by: Option<String>,
  #[serde(default)]
  pub dry_run:    bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
  pub outcome:   ImportOutcome,
  /// The stored rows, in the same order as `outcome.successful`. Empty on a
  /// dry run.
  pub persisted: Vec<Student>,
}

/// `POST /imports`, body: `{"files":[{"name":..,"content":..}],"createdBy":..,"dryRun":..}`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ImportBody>,
) -> Result<Json<ImportResponse>, ApiError>
where
  S: StudentStore,
{
  let files = body
    .files
    .into_iter()
    .map(|f| SourceFile::new(f.name, f.content))
    .collect();

  let outcome = process_files(files, state.clock.clone()).await?;

  let persisted = if body.dry_run || outcome.successful.is_empty() {
    Vec::new()
  } else {
    let inputs = outcome
      .successful
      .iter()
      .cloned()
      .map(|r| NewStudent::from_record(r, body.created_by.clone()))
      .collect();
    state
      .store
      .add_students(inputs)
      .await
      .map_err(ApiError::store)?
  };

  info!(
    total_rows = outcome.total_rows,
    successful = outcome.successful.len(),
    failed = outcome.failed.len(),
    skipped_files = outcome.skipped_files.len(),
    persisted = persisted.len(),
    dry_run = body.dry_run,
    "import finished"
  );

  Ok(Json(ImportResponse { outcome, persisted }))
}
