//! Header-driven mapping of token rows onto student drafts.
//!
//! Columns are found by name, so column order and extra columns do not
//! matter. A column that is absent, or a cell that is empty or missing from a
//! short row, leaves the draft's default in place.

use roster_core::{
  clock::Clock,
  student::{StudentDraft, StudentId},
};
use tracing::debug;

use crate::{MappedRows, ParsedCsv, RowFailure};

/// Data rows are numbered from 2: line 1 is the header.
const FIRST_DATA_ROW: usize = 2;

/// Positions of the recognised columns in one file's header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Columns {
  name:            Option<usize>,
  email:           Option<usize>,
  grade:           Option<usize>,
  course:          Option<usize>,
  enrollment_date: Option<usize>,
}

impl Columns {
  /// Case-insensitive exact match; the first matching header wins.
  fn resolve(headers: &[String]) -> Self {
    let find = |wanted: &str| headers.iter().position(|h| h.to_lowercase() == wanted);
    Self {
      name:            find("name"),
      email:           find("email"),
      grade:           find("grade"),
      course:          find("course"),
      enrollment_date: find("enrollmentdate"),
    }
  }
}

/// The non-empty cell at `index`, if the column exists and the row reaches it.
fn cell(row: &[String], index: Option<usize>) -> Option<&str> {
  index
    .and_then(|i| row.get(i))
    .map(String::as_str)
    .filter(|v| !v.is_empty())
}

/// A row with no tokens, or one empty token, carries no data.
fn is_blank(row: &[String]) -> bool {
  row.is_empty() || (row.len() == 1 && row[0].is_empty())
}

/// Map every data row of one file to a validated record or a failure.
///
/// `file_index` is the file's position in the import run; it keeps the
/// temporary ids unique across files processed in the same millisecond.
pub fn map_rows_to_students(
  parsed: &ParsedCsv,
  file_index: usize,
  clock: &dyn Clock,
) -> MappedRows {
  let columns = Columns::resolve(&parsed.headers);
  let millis = clock.now().timestamp_millis();
  let mut mapped = MappedRows::default();

  for (index, row) in parsed.rows.iter().enumerate() {
    if is_blank(row) {
      continue;
    }
    let row_number = index + FIRST_DATA_ROW;

    let mut draft = StudentDraft::builder(clock);
    if let Some(v) = cell(row, columns.name) {
      draft = draft.name(v);
    }
    if let Some(v) = cell(row, columns.email) {
      draft = draft.email(v);
    }
    if let Some(v) = cell(row, columns.grade) {
      draft = draft.grade_text(v);
    }
    if let Some(v) = cell(row, columns.course) {
      draft = draft.course(v);
    }
    if let Some(v) = cell(row, columns.enrollment_date) {
      draft = draft.enrollment_date(v);
    }

    let id = StudentId::temporary(millis, file_index, index);
    match draft.build().into_record(id, row_number) {
      Ok(record) => mapped.students.push(record),
      Err(errors) => {
        debug!(row = row_number, errors = errors.len(), "row rejected");
        mapped.failures.push(RowFailure { raw_row: row.clone(), errors });
      }
    }
  }

  mapped
}
