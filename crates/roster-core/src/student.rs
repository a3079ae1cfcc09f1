//! Student types: the records the whole service moves around.
//!
//! A row travels through three shapes:
//!
//! 1. [`StudentDraft`]: every field populated with a typed default, nothing
//!    checked yet.
//! 2. [`StudentRecord`]: a draft that passed validation, carrying either a
//!    temporary id (during import) or the id assigned by the store.
//! 3. [`Student`]: the persisted row, with owner and creation time.

use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  clock::Clock,
  validation::{self, Field, ValidationError},
};

/// `strftime` format of every enrollment date the service reads or writes.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Longest leading decimal literal: `95%` reads as 95, `88 pts` as 88.
static GRADE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
    .expect("grade pattern compiles")
});

// ─── Identity ────────────────────────────────────────────────────────────────

/// Identifier of a [`StudentRecord`].
///
/// Serialised as a plain string: `temp-…` placeholders as-is, persisted ids
/// as hyphenated UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StudentId {
  /// Placeholder handed out during an import run, before persistence.
  Temporary(String),
  /// Durable id assigned by the store.
  Persisted(Uuid),
}

impl StudentId {
  const TEMP_PREFIX: &'static str = "temp-";

  /// Build a placeholder that is unique within one import run.
  pub fn temporary(millis: i64, file_index: usize, row_index: usize) -> Self {
    Self::Temporary(format!(
      "{}{millis}-{file_index}-{row_index}",
      Self::TEMP_PREFIX
    ))
  }

  pub fn is_temporary(&self) -> bool { matches!(self, Self::Temporary(_)) }
}

impl fmt::Display for StudentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Temporary(s) => f.write_str(s),
      Self::Persisted(id) => write!(f, "{}", id.hyphenated()),
    }
  }
}

impl FromStr for StudentId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.starts_with(Self::TEMP_PREFIX) {
      return Ok(Self::Temporary(s.to_owned()));
    }
    Uuid::parse_str(s)
      .map(Self::Persisted)
      .map_err(|_| Error::InvalidStudentId(s.to_owned()))
  }
}

impl From<StudentId> for String {
  fn from(id: StudentId) -> Self { id.to_string() }
}

impl TryFrom<String> for StudentId {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

// ─── Validated record ────────────────────────────────────────────────────────

/// A student row that satisfied every field constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
  pub id:              StudentId,
  pub name:            String,
  pub email:           String,
  /// Always finite and within `0..=100`.
  pub grade:           f64,
  pub course:          String,
  pub enrollment_date: NaiveDate,
}

// ─── Persisted ───────────────────────────────────────────────────────────────

/// A student as stored, with its durable id and owner reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  pub id:              Uuid,
  pub name:            String,
  pub email:           String,
  pub grade:           f64,
  pub course:          String,
  pub enrollment_date: NaiveDate,
  /// Opaque reference to whoever created the row; not verified here.
  pub created_by:      Option<String>,
  /// Server-assigned; never changes after creation.
  pub created_at:      DateTime<Utc>,
}

/// Input to [`crate::store::StudentStore::add_student`] and friends.
/// `id` and `created_at` are always set by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
  pub name:            String,
  pub email:           String,
  pub grade:           f64,
  pub course:          String,
  pub enrollment_date: NaiveDate,
  pub created_by:      Option<String>,
}

impl NewStudent {
  /// Prepare an imported record for persistence. The temporary id is dropped.
  pub fn from_record(record: StudentRecord, created_by: Option<String>) -> Self {
    Self {
      name: record.name,
      email: record.email,
      grade: record.grade,
      course: record.course,
      enrollment_date: record.enrollment_date,
      created_by,
    }
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// The grade cell as it came in.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeInput {
  /// Parsed as a number. May still be non-finite or out of range.
  Number(f64),
  /// Present but not a number; the raw text is kept for diagnostics.
  Invalid(String),
}

impl GradeInput {
  /// Read the leading number of `raw`, ignoring any trailing text such as a
  /// `%` sign or a unit. Input with no leading number is `Invalid`.
  pub fn parse(raw: &str) -> Self {
    GRADE_PREFIX_RE
      .find(raw.trim_start())
      .and_then(|m| m.as_str().parse::<f64>().ok())
      .map_or_else(|| Self::Invalid(raw.to_owned()), Self::Number)
  }

  /// The numeric value, if there is a finite one.
  pub fn as_number(&self) -> Option<f64> {
    match self {
      Self::Number(v) if v.is_finite() => Some(*v),
      _ => None,
    }
  }
}

impl Default for GradeInput {
  fn default() -> Self { Self::Number(0.0) }
}

/// A fully populated, unvalidated candidate.
///
/// Use [`StudentDraft::builder`]; it fills every field with its default up
/// front so no field is ever "missing".
#[derive(Debug, Clone, PartialEq)]
pub struct StudentDraft {
  pub name:            String,
  pub email:           String,
  pub grade:           GradeInput,
  pub course:          String,
  /// Raw text; checked against `YYYY-MM-DD` by the validator.
  pub enrollment_date: String,
}

impl StudentDraft {
  /// Start a draft with defaults: empty text fields, grade `0`, and today's
  /// date according to `clock`.
  pub fn builder(clock: &dyn Clock) -> StudentDraftBuilder {
    StudentDraftBuilder {
      draft: StudentDraft {
        name:            String::new(),
        email:           String::new(),
        grade:           GradeInput::default(),
        course:          String::new(),
        enrollment_date: clock.today().format(DATE_FORMAT).to_string(),
      },
    }
  }

  /// Validate and convert. `row` is only used to label the errors.
  pub fn into_record(
    self,
    id: StudentId,
    row: usize,
  ) -> Result<StudentRecord, Vec<ValidationError>> {
    let errors = validation::validate(&self, row);
    if !errors.is_empty() {
      return Err(errors);
    }

    // The validator skips an empty date; the builder never produces one, but
    // a hand-built draft can.
    let grade = self.grade.as_number().ok_or_else(|| {
      vec![ValidationError::new(row, Field::Grade, validation::GRADE_NOT_A_NUMBER)]
    })?;
    let enrollment_date = validation::parse_enrollment_date(&self.enrollment_date)
      .map_err(|_| {
        vec![ValidationError::new(
          row,
          Field::EnrollmentDate,
          validation::ENROLLMENT_DATE_INVALID,
        )]
      })?;

    Ok(StudentRecord {
      id,
      name: self.name,
      email: self.email,
      grade,
      course: self.course,
      enrollment_date,
    })
  }

  /// Validate a manually entered draft straight into store input.
  /// Errors are labelled row `0`.
  pub fn into_new_student(
    self,
    created_by: Option<String>,
  ) -> Result<NewStudent, Vec<ValidationError>> {
    let record = self.into_record(StudentId::Temporary("new".to_owned()), 0)?;
    Ok(NewStudent::from_record(record, created_by))
  }
}

/// Builder returned by [`StudentDraft::builder`].
#[derive(Debug, Clone)]
pub struct StudentDraftBuilder {
  draft: StudentDraft,
}

impl StudentDraftBuilder {
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.draft.name = name.into();
    self
  }

  pub fn email(mut self, email: impl Into<String>) -> Self {
    self.draft.email = email.into();
    self
  }

  pub fn grade(mut self, grade: f64) -> Self {
    self.draft.grade = GradeInput::Number(grade);
    self
  }

  /// Set the grade from raw cell text.
  pub fn grade_text(mut self, raw: &str) -> Self {
    self.draft.grade = GradeInput::parse(raw);
    self
  }

  pub fn course(mut self, course: impl Into<String>) -> Self {
    self.draft.course = course.into();
    self
  }

  pub fn enrollment_date(mut self, date: impl Into<String>) -> Self {
    self.draft.enrollment_date = date.into();
    self
  }

  pub fn build(self) -> StudentDraft { self.draft }
}
