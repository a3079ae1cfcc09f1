//! Row validator.
//!
//! [`validate`] is pure and evaluates every rule, so one row can report
//! several problems at once. The order of the returned errors is fixed:
//! name, email, grade, course, enrollment date.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  student::{DATE_FORMAT, GradeInput, StudentDraft},
};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is not valid";
pub const GRADE_NOT_A_NUMBER: &str = "Grade must be a number";
pub const GRADE_OUT_OF_RANGE: &str = "Grade must be between 0 and 100";
pub const COURSE_REQUIRED: &str = "Course is required";
pub const ENROLLMENT_DATE_INVALID: &str =
  "Enrollment date is not valid (use YYYY-MM-DD format)";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

// ASCII digits only; `\d` would also accept other Unicode digits.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles")
});

// ─── Error type ──────────────────────────────────────────────────────────────

/// The student field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
  Name,
  Email,
  Grade,
  Course,
  EnrollmentDate,
}

impl Field {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Grade => "grade",
      Self::Course => "course",
      Self::EnrollmentDate => "enrollmentDate",
    }
  }
}

/// One broken constraint on one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
  /// 1-based line number in the source file (header is line 1); `0` for
  /// records that did not come from a file.
  pub row:     usize,
  pub field:   Field,
  pub message: String,
}

impl ValidationError {
  pub fn new(row: usize, field: Field, message: impl Into<String>) -> Self {
    Self { row, field, message: message.into() }
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Check `draft` against every field rule.
pub fn validate(draft: &StudentDraft, row: usize) -> Vec<ValidationError> {
  let mut errors = Vec::new();
  let mut fail = |field, message| {
    errors.push(ValidationError::new(row, field, message));
  };

  if draft.name.trim().is_empty() {
    fail(Field::Name, NAME_REQUIRED);
  }

  if draft.email.trim().is_empty() {
    fail(Field::Email, EMAIL_REQUIRED);
  } else if !is_valid_email(&draft.email) {
    fail(Field::Email, EMAIL_INVALID);
  }

  match &draft.grade {
    GradeInput::Number(g) if g.is_finite() => {
      if !(0.0..=100.0).contains(g) {
        fail(Field::Grade, GRADE_OUT_OF_RANGE);
      }
    }
    _ => fail(Field::Grade, GRADE_NOT_A_NUMBER),
  }

  if draft.course.trim().is_empty() {
    fail(Field::Course, COURSE_REQUIRED);
  }

  if !draft.enrollment_date.is_empty() && !is_valid_date(&draft.enrollment_date)
  {
    fail(Field::EnrollmentDate, ENROLLMENT_DATE_INVALID);
  }

  errors
}

/// `local@domain.tld`, no whitespace, exactly one `@`.
pub fn is_valid_email(email: &str) -> bool { EMAIL_RE.is_match(email) }

/// `YYYY-MM-DD` naming a real calendar day.
pub fn is_valid_date(date: &str) -> bool { parse_enrollment_date(date).is_ok() }

/// Parse a `YYYY-MM-DD` date, rejecting anything that does not format back
/// to the identical string (e.g. `2024-2-5`, `2024-02-30`).
pub fn parse_enrollment_date(date: &str) -> Result<NaiveDate> {
  if !DATE_RE.is_match(date) {
    return Err(Error::InvalidDate(date.to_owned()));
  }
  let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
    .map_err(|_| Error::InvalidDate(date.to_owned()))?;
  if parsed.format(DATE_FORMAT).to_string() != date {
    return Err(Error::InvalidDate(date.to_owned()));
  }
  Ok(parsed)
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::clock::FixedClock;

  fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
  }

  fn messages(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().map(|e| e.message.as_str()).collect()
  }

  #[test]
  fn complete_row_has_no_errors() {
    let draft = StudentDraft::builder(&clock())
      .name("Jane Doe")
      .email("jane@example.com")
      .grade(95.0)
      .course("Biology")
      .enrollment_date("2024-01-15")
      .build();
    assert!(validate(&draft, 2).is_empty());
  }

  #[test]
  fn every_rule_reports_in_table_order() {
    let draft = StudentDraft::builder(&clock())
      .email("bad-email")
      .grade(150.0)
      .enrollment_date("2024-13-40")
      .build();
    let errors = validate(&draft, 3);
    assert_eq!(messages(&errors), vec![
      NAME_REQUIRED,
      EMAIL_INVALID,
      GRADE_OUT_OF_RANGE,
      COURSE_REQUIRED,
      ENROLLMENT_DATE_INVALID,
    ]);
    assert!(errors.iter().all(|e| e.row == 3));
    assert_eq!(
      errors.iter().map(|e| e.field).collect::<Vec<_>>(),
      vec![
        Field::Name,
        Field::Email,
        Field::Grade,
        Field::Course,
        Field::EnrollmentDate,
      ]
    );
  }

  #[test]
  fn non_numeric_grade_is_never_a_range_error() {
    let draft = StudentDraft::builder(&clock())
      .name("A")
      .email("a@b.co")
      .grade_text("ninety")
      .course("Math")
      .build();
    assert_eq!(messages(&validate(&draft, 2)), vec![GRADE_NOT_A_NUMBER]);
  }

  #[test]
  fn infinite_grade_is_not_a_number() {
    let draft = StudentDraft::builder(&clock())
      .name("A")
      .email("a@b.co")
      .grade_text("inf")
      .course("Math")
      .build();
    assert_eq!(messages(&validate(&draft, 2)), vec![GRADE_NOT_A_NUMBER]);
  }

  #[test]
  fn grade_bounds_are_inclusive() {
    for g in [0.0, 100.0, 59.5] {
      let draft = StudentDraft::builder(&clock())
        .name("A")
        .email("a@b.co")
        .grade(g)
        .course("Math")
        .build();
      assert!(validate(&draft, 2).is_empty(), "grade {g}");
    }
    let draft = StudentDraft::builder(&clock())
      .name("A")
      .email("a@b.co")
      .grade(-0.5)
      .course("Math")
      .build();
    assert_eq!(messages(&validate(&draft, 2)), vec![GRADE_OUT_OF_RANGE]);
  }

  #[test]
  fn whitespace_only_text_counts_as_missing() {
    let draft = StudentDraft::builder(&clock())
      .name("   ")
      .email("  ")
      .course("\t")
      .build();
    assert_eq!(messages(&validate(&draft, 2)), vec![
      NAME_REQUIRED,
      EMAIL_REQUIRED,
      COURSE_REQUIRED,
    ]);
  }

  #[test]
  fn email_pattern() {
    assert!(is_valid_email("jane@example.com"));
    assert!(is_valid_email("j.doe+tag@mail.example.org"));
    assert!(!is_valid_email("jane@example"));
    assert!(!is_valid_email("jane example@x.com"));
    assert!(!is_valid_email("jane@@example.com"));
    assert!(!is_valid_email("@example.com"));
  }

  #[test]
  fn date_must_round_trip() {
    assert!(is_valid_date("2024-02-29"));
    assert!(!is_valid_date("2023-02-29"));
    assert!(!is_valid_date("2024-02-30"));
    assert!(!is_valid_date("2024-2-5"));
    assert!(!is_valid_date("15/01/2024"));
    assert!(!is_valid_date("2024-01-15T00:00:00Z"));
  }

  #[test]
  fn empty_date_is_not_checked() {
    let draft = StudentDraft::builder(&clock())
      .name("A")
      .email("a@b.co")
      .course("Math")
      .enrollment_date("")
      .build();
    assert!(validate(&draft, 2).is_empty());
  }

  #[test]
  fn error_serialises_field_name() {
    let err = ValidationError::new(4, Field::EnrollmentDate, ENROLLMENT_DATE_INVALID);
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["field"], "enrollmentDate");
    assert_eq!(json["row"], 4);
  }
}
