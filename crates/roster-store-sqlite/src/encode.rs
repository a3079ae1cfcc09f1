//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, enrollment dates as
//! `YYYY-MM-DD`, UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use roster_core::student::{DATE_FORMAT, Student};
use rusqlite::functions::FunctionFlags;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Fixed-width, so text order matches time order.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// SQL name of the Unicode-aware lowercase function. SQLite's own `lower()`
/// and `LIKE` only fold ASCII letters.
pub const LOWER_FN: &str = "unicode_lower";

/// Register [`LOWER_FN`] on `conn`. Must run once per connection.
pub fn register_lower(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    LOWER_FN,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
  )
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column values of one `students` row, in table order.
pub struct RawStudent {
  pub id:              String,
  pub name:            String,
  pub email:           String,
  pub grade:           f64,
  pub course:          String,
  pub enrollment_date: String,
  pub created_by:      Option<String>,
  pub created_at:      String,
}

impl RawStudent {
  /// Columns selected by every read, matching [`RawStudent::from_row`].
  pub const COLUMNS: &'static str =
    "id, name, email, grade, course, enrollment_date, created_by, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      name:            row.get(1)?,
      email:           row.get(2)?,
      grade:           row.get(3)?,
      course:          row.get(4)?,
      enrollment_date: row.get(5)?,
      created_by:      row.get(6)?,
      created_at:      row.get(7)?,
    })
  }

  pub fn from_student(s: &Student) -> Self {
    Self {
      id:              encode_uuid(s.id),
      name:            s.name.clone(),
      email:           s.email.clone(),
      grade:           s.grade,
      course:          s.course.clone(),
      enrollment_date: encode_date(s.enrollment_date),
      created_by:      s.created_by.clone(),
      created_at:      encode_dt(s.created_at),
    }
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      id:              decode_uuid(&self.id)?,
      name:            self.name,
      email:           self.email,
      grade:           self.grade,
      course:          self.course,
      enrollment_date: decode_date(&self.enrollment_date)?,
      created_by:      self.created_by,
      created_at:      decode_dt(&self.created_at)?,
    })
  }

  /// Insert this row. Works on a plain connection or inside a transaction.
  pub fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute(
      "INSERT INTO students (
         id, name, email, grade, course, enrollment_date, created_by, created_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
      rusqlite::params![
        self.id,
        self.name,
        self.email,
        self.grade,
        self.course,
        self.enrollment_date,
        self.created_by,
        self.created_at,
      ],
    )?;
    Ok(())
  }
}
