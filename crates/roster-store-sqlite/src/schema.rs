//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS students (
    id              TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL,
    grade           REAL NOT NULL CHECK (grade >= 0 AND grade <= 100),
    course          TEXT NOT NULL,
    enrollment_date TEXT NOT NULL,   -- YYYY-MM-DD
    created_by      TEXT,            -- opaque owner reference
    created_at      TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS students_name_idx   ON students(name);
CREATE INDEX IF NOT EXISTS students_grade_idx  ON students(grade);
CREATE INDEX IF NOT EXISTS students_course_idx ON students(course);

PRAGMA user_version = 1;
";
