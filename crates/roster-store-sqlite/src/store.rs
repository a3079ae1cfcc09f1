//! [`SqliteStore`], the SQLite implementation of [`StudentStore`].

use std::path::Path;

use chrono::Utc;
use roster_core::{
  store::{StudentOrder, StudentQuery, StudentStore},
  student::{NewStudent, Student},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Result,
  encode::{LOWER_FN, RawStudent, encode_date, encode_uuid, register_lower},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A student store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        register_lower(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Stamp a new row with a fresh id and creation time.
fn new_row(input: NewStudent) -> Student {
  Student {
    id:              Uuid::new_v4(),
    name:            input.name,
    email:           input.email,
    grade:           input.grade,
    course:          input.course,
    enrollment_date: input.enrollment_date,
    created_by:      input.created_by,
    created_at:      Utc::now(),
  }
}

fn order_clause(order: StudentOrder) -> &'static str {
  match order {
    StudentOrder::Name => "ORDER BY name COLLATE NOCASE, created_at",
    StudentOrder::GradeDesc => "ORDER BY grade DESC, name COLLATE NOCASE",
    StudentOrder::Created => "ORDER BY created_at, rowid",
  }
}

// ─── StudentStore impl ───────────────────────────────────────────────────────

impl StudentStore for SqliteStore {
  type Error = crate::Error;

  async fn add_student(&self, input: NewStudent) -> Result<Student> {
    let student = new_row(input);
    let raw     = RawStudent::from_student(&student);

    self
      .conn
      .call(move |conn| {
        raw.insert(conn)?;
        Ok(())
      })
      .await?;

    Ok(student)
  }

  async fn add_students(&self, inputs: Vec<NewStudent>) -> Result<Vec<Student>> {
    let students: Vec<Student> = inputs.into_iter().map(new_row).collect();
    let raws: Vec<RawStudent>  = students.iter().map(RawStudent::from_student).collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for raw in &raws {
          raw.insert(&tx)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(students)
  }

  async fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {} FROM students WHERE id = ?1", RawStudent::COLUMNS),
            rusqlite::params![id_str],
            RawStudent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn list_students(&self, query: &StudentQuery) -> Result<Vec<Student>> {
    let needle = query
      .text
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(str::to_lowercase);
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val  = query
      .limit
      .map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let offset_val = query
      .offset
      .map_or(0, |o| i64::try_from(o).unwrap_or(i64::MAX));
    let order      = order_clause(query.order);

    let raws: Vec<RawStudent> = self
      .conn
      .call(move |conn| {
        let where_clause = if needle.is_some() {
          format!(
            "WHERE instr({LOWER_FN}(name), ?1) > 0
                OR instr({LOWER_FN}(email), ?1) > 0
                OR instr({LOWER_FN}(course), ?1) > 0"
          )
        } else {
          "WHERE ?1 IS NULL".to_owned()
        };

        let sql = format!(
          "SELECT {columns}
           FROM students
           {where_clause}
           {order}
           LIMIT ?2 OFFSET ?3",
          columns = RawStudent::COLUMNS,
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![needle.as_deref(), limit_val, offset_val],
            RawStudent::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn update_student(
    &self,
    id:    Uuid,
    input: NewStudent,
  ) -> Result<Option<Student>> {
    let id_str   = encode_uuid(id);
    let date_str = encode_date(input.enrollment_date);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE students
              SET name = ?2, email = ?3, grade = ?4, course = ?5, enrollment_date = ?6
            WHERE id = ?1",
          rusqlite::params![
            id_str,
            input.name,
            input.email,
            input.grade,
            input.course,
            date_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_student(id).await
  }

  async fn delete_student(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM students WHERE id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
