//! The `StudentStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`, `roster-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::student::{NewStudent, Student};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Sort order for [`StudentStore::list_students`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentOrder {
  /// Alphabetical by name.
  #[default]
  Name,
  /// Best grade first.
  GradeDesc,
  /// Oldest first, i.e. insertion order.
  Created,
}

/// Parameters for [`StudentStore::list_students`].
#[derive(Debug, Clone, Default)]
pub struct StudentQuery {
  /// Case-insensitive substring matched against name, email and course.
  pub text:   Option<String>,
  pub order:  StudentOrder,
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a student store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait StudentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist one student. The store assigns `id` and `created_at`.
  fn add_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  /// Persist a batch atomically: either every row is written or none is.
  /// The returned students are in input order.
  fn add_students(
    &self,
    inputs: Vec<NewStudent>,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// Retrieve a student by id. Returns `None` if not found.
  fn get_student(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  fn list_students<'a>(
    &'a self,
    query: &'a StudentQuery,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + 'a;

  /// Replace the editable fields of a student. `id`, `created_at` and
  /// `created_by` are kept. Returns `None` if not found.
  fn update_student(
    &self,
    id: Uuid,
    input: NewStudent,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Returns `false` if there was nothing to delete.
  fn delete_student(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
