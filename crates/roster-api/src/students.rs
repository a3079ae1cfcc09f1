//! Handlers for `/students` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/students` | Optional `?q=&order=name\|grade_desc\|created&limit=&offset=` |
//! | `POST`   | `/students` | Body: [`StudentBody`]; 201, or 422 with `errors` |
//! | `GET`    | `/students/:id` | 404 if not found |
//! | `PUT`    | `/students/:id` | Body: [`StudentBody`]; 404 / 422 |
//! | `DELETE` | `/students/:id` | 204, or 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  clock::Clock,
  store::{StudentOrder, StudentQuery, StudentStore},
  student::{NewStudent, Student, StudentDraft},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Body ────────────────────────────────────────────────────────────────────

/// A grade as sent by a client: a JSON number or a string such as `"87.5"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GradeValue {
  Number(f64),
  Text(String),
}

/// JSON body accepted by `POST /students` and `PUT /students/:id`.
///
/// Omitted fields take the same defaults as an empty CSV cell.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentBody {
  pub name:            Option<String>,
  pub email:           Option<String>,
  pub grade:           Option<GradeValue>,
  pub course:          Option<String>,
  pub enrollment_date: Option<String>,
  /// Ignored on update; the original creator is kept.
  pub created_by:      Option<String>,
}

impl StudentBody {
  /// Fill a draft from this body and validate it.
  fn into_new_student(self, clock: &dyn Clock) -> Result<NewStudent, ApiError> {
    let mut builder = StudentDraft::builder(clock);
    if let Some(name) = self.name {
      builder = builder.name(name);
    }
    if let Some(email) = self.email {
      builder = builder.email(email);
    }
    match self.grade {
      Some(GradeValue::Number(g)) => builder = builder.grade(g),
      Some(GradeValue::Text(t)) if !t.trim().is_empty() => {
        builder = builder.grade_text(&t)
      }
      _ => {}
    }
    if let Some(course) = self.course {
      builder = builder.course(course);
    }
    if let Some(date) = self.enrollment_date.filter(|d| !d.trim().is_empty()) {
      builder = builder.enrollment_date(date);
    }

    builder
      .build()
      .into_new_student(self.created_by)
      .map_err(ApiError::Validation)
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Case-insensitive substring over name, email and course.
  pub q:      Option<String>,
  pub order:  Option<StudentOrder>,
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

/// `GET /students[?q=...][&order=...][&limit=...][&offset=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: StudentStore,
{
  let query = StudentQuery {
    text:   params.q,
    order:  params.order.unwrap_or_default(),
    limit:  params.limit,
    offset: params.offset,
  };

  let students = state
    .store
    .list_students(&query)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(students))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /students`: returns 201 + the stored [`Student`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<StudentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudentStore,
{
  let input = body.into_new_student(state.clock.as_ref())?;
  let student = state
    .store
    .add_student(input)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(student)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /students/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError>
where
  S: StudentStore,
{
  let student = state
    .store
    .get_student(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(student))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /students/:id`: full replacement of the editable fields.
pub async fn update_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<StudentBody>,
) -> Result<Json<Student>, ApiError>
where
  S: StudentStore,
{
  let input = body.into_new_student(state.clock.as_ref())?;
  let student = state
    .store
    .update_student(id, input)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(student))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /students/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: StudentStore,
{
  let deleted = state
    .store
    .delete_student(id)
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::NotFound(format!("student {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
