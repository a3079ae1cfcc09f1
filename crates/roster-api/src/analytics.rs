//! Read-only views computed over every stored student.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/analytics` | [`Dashboard`] counts |
//! | `GET`  | `/report` | [`PerformanceReport`] |
//! | `GET`  | `/export.csv` | `text/csv`, best grade first |

use axum::{Json, extract::State, http::header, response::IntoResponse};
use roster_core::{
  report::{self, Dashboard, PerformanceReport},
  store::{StudentOrder, StudentQuery, StudentStore},
  student::Student,
};

use crate::{ApiState, error::ApiError};

async fn all_students<S>(
  state: &ApiState<S>,
  order: StudentOrder,
) -> Result<Vec<Student>, ApiError>
where
  S: StudentStore,
{
  let query = StudentQuery { order, ..Default::default() };
  state
    .store
    .list_students(&query)
    .await
    .map_err(ApiError::store)
}

/// `GET /analytics`
pub async fn dashboard<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: StudentStore,
{
  // Course counts follow first appearance.
  let students = all_students(&state, StudentOrder::Created).await?;
  Ok(Json(report::dashboard(&students)))
}

/// `GET /report`
pub async fn report<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<PerformanceReport>, ApiError>
where
  S: StudentStore,
{
  let students = all_students(&state, StudentOrder::GradeDesc).await?;
  Ok(Json(report::performance(&students)))
}

/// `GET /export.csv`
pub async fn export<S>(
  State(state): State<ApiState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudentStore,
{
  let students = all_students(&state, StudentOrder::GradeDesc).await?;
  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
      (
        header::CONTENT_DISPOSITION,
        "attachment; filename=\"student-performance-report.csv\"",
      ),
    ],
    roster_csv::export_csv(&students),
  ))
}
