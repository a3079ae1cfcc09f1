//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use roster_core::{
  store::{StudentOrder, StudentQuery, StudentStore},
  student::NewStudent,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_student(name: &str, course: &str, grade: f64) -> NewStudent {
  NewStudent {
    name:            name.into(),
    email:           format!("{}@example.com", name.to_lowercase()),
    grade,
    course:          course.into(),
    enrollment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    created_by:      Some("staff-1".into()),
  }
}

fn names(students: &[roster_core::student::Student]) -> Vec<&str> {
  students.iter().map(|s| s.name.as_str()).collect()
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_student() {
  let s = store().await;

  let created = s.add_student(new_student("Ann", "Math", 91.5)).await.unwrap();
  let fetched = s.get_student(created.id).await.unwrap().expect("present");

  assert_eq!(fetched, created);
  assert_eq!(fetched.grade, 91.5);
  assert_eq!(fetched.created_by.as_deref(), Some("staff-1"));
}

#[tokio::test]
async fn get_student_missing_returns_none() {
  let s = store().await;
  assert!(s.get_student(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn add_students_preserves_input_order() {
  let s = store().await;
  let created = s
    .add_students(vec![
      new_student("Zed", "Art", 50.0),
      new_student("Amy", "Art", 60.0),
      new_student("Kim", "Art", 70.0),
    ])
    .await
    .unwrap();

  assert_eq!(names(&created), vec!["Zed", "Amy", "Kim"]);
  let all = s.list_students(&StudentQuery::default()).await.unwrap();
  assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn add_students_is_all_or_nothing() {
  let s = store().await;
  // The grade CHECK constraint rejects the second row.
  let result = s
    .add_students(vec![
      new_student("Ann", "Math", 80.0),
      new_student("Bad", "Math", 180.0),
    ])
    .await;

  assert!(result.is_err());
  let all = s.list_students(&StudentQuery::default()).await.unwrap();
  assert!(all.is_empty());
}

#[tokio::test]
async fn add_students_empty_batch() {
  let s = store().await;
  assert!(s.add_students(vec![]).await.unwrap().is_empty());
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_orders_by_name_then_grade() {
  let s = store().await;
  s.add_student(new_student("carl", "Math", 70.0)).await.unwrap();
  s.add_student(new_student("Ann", "Math", 95.0)).await.unwrap();
  s.add_student(new_student("Bea", "Math", 85.0)).await.unwrap();

  let by_name = s.list_students(&StudentQuery::default()).await.unwrap();
  assert_eq!(names(&by_name), vec!["Ann", "Bea", "carl"]);

  let by_grade = s
    .list_students(&StudentQuery {
      order: StudentOrder::GradeDesc,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(names(&by_grade), vec!["Ann", "Bea", "carl"]);
  assert!(by_grade.windows(2).all(|w| w[0].grade >= w[1].grade));
}

#[tokio::test]
async fn created_order_is_insertion_order() {
  let s = store().await;
  s.add_students(vec![
    new_student("Zed", "Art", 50.0),
    new_student("Amy", "Art", 60.0),
  ])
  .await
  .unwrap();
  s.add_student(new_student("Kim", "Art", 70.0)).await.unwrap();

  let all = s
    .list_students(&StudentQuery {
      order: StudentOrder::Created,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(names(&all), vec!["Zed", "Amy", "Kim"]);
}

#[tokio::test]
async fn search_matches_name_email_or_course_case_insensitively() {
  let s = store().await;
  s.add_student(new_student("Ann", "Biology", 90.0)).await.unwrap();
  s.add_student(new_student("Ben", "History", 80.0)).await.unwrap();
  let mut odd = new_student("Cal", "Math", 70.0);
  odd.email = "cal@BIOlab.org".into();
  s.add_student(odd).await.unwrap();

  let hits = s
    .list_students(&StudentQuery {
      text: Some("bio".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(names(&hits), vec!["Ann", "Cal"]);

  let hits = s
    .list_students(&StudentQuery {
      text: Some("BEN".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(names(&hits), vec!["Ben"]);
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
  let s = store().await;
  let mut emile = new_student("ÉMILE", "Économie", 88.0);
  emile.email = "e.durand@example.com".into();
  s.add_student(emile).await.unwrap();
  s.add_student(new_student("Ann", "Math", 90.0)).await.unwrap();

  for text in ["économie", "ÉCONOMIE", "émile"] {
    let hits = s
      .list_students(&StudentQuery {
        text: Some(text.into()),
        ..Default::default()
      })
      .await
      .unwrap();
    assert_eq!(names(&hits), vec!["ÉMILE"], "searching {text:?}");
  }
}

#[tokio::test]
async fn search_text_wildcards_are_literal() {
  let s = store().await;
  s.add_student(new_student("Ann", "Math", 90.0)).await.unwrap();

  let hits = s
    .list_students(&StudentQuery {
      text: Some("%".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(hits.is_empty());
}

#[tokio::test]
async fn blank_search_text_lists_everything() {
  let s = store().await;
  s.add_student(new_student("Ann", "Math", 90.0)).await.unwrap();
  let hits = s
    .list_students(&StudentQuery {
      text: Some("   ".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn list_paginates() {
  let s = store().await;
  for name in ["A", "B", "C", "D", "E"] {
    s.add_student(new_student(name, "Math", 50.0)).await.unwrap();
  }

  let page = s
    .list_students(&StudentQuery {
      limit: Some(2),
      offset: Some(2),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(names(&page), vec!["C", "D"]);

  let huge = s
    .list_students(&StudentQuery {
      limit: Some(usize::MAX),
      offset: Some(3),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(names(&huge), vec!["D", "E"]);
}

// ─── Update / delete ─────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_fields_but_keeps_identity() {
  let s = store().await;
  let created = s.add_student(new_student("Ann", "Math", 60.0)).await.unwrap();

  let mut edit = new_student("Ann Lee", "Physics", 75.0);
  edit.created_by = Some("someone-else".into());
  let updated = s
    .update_student(created.id, edit)
    .await
    .unwrap()
    .expect("present");

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.created_at, created.created_at);
  assert_eq!(updated.created_by.as_deref(), Some("staff-1"));
  assert_eq!(updated.name, "Ann Lee");
  assert_eq!(updated.course, "Physics");
  assert_eq!(updated.grade, 75.0);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let r = s
    .update_student(Uuid::new_v4(), new_student("X", "Y", 1.0))
    .await
    .unwrap();
  assert!(r.is_none());
}

#[tokio::test]
async fn delete_removes_once() {
  let s = store().await;
  let created = s.add_student(new_student("Ann", "Math", 60.0)).await.unwrap();

  assert!(s.delete_student(created.id).await.unwrap());
  assert!(!s.delete_student(created.id).await.unwrap());
  assert!(s.get_student(created.id).await.unwrap().is_none());
}
