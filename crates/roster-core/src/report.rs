//! Dashboard aggregates and the performance report.
//!
//! Both are computed on read from a slice of stored students; nothing here is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::student::Student;

/// Grade at or above which a student counts as a top performer.
pub const TOP_PERFORMER_THRESHOLD: f64 = 90.0;
/// Grade below which a student needs improvement.
pub const NEEDS_IMPROVEMENT_THRESHOLD: f64 = 70.0;

// ─── Dashboard ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCount {
  pub course: String,
  pub count:  usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCount {
  /// The grade as displayed, e.g. `"95"` or `"87.5"`.
  pub grade: String,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
  pub total_students: usize,
  /// In order of first appearance.
  pub courses:        Vec<CourseCount>,
  /// Sorted by the display string, not numerically.
  pub grades:         Vec<GradeCount>,
}

/// Count students per course and per distinct grade.
pub fn dashboard(students: &[Student]) -> Dashboard {
  let mut courses: Vec<CourseCount> = Vec::new();
  let mut grades: Vec<GradeCount> = Vec::new();

  for s in students {
    match courses.iter_mut().find(|c| c.course == s.course) {
      Some(c) => c.count += 1,
      None => courses.push(CourseCount { course: s.course.clone(), count: 1 }),
    }

    let key = s.grade.to_string();
    match grades.iter_mut().find(|g| g.grade == key) {
      Some(g) => g.count += 1,
      None => grades.push(GradeCount { grade: key, count: 1 }),
    }
  }

  grades.sort_by(|a, b| a.grade.cmp(&b.grade));

  Dashboard { total_students: students.len(), courses, grades }
}

// ─── Performance report ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
  /// Mean grade; `0` when there are no students.
  pub average_grade:     f64,
  pub top_performers:    Vec<Student>,
  pub needs_improvement: Vec<Student>,
  /// Every student, best grade first.
  pub students:          Vec<Student>,
}

pub fn performance(students: &[Student]) -> PerformanceReport {
  let mut ranked = students.to_vec();
  ranked.sort_by(|a, b| b.grade.total_cmp(&a.grade));

  let average_grade = if ranked.is_empty() {
    0.0
  } else {
    ranked.iter().map(|s| s.grade).sum::<f64>() / ranked.len() as f64
  };

  let top_performers = ranked
    .iter()
    .filter(|s| s.grade >= TOP_PERFORMER_THRESHOLD)
    .cloned()
    .collect();
  let needs_improvement = ranked
    .iter()
    .filter(|s| s.grade < NEEDS_IMPROVEMENT_THRESHOLD)
    .cloned()
    .collect();

  PerformanceReport {
    average_grade,
    top_performers,
    needs_improvement,
    students: ranked,
  }
}
