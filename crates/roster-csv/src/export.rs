//! CSV export of stored students.

use roster_core::student::{DATE_FORMAT, Student};

/// Column order of [`export_csv`]; the same names the importer recognises.
pub const EXPORT_HEADERS: [&str; 5] =
  ["name", "email", "grade", "course", "enrollmentDate"];

/// Render `students` as CSV, one `\n`-separated line each, every cell wrapped
/// in double quotes.
///
/// Quotes inside values are not escaped, matching the importer's dialect.
pub fn export_csv(students: &[Student]) -> String {
  let mut lines = Vec::with_capacity(students.len() + 1);
  lines.push(EXPORT_HEADERS.join(","));

  for s in students {
    let date = s.enrollment_date.format(DATE_FORMAT).to_string();
    let grade = s.grade.to_string();
    let cells = [
      s.name.as_str(),
      s.email.as_str(),
      grade.as_str(),
      s.course.as_str(),
      date.as_str(),
    ];
    lines.push(
      cells
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(","),
    );
  }

  lines.join("\n")
}
