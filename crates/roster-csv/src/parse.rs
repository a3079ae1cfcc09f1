//! CSV tokenizer.
//!
//! Pipeline:
//!   raw &str
//!     └─ data_lines()      → non-blank lines, CR stripped
//!          ├─ first line   → headers (plain comma split)
//!          └─ the rest     → tokenize_line() → Vec<String>
//!
//! This is a deliberately small dialect, not RFC 4180: a `"` toggles quoting
//! and is dropped, and a doubled `""` is not unescaped to a literal quote.
//! Stored data was produced under these rules, so they are kept as-is.

use crate::{
  ParsedCsv,
  error::{Error, Result},
};

/// Split raw file content into a header row and tokenised data rows.
///
/// Returns [`Error::MissingHeader`] when the content has no non-blank line.
pub fn parse_delimited_text(content: &str) -> Result<ParsedCsv> {
  let mut lines = data_lines(content);

  let header_line = lines.next().ok_or(Error::MissingHeader)?;
  let headers = header_line
    .split(',')
    .map(|h| h.trim().to_owned())
    .collect();

  let rows = lines.map(tokenize_line).collect();

  Ok(ParsedCsv { headers, rows })
}

/// Lines split on `\n` or `\r\n`, with blank (whitespace-only) lines removed.
/// A leading UTF-8 byte-order mark is ignored.
fn data_lines(content: &str) -> impl Iterator<Item = &str> {
  let content = content.strip_prefix('\u{feff}').unwrap_or(content);
  content
    .split('\n')
    .map(|raw| raw.strip_suffix('\r').unwrap_or(raw))
    .filter(|line| !line.trim().is_empty())
}

/// Split one line on commas that are not inside double quotes, trimming each
/// field. Always yields at least one field.
fn tokenize_line(line: &str) -> Vec<String> {
  let mut fields = Vec::new();
  let mut current = String::new();
  let mut in_quotes = false;

  for c in line.chars() {
    match c {
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes => {
        fields.push(current.trim().to_owned());
        current.clear();
      }
      _ => current.push(c),
    }
  }
  fields.push(current.trim().to_owned());

  fields
}
