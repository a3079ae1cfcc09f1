//! Injected time source.
//!
//! The import pipeline needs "now" twice: for the default enrollment date of
//! rows that leave it blank, and for the temporary ids handed to records
//! before the store assigns real ones. Both go through [`Clock`] so tests can
//! pin them.

use chrono::{DateTime, NaiveDate, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;

  /// The current UTC calendar date.
  fn today(&self) -> NaiveDate { self.now().date_naive() }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> { self.0 }
}
