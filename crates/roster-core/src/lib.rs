//! Core types and trait definitions for the Roster student-records service.
//!
//! This crate is deliberately free of HTTP, CSV and database dependencies.
//! All other crates depend on it.

pub mod clock;
pub mod error;
pub mod report;
pub mod store;
pub mod student;
pub mod validation;

pub use error::{Error, Result};
