//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::StudentStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(store.clone(), Arc::new(SystemClock)))
//! ```

pub mod analytics;
pub mod error;
pub mod imports;
pub mod students;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::{clock::Clock, store::StudentStore};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store: Arc<S>,
  /// Supplies today's date for drafts without one and the import timestamp.
  pub clock: Arc<dyn Clock>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), clock: Arc::clone(&self.clock) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Router<()>
where
  S: StudentStore + 'static,
{
  Router::new()
    // Students
    .route("/students", get(students::list::<S>).post(students::create::<S>))
    .route(
      "/students/{id}",
      get(students::get_one::<S>)
        .put(students::update_one::<S>)
        .delete(students::delete_one::<S>),
    )
    // Imports
    .route("/imports", post(imports::create::<S>))
    // Analytics
    .route("/analytics", get(analytics::dashboard::<S>))
    .route("/report", get(analytics::report::<S>))
    .route("/export.csv", get(analytics::export::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(ApiState { store, clock })
}
