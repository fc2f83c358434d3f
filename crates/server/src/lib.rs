//! Recipe Box API server library.
//!
//! This crate provides the JSON API as a library, allowing it to be tested
//! in-process and embedded by the integration tests.
//!
//! # Modules
//!
//! - [`store`] - Store adapter with memory and `PostgreSQL` backends
//! - [`routes`] - Recipes, comments, and health handlers
//! - [`middleware`] - CORS and request id
//! - [`error`] - `ApiError` and its JSON responses
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::AppState;
pub use store::Store;

/// Build the application router: `/api`, `/health`, request ids, and tracing.
///
/// Static files and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .nest("/health", routes::health_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span))
}
