//! HTTP middleware stack for the API server.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (API routes only; answers `OPTIONS` directly)

pub mod cors;
pub mod request_id;

pub use cors::cors_middleware;
pub use request_id::{make_request_span, request_id_middleware};
