//! HTTP route table for the JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (store answers a query)
//!
//! # Recipes
//! GET    /api/recipes[/]          - All recipes, newest first (?recent=N for the N newest)
//! POST   /api/recipes             - Create a recipe
//! DELETE /api/recipes             - 400, an id is required
//! GET    /api/recipes/{id}        - One recipe (?recent=N wins over the id)
//! DELETE /api/recipes/{id}        - Delete a recipe
//!
//! # Comments
//! GET    /api/comments?recipeId=  - Comments on a recipe, newest first
//! POST   /api/comments            - Add a comment
//!
//! OPTIONS on any API path answers 200 {"ok": true}; other methods get 405;
//! unknown API paths get a JSON 404.
//! ```

pub mod comments;
pub mod health;
pub mod recipes;

use axum::{
    Json, Router,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
    middleware,
    routing::{MethodRouter, get},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::middleware::cors_middleware;
use crate::state::AppState;

/// Unwrap a JSON body that must be an object and decode it into `T`.
///
/// Arrays and scalars are rejected before decoding; a derived `Deserialize`
/// would otherwise accept a positional array for a struct.
pub(crate) fn json_object<T: DeserializeOwned>(
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<T> {
    let Json(value) = body
        .map_err(|rejection| ApiError::invalid("Invalid request body", rejection.body_text()))?;
    if !value.is_object() {
        return Err(ApiError::invalid(
            "Invalid request body",
            "Request body must be a JSON object",
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| ApiError::invalid("Invalid request body", e.to_string()))
}

/// Unwrap query parameters, answering malformed ones with a JSON 400.
pub(crate) fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::invalid("Invalid query string", rejection.body_text()))
}

fn recipe_collection() -> MethodRouter<AppState> {
    get(recipes::list)
        .post(recipes::create)
        .delete(recipes::delete_without_id)
        .fallback(recipes::method_not_allowed)
}

fn recipe_item() -> MethodRouter<AppState> {
    get(recipes::show)
        .delete(recipes::delete)
        .fallback(recipes::method_not_allowed)
}

fn comment_collection() -> MethodRouter<AppState> {
    get(comments::list)
        .post(comments::create)
        .fallback(comments::method_not_allowed)
}

/// Create the `/api` router with CORS applied to every route.
///
/// Collection paths answer with or without a trailing slash. Unknown paths
/// get a JSON 404 that still carries the CORS headers.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", recipe_collection())
        .route("/recipes/", recipe_collection())
        .route("/recipes/{id}", recipe_item())
        .route("/comments", comment_collection())
        .route("/comments/", comment_collection())
        .fallback(route_not_found)
        .layer(middleware::from_fn(cors_middleware))
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Create the operational routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .route("/ready", get(health::readiness))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{AppState, Store, app};

    async fn get(uri: &str) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = app(AppState::new(Store::memory()))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let origin = response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, origin, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_trailing_slash_lists_collections() {
        let (status, origin, json) = get("/api/recipes/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(origin.as_deref(), Some("*"));
        assert_eq!(json["count"], 0);

        let (status, _, json) = get("/api/comments/?recipeId=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["recipeId"], "abc");
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_not_found() {
        let (status, origin, json) = get("/api/recipes/abc/extra").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(origin.as_deref(), Some("*"));
        assert_eq!(json["error"], "Not found");
    }
}
