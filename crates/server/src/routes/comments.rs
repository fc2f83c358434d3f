//! Comment route handlers.
//!
//! `POST` validates in a fixed order: presence, then recipe existence, then
//! length. Lengths are measured on the stripped value before any truncation.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use recipe_box_core::api::{CommentCreated, CommentList};
use recipe_box_core::sanitize::{COMMENT_FIELD_MAX, char_len, sanitize, sanitize_str, strip};
use recipe_box_core::{COMMENT_MAX_CHARS, RecipeId, USERNAME_MAX_CHARS};

use super::{json_object, query_params};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::store::CommentDraft;

/// Methods the comments endpoint answers.
pub const ALLOWED: &[&str] = &["GET", "POST", "OPTIONS"];

/// Fields a new comment must carry.
pub const REQUIRED_FIELDS: &[&str] = &["recipeId", "username", "comment"];

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    #[serde(rename = "recipeId")]
    pub recipe_id: Option<String>,
}

/// Raw `POST /api/comments` body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub recipe_id: Option<Value>,
    pub username: Option<Value>,
    pub comment: Option<Value>,
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Stripped text and its length, or an `Invalid` error when out of range.
fn bounded(
    value: Option<&Value>,
    max_chars: usize,
    error: &'static str,
    field: &str,
) -> Result<String> {
    let stripped = value.and_then(Value::as_str).map(strip).unwrap_or_default();
    let len = char_len(&stripped);
    if (1..=max_chars).contains(&len) {
        Ok(sanitize_str(&stripped, COMMENT_FIELD_MAX))
    } else {
        Err(ApiError::invalid(
            error,
            format!("{field} must be between 1 and {max_chars} characters"),
        ))
    }
}

/// `GET /api/comments?recipeId={id}` - comments on one recipe, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<CommentsQuery>, QueryRejection>,
) -> Result<Json<CommentList>> {
    let recipe_id = query_params(query)?
        .recipe_id
        .filter(|id| !id.trim().is_empty())
        .map(RecipeId::new)
        .ok_or_else(|| {
            ApiError::invalid("Missing recipeId", "The recipeId query parameter is required")
        })?;

    let comments = state.store().list_comments(&recipe_id).await?;
    Ok(Json(CommentList::new(recipe_id, comments)))
}

/// `POST /api/comments` - attach a comment to an existing recipe.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentCreated>)> {
    let payload: CommentPayload = json_object(body)?;

    let recipe_id = sanitize(payload.recipe_id.as_ref(), COMMENT_FIELD_MAX);
    let missing: Vec<&'static str> = [
        ("recipeId", !recipe_id.is_empty()),
        ("username", is_present(payload.username.as_ref())),
        ("comment", is_present(payload.comment.as_ref())),
    ]
    .into_iter()
    .filter(|(_, present)| !present)
    .map(|(key, _)| key)
    .collect();
    if !missing.is_empty() {
        return Err(ApiError::MissingFields {
            required: REQUIRED_FIELDS,
            missing,
        });
    }

    let recipe_id = RecipeId::new(recipe_id);
    if !state.store().recipe_exists(&recipe_id).await? {
        return Err(ApiError::RecipeNotFound(recipe_id));
    }

    let username = bounded(
        payload.username.as_ref(),
        USERNAME_MAX_CHARS,
        "Invalid username",
        "Username",
    )?;
    let comment = bounded(
        payload.comment.as_ref(),
        COMMENT_MAX_CHARS,
        "Invalid comment",
        "Comment",
    )?;

    let comment = state
        .store()
        .insert_comment(CommentDraft {
            recipe_id,
            username,
            comment,
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!(comment_id = %comment.id, recipe_id = %comment.recipe_id, "Comment added");

    Ok((
        StatusCode::CREATED,
        Json(CommentCreated {
            success: true,
            message: "Comment added successfully".to_owned(),
            comment,
        }),
    ))
}

/// Any other method on the comments endpoint.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed(ALLOWED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, header},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::app;
    use crate::store::{RecipeDraft, Store};

    async fn setup() -> (Router, RecipeId) {
        let store = Store::memory();
        let now = Utc::now();
        let recipe = store
            .insert_recipe(RecipeDraft {
                name: "Soup".to_owned(),
                category: "dinner".to_owned(),
                prep_time: String::new(),
                cook_time: String::new(),
                ingredients: "water".to_owned(),
                instructions: "Boil the water slowly.".to_owned(),
                notes: String::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        (app(AppState::new(store)), recipe.id)
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_post_then_list() {
        let (router, id) = setup().await;
        let (status, json) = send(
            &router,
            Method::POST,
            "/api/comments",
            Some(json!({"recipeId": id, "username": " Ann ", "comment": "Delicious!"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Comment added successfully");
        assert_eq!(json["comment"]["username"], "Ann");
        assert_eq!(json["comment"]["recipeId"], id.as_str());

        let (status, json) = send(
            &router,
            Method::GET,
            &format!("/api/comments?recipeId={id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 1);
        assert_eq!(json["recipeId"], id.as_str());
        assert_eq!(json["comments"][0]["comment"], "Delicious!");
    }

    #[tokio::test]
    async fn test_list_requires_recipe_id() {
        let (router, _) = setup().await;
        for uri in ["/api/comments", "/api/comments?recipeId="] {
            let (status, json) = send(&router, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "Missing recipeId");
        }
    }

    #[tokio::test]
    async fn test_repeated_recipe_id_is_json_error() {
        let (router, id) = setup().await;
        let (status, json) = send(
            &router,
            Method::GET,
            &format!("/api/comments?recipeId={id}&recipeId=other"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid query string");
    }

    #[tokio::test]
    async fn test_array_body_is_rejected() {
        let (router, id) = setup().await;
        let (status, json) = send(
            &router,
            Method::POST,
            "/api/comments",
            Some(json!([id, "Ann", "Delicious!"])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid request body");

        let (_, json) = send(
            &router,
            Method::GET,
            &format!("/api/comments?recipeId={id}"),
            None,
        )
        .await;
        assert_eq!(json["count"], 0);
    }

    #[tokio::test]
    async fn test_presence_checked_first() {
        let (router, _) = setup().await;
        let (status, json) = send(
            &router,
            Method::POST,
            "/api/comments",
            Some(json!({"recipeId": "missing-recipe", "username": "", "comment": null})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required fields");
        assert_eq!(json["required"], json!(["recipeId", "username", "comment"]));
    }

    #[tokio::test]
    async fn test_unknown_recipe_wins_over_lengths() {
        let (router, _) = setup().await;
        let (status, json) = send(
            &router,
            Method::POST,
            "/api/comments",
            Some(json!({
                "recipeId": "missing-recipe",
                "username": "x".repeat(500),
                "comment": "ok",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Recipe not found");
    }

    #[tokio::test]
    async fn test_length_bounds() {
        let (router, id) = setup().await;
        let cases = [
            (json!("x".repeat(101)), json!("fine"), "Invalid username"),
            (json!("   "), json!("fine"), "Invalid username"),
            (json!("<>"), json!("fine"), "Invalid username"),
            (json!(42), json!("fine"), "Invalid username"),
            (json!("Ann"), json!("y".repeat(1001)), "Invalid comment"),
            (json!("Ann"), json!("<<>>"), "Invalid comment"),
        ];
        for (username, comment, error) in cases {
            let (status, json) = send(
                &router,
                Method::POST,
                "/api/comments",
                Some(json!({"recipeId": id, "username": username, "comment": comment})),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], error);
        }

        let (_, json) = send(
            &router,
            Method::GET,
            &format!("/api/comments?recipeId={id}"),
            None,
        )
        .await;
        assert_eq!(json["count"], 0);
    }

    #[tokio::test]
    async fn test_boundary_lengths_accepted() {
        let (router, id) = setup().await;
        let (status, json) = send(
            &router,
            Method::POST,
            "/api/comments",
            Some(json!({
                "recipeId": id,
                "username": "u".repeat(100),
                "comment": "c".repeat(1000),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["comment"]["comment"].as_str().unwrap().chars().count(), 1000);
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let (router, _) = setup().await;
        let (status, json) = send(&router, Method::DELETE, "/api/comments", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json["allowedMethods"], json!(ALLOWED));
    }
}
