//! Recipe route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use recipe_box_core::api::{RecipeCreated, RecipeDeleted, RecipeEnvelope, RecipeList};
use recipe_box_core::sanitize::{RECIPE_FIELD_MAX, sanitize};
use recipe_box_core::{DEFAULT_CATEGORY, RecipeId};

use super::{json_object, query_params};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::store::RecipeDraft;

/// Methods the recipes endpoint answers.
pub const ALLOWED: &[&str] = &["GET", "POST", "DELETE", "OPTIONS"];

/// Fields a new recipe must carry.
pub const REQUIRED_FIELDS: &[&str] = &["name", "ingredients", "instructions"];

/// Query parameters accepted by the GET routes.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub recent: Option<String>,
}

/// Raw `POST /api/recipes` body. Values stay untyped until sanitized so a
/// non-string field reads as empty instead of rejecting the whole body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub name: Option<Value>,
    pub category: Option<Value>,
    pub prep_time: Option<Value>,
    pub cook_time: Option<Value>,
    pub ingredients: Option<Value>,
    pub instructions: Option<Value>,
    pub notes: Option<Value>,
}

fn parse_recent(raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            ApiError::invalid(
                "Invalid recent parameter",
                format!("recent must be a positive integer, got {raw:?}"),
            )
        })
}

async fn recent_or_all(state: &AppState, recent: Option<&str>) -> Result<Json<RecipeList>> {
    let limit = recent.map(parse_recent).transpose()?;
    let recipes = state.store().list_recipes(limit).await?;
    Ok(Json(RecipeList::new(recipes)))
}

/// `GET /api/recipes[?recent=N]` - all recipes, or the N newest.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<RecipeList>> {
    let query = query_params(query)?;
    recent_or_all(&state, query.recent.as_deref()).await
}

/// `GET /api/recipes/{id}` - one recipe. A `recent` parameter wins over the id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: std::result::Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Response> {
    let query = query_params(query)?;
    if let Some(recent) = query.recent.as_deref() {
        return Ok(recent_or_all(&state, Some(recent)).await?.into_response());
    }

    let id = RecipeId::new(id);
    let recipe = state
        .store()
        .get_recipe(&id)
        .await?
        .ok_or(ApiError::RecipeNotFound(id))?;

    Ok(Json(RecipeEnvelope {
        success: true,
        recipe,
    })
    .into_response())
}

/// `POST /api/recipes` - validate, sanitize, and insert a recipe.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeCreated>)> {
    let payload: RecipePayload = json_object(body)?;

    let field = |value: &Option<Value>| sanitize(value.as_ref(), RECIPE_FIELD_MAX);
    let name = field(&payload.name);
    let ingredients = field(&payload.ingredients);
    let instructions = field(&payload.instructions);

    let missing: Vec<&'static str> = [
        ("name", &name),
        ("ingredients", &ingredients),
        ("instructions", &instructions),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(key, _)| key)
    .collect();
    if !missing.is_empty() {
        return Err(ApiError::MissingFields {
            required: REQUIRED_FIELDS,
            missing,
        });
    }

    let category = Some(field(&payload.category))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned());

    let now = Utc::now();
    let recipe = state
        .store()
        .insert_recipe(RecipeDraft {
            name,
            category,
            prep_time: field(&payload.prep_time),
            cook_time: field(&payload.cook_time),
            ingredients,
            instructions,
            notes: field(&payload.notes),
            created_at: now,
            updated_at: now,
        })
        .await?;

    tracing::info!(recipe_id = %recipe.id, "Recipe created");

    Ok((
        StatusCode::CREATED,
        Json(RecipeCreated {
            success: true,
            message: "Recipe created successfully".to_owned(),
            recipe,
        }),
    ))
}

/// `DELETE /api/recipes/{id}`.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDeleted>> {
    let id = RecipeId::new(id);
    if !state.store().delete_recipe(&id).await? {
        return Err(ApiError::RecipeNotFound(id));
    }

    tracing::info!(recipe_id = %id, "Recipe deleted");

    Ok(Json(RecipeDeleted {
        success: true,
        message: "Recipe deleted successfully".to_owned(),
        recipe_id: id,
    }))
}

/// `DELETE /api/recipes` without an id.
pub async fn delete_without_id() -> ApiError {
    ApiError::invalid("Recipe ID required", "Use DELETE /api/recipes/{id}")
}

/// Any other method on the recipes endpoint.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed(ALLOWED)
}
