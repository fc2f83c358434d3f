//! JSON envelopes exchanged between the API server and its clients.
//!
//! Every successful response carries `success: true`; every error carries an
//! `error` string plus optional detail fields.

use serde::{Deserialize, Serialize};

use crate::types::{Comment, Recipe, RecipeId};

/// `GET /api/recipes` (optionally `?recent=N`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeList {
    pub success: bool,
    pub count: usize,
    pub recipes: Vec<Recipe>,
}

impl RecipeList {
    #[must_use]
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            success: true,
            count: recipes.len(),
            recipes,
        }
    }
}

/// `GET /api/recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEnvelope {
    pub success: bool,
    pub recipe: Recipe,
}

/// `POST /api/recipes` (201).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCreated {
    pub success: bool,
    pub message: String,
    pub recipe: Recipe,
}

/// `DELETE /api/recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDeleted {
    pub success: bool,
    pub message: String,
    pub recipe_id: RecipeId,
}

/// `GET /api/comments?recipeId=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentList {
    pub success: bool,
    pub count: usize,
    pub recipe_id: RecipeId,
    pub comments: Vec<Comment>,
}

impl CommentList {
    #[must_use]
    pub fn new(recipe_id: RecipeId, comments: Vec<Comment>) -> Self {
        Self {
            success: true,
            count: comments.len(),
            recipe_id,
            comments,
        }
    }
}

/// `POST /api/comments` (201).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentCreated {
    pub success: bool,
    pub message: String,
    pub comment: Comment,
}

/// Body of every error response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<RecipeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
}

impl ErrorBody {
    /// An error body with just the `error` field set.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Body of the `OPTIONS` preflight response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preflight {
    pub ok: bool,
}
