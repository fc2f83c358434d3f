//! Recipe document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::RecipeId;
use super::timestamp::deserialize_lenient;

/// Category stored when a recipe is submitted without one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Categories offered by the submission form and the listing filter.
///
/// The server accepts any category string; this list only drives the UI.
pub const CATEGORIES: &[&str] = &["breakfast", "lunch", "dinner", "dessert", "snack", "beverage"];

/// A persisted recipe.
///
/// Every stored recipe has non-empty `name`, `ingredients` and `instructions`.
/// That invariant is enforced by the recipes handler, not by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Store-generated identifier.
    pub id: RecipeId,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    /// Multi-line text; each non-blank line is one ingredient.
    pub ingredients: String,
    pub instructions: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_owned()
}

impl Recipe {
    /// Returns the logical ingredient lines: non-blank lines, trimmed.
    pub fn ingredient_lines(&self) -> impl Iterator<Item = &str> {
        ingredient_lines(&self.ingredients)
    }
}

/// Split free-text ingredients into non-blank, trimmed lines.
pub fn ingredient_lines(ingredients: &str) -> impl Iterator<Item = &str> {
    ingredients
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Body of a recipe submission, as sent by a client.
///
/// Optional fields are omitted from the JSON when unset so the server applies
/// its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
