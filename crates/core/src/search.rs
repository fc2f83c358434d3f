//! Browse state: the loaded recipe list plus the user's search and filter.
//!
//! Search runs over the full list held in memory; it never goes back to the
//! store. A recipe is visible when the search term is a case-insensitive
//! substring of its name, ingredients, or instructions AND (when a category
//! filter is set) its category equals the filter exactly.

use crate::types::{Recipe, RecipeId};

/// Search term and category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text term. Empty matches everything.
    pub term: String,
    /// Exact category filter. `None` matches every category.
    pub category: Option<String>,
}

impl SearchQuery {
    /// Create a query from a term and an optional category.
    ///
    /// A blank category is treated as "all categories".
    #[must_use]
    pub fn new(term: impl Into<String>, category: Option<String>) -> Self {
        Self {
            term: term.into(),
            category: category.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Check whether a recipe matches this query.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(category) = &self.category
            && recipe.category != *category
        {
            return false;
        }

        let term = self.term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        [&recipe.name, &recipe.ingredients, &recipe.instructions]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Filter recipes by a query, preserving their order.
#[must_use]
pub fn filter_recipes<'a>(recipes: &'a [Recipe], query: &SearchQuery) -> Vec<&'a Recipe> {
    recipes.iter().filter(|recipe| query.matches(recipe)).collect()
}

/// Client application state for browsing recipes.
///
/// Owned by whoever drives the UI and passed to the search and render
/// functions; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    recipes: Vec<Recipe>,
    query: SearchQuery,
    selected: Option<RecipeId>,
}

impl BrowseState {
    /// Create a state holding the full recipe list, with no search applied.
    #[must_use]
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            ..Self::default()
        }
    }

    /// Replace the loaded recipe list, keeping the current query.
    ///
    /// The selection is dropped if the selected recipe is no longer present.
    pub fn replace_recipes(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
        if let Some(id) = &self.selected
            && !self.recipes.iter().any(|r| &r.id == id)
        {
            self.selected = None;
        }
    }

    /// All loaded recipes, unfiltered.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// The active query.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Set the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.term = term.into();
    }

    /// Set or clear the category filter.
    pub fn set_category(&mut self, category: Option<String>) {
        self.query.category = category.filter(|c| !c.trim().is_empty());
    }

    /// Recipes matching the active query, in list order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Recipe> {
        filter_recipes(&self.recipes, &self.query)
    }

    /// Distinct categories of the loaded recipes, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.recipes.iter().map(|r| r.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Mark a recipe as the one open in the detail view.
    ///
    /// Returns the recipe, or `None` (clearing the selection) if it is not loaded.
    pub fn select(&mut self, id: &RecipeId) -> Option<&Recipe> {
        let found = self.recipes.iter().find(|r| &r.id == id);
        self.selected = found.map(|r| r.id.clone());
        found
    }

    /// Close the detail view.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The recipe open in the detail view, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Recipe> {
        let id = self.selected.as_ref()?;
        self.recipes.iter().find(|r| &r.id == id)
    }
}
