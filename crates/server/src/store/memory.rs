//! In-process document store.
//!
//! Collections are vectors in insertion order, which is the "natural order"
//! used to break ties between documents with equal timestamps.

use std::sync::{Arc, PoisonError, RwLock};

use recipe_box_core::{Comment, CommentId, Recipe, RecipeId};

use super::{CommentDraft, RecipeDraft, StoreError};

#[derive(Debug, Default)]
struct Collections {
    recipes: Vec<Recipe>,
    comments: Vec<Comment>,
}

/// In-memory store. Clones share the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_owned())
}

impl MemoryStore {
    pub(super) fn ping(&self) -> Result<(), StoreError> {
        self.inner.read().map(|_| ()).map_err(poisoned)
    }

    pub(super) fn get_recipe(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        let guard = self.inner.read().map_err(poisoned)?;
        Ok(guard.recipes.iter().find(|r| &r.id == id).cloned())
    }

    pub(super) fn list_recipes(&self, limit: Option<usize>) -> Result<Vec<Recipe>, StoreError> {
        let guard = self.inner.read().map_err(poisoned)?;
        let mut recipes = guard.recipes.clone();
        drop(guard);

        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            recipes.truncate(limit);
        }
        Ok(recipes)
    }

    pub(super) fn insert_recipe(&self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let mut guard = self.inner.write().map_err(poisoned)?;
        let recipe = draft.into_recipe(RecipeId::generate());
        guard.recipes.push(recipe.clone());
        Ok(recipe)
    }

    pub(super) fn delete_recipe(&self, id: &RecipeId) -> Result<bool, StoreError> {
        let mut guard = self.inner.write().map_err(poisoned)?;
        let before = guard.recipes.len();
        guard.recipes.retain(|r| &r.id != id);
        Ok(guard.recipes.len() != before)
    }

    pub(super) fn recipe_exists(&self, id: &RecipeId) -> Result<bool, StoreError> {
        let guard = self.inner.read().map_err(poisoned)?;
        Ok(guard.recipes.iter().any(|r| &r.id == id))
    }

    pub(super) fn list_comments(&self, recipe_id: &RecipeId) -> Result<Vec<Comment>, StoreError> {
        let guard = self.inner.read().map_err(poisoned)?;
        let mut comments: Vec<Comment> = guard
            .comments
            .iter()
            .filter(|c| &c.recipe_id == recipe_id)
            .cloned()
            .collect();
        drop(guard);

        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    pub(super) fn insert_comment(&self, draft: CommentDraft) -> Result<Comment, StoreError> {
        let mut guard = self.inner.write().map_err(poisoned)?;
        let comment = draft.into_comment(CommentId::generate());
        guard.comments.push(comment.clone());
        Ok(comment)
    }
}
