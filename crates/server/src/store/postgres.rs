//! `PostgreSQL` backend for the store adapter.
//!
//! Queries are built at runtime so the crate compiles without a live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use recipe_box_core::{Comment, CommentId, Recipe, RecipeId};

use super::{CommentDraft, RecipeDraft, StoreError};

/// Store backed by the `recipes` and `comments` tables.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    category: String,
    prep_time: String,
    cook_time: String,
    ingredients: String,
    instructions: String,
    notes: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: RecipeId::new(row.id),
            name: row.name,
            category: row.category,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            ingredients: row.ingredients,
            instructions: row.instructions,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: String,
    recipe_id: String,
    username: String,
    comment: String,
    created_at: Option<DateTime<Utc>>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            recipe_id: RecipeId::new(row.recipe_id),
            username: row.username,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

const RECIPE_COLUMNS: &str = "id, name, category, prep_time, cook_time, ingredients, \
                              instructions, notes, created_at, updated_at";

impl PgStore {
    pub(super) const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(super) async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub(super) async fn get_recipe(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Recipe::from))
    }

    pub(super) async fn list_recipes(&self, limit: Option<usize>) -> Result<Vec<Recipe>, StoreError> {
        // LIMIT NULL means no limit.
        let limit = limit.map(|n| i64::try_from(n).unwrap_or(i64::MAX));
        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes \
             ORDER BY created_at DESC NULLS LAST, seq ASC \
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    pub(super) async fn insert_recipe(&self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let id = RecipeId::generate();
        sqlx::query(
            r"
            INSERT INTO recipes
                (id, name, category, prep_time, cook_time, ingredients,
                 instructions, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(id.as_str())
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.prep_time)
        .bind(&draft.cook_time)
        .bind(&draft.ingredients)
        .bind(&draft.instructions)
        .bind(&draft.notes)
        .bind(draft.created_at)
        .bind(draft.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(draft.into_recipe(id))
    }

    pub(super) async fn delete_recipe(&self, id: &RecipeId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub(super) async fn recipe_exists(&self, id: &RecipeId) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM recipes WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    pub(super) async fn list_comments(&self, recipe_id: &RecipeId) -> Result<Vec<Comment>, StoreError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r"
            SELECT id, recipe_id, username, comment, created_at
            FROM comments
            WHERE recipe_id = $1
            ORDER BY created_at DESC NULLS LAST, seq ASC
            ",
        )
        .bind(recipe_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    pub(super) async fn insert_comment(&self, draft: CommentDraft) -> Result<Comment, StoreError> {
        let id = CommentId::generate();
        sqlx::query(
            r"
            INSERT INTO comments (id, recipe_id, username, comment, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(id.as_str())
        .bind(draft.recipe_id.as_str())
        .bind(&draft.username)
        .bind(&draft.comment)
        .bind(draft.created_at)
        .execute(&self.pool)
        .await?;

        Ok(draft.into_comment(id))
    }
}

/// These run against a live database: `DATABASE_URL` must point at a server
/// where the test user may create databases. Each test gets a fresh database
/// with `migrations/` applied.
///
/// ```bash
/// cargo test -p recipe-box-server -- --ignored
/// ```
#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::store::Store;

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn draft(name: &str, minutes: i64) -> RecipeDraft {
        RecipeDraft {
            name: name.to_owned(),
            category: "dinner".to_owned(),
            prep_time: String::new(),
            cook_time: String::new(),
            ingredients: "salt".to_owned(),
            instructions: "Season generously.".to_owned(),
            notes: String::new(),
            created_at: at(minutes),
            updated_at: at(minutes),
        }
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    #[sqlx::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn test_list_orders_newest_first_and_limits(pool: PgPool) {
        let store = Store::postgres(pool);
        for (name, minutes) in [("old", 0), ("new", 20), ("mid", 10)] {
            store.insert_recipe(draft(name, minutes)).await.unwrap();
        }

        let all = store.list_recipes(None).await.unwrap();
        assert_eq!(names(&all), vec!["new", "mid", "old"]);

        let recent = store.list_recipes(Some(2)).await.unwrap();
        assert_eq!(names(&recent), vec!["new", "mid"]);

        let oversized = store.list_recipes(Some(usize::MAX)).await.unwrap();
        assert_eq!(oversized.len(), 3);
    }

    #[sqlx::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn test_equal_timestamps_keep_insertion_order(pool: PgPool) {
        let store = Store::postgres(pool);
        for name in ["first", "second", "third"] {
            store.insert_recipe(draft(name, 5)).await.unwrap();
        }

        let all = store.list_recipes(None).await.unwrap();
        assert_eq!(names(&all), vec!["first", "second", "third"]);
    }

    #[sqlx::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn test_round_trip_delete_and_comments(pool: PgPool) {
        let store = Store::postgres(pool);
        store.ping().await.unwrap();

        let recipe = store.insert_recipe(draft("soup", 0)).await.unwrap();
        assert_eq!(store.get_recipe(&recipe.id).await.unwrap(), Some(recipe.clone()));
        assert!(store.recipe_exists(&recipe.id).await.unwrap());

        for (text, minutes) in [("earlier", 1), ("later", 2)] {
            store
                .insert_comment(CommentDraft {
                    recipe_id: recipe.id.clone(),
                    username: "Ann".to_owned(),
                    comment: text.to_owned(),
                    created_at: at(minutes),
                })
                .await
                .unwrap();
        }
        let comments = store.list_comments(&recipe.id).await.unwrap();
        let texts: Vec<&str> = comments.iter().map(|c| c.comment.as_str()).collect();
        assert_eq!(texts, vec!["later", "earlier"]);
        assert!(
            store
                .list_comments(&RecipeId::new("other"))
                .await
                .unwrap()
                .is_empty()
        );

        assert!(store.delete_recipe(&recipe.id).await.unwrap());
        assert!(!store.delete_recipe(&recipe.id).await.unwrap());
        assert_eq!(store.get_recipe(&recipe.id).await.unwrap(), None);
        assert_eq!(store.list_comments(&recipe.id).await.unwrap().len(), 2);
    }
}
