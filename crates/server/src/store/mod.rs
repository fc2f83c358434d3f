//! Store adapter over the `recipes` and `comments` collections.
//!
//! The adapter is a thin, typed wrapper exposing the primitives the handlers
//! need: get-by-id, ordered-and-limited queries, insert with a generated id,
//! delete-by-id, and an existence check. It enforces no business rules; the
//! handlers validate and sanitize before anything reaches it.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process collections, used for development and tests
//! - [`PgStore`] - `PostgreSQL` tables (see `migrations/`)
//!
//! Each single operation is atomic. Nothing spans operations: the comments
//! handler's existence check and insert are two separate calls.

mod memory;
mod postgres;

use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use recipe_box_core::{Comment, CommentId, Recipe, RecipeId};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur in store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The in-memory collections were poisoned by a panicking writer.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A sanitized recipe ready to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub category: String,
    pub prep_time: String,
    pub cook_time: String,
    pub ingredients: String,
    pub instructions: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeDraft {
    fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: self.name,
            category: self.category,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            ingredients: self.ingredients,
            instructions: self.instructions,
            notes: self.notes,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// A sanitized comment ready to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub recipe_id: RecipeId,
    pub username: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl CommentDraft {
    fn into_comment(self, id: CommentId) -> Comment {
        Comment {
            id,
            recipe_id: self.recipe_id,
            username: self.username,
            comment: self.comment,
            created_at: Some(self.created_at),
        }
    }
}

/// Handle to the document store. Cheap to clone.
#[derive(Debug, Clone)]
pub enum Store {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl Store {
    /// An empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    /// A store backed by a `PostgreSQL` pool.
    #[must_use]
    pub const fn postgres(pool: PgPool) -> Self {
        Self::Postgres(PgStore::new(pool))
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }

    /// Verify the store answers a trivial query.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend is unreachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.ping(),
            Self::Postgres(store) => store.ping().await,
        }
    }

    /// Fetch one recipe by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn get_recipe(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        match self {
            Self::Memory(store) => store.get_recipe(id),
            Self::Postgres(store) => store.get_recipe(id).await,
        }
    }

    /// List recipes ordered by `created_at` descending, optionally limited.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_recipes(&self, limit: Option<usize>) -> Result<Vec<Recipe>, StoreError> {
        match self {
            Self::Memory(store) => store.list_recipes(limit),
            Self::Postgres(store) => store.list_recipes(limit).await,
        }
    }

    /// Insert a recipe under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails; nothing is persisted then.
    pub async fn insert_recipe(&self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        match self {
            Self::Memory(store) => store.insert_recipe(draft),
            Self::Postgres(store) => store.insert_recipe(draft).await,
        }
    }

    /// Delete a recipe by id. Returns whether a document was removed.
    ///
    /// Comments referencing the recipe are left in place.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the delete fails.
    pub async fn delete_recipe(&self, id: &RecipeId) -> Result<bool, StoreError> {
        match self {
            Self::Memory(store) => store.delete_recipe(id),
            Self::Postgres(store) => store.delete_recipe(id).await,
        }
    }

    /// Check whether a recipe exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn recipe_exists(&self, id: &RecipeId) -> Result<bool, StoreError> {
        match self {
            Self::Memory(store) => store.recipe_exists(id),
            Self::Postgres(store) => store.recipe_exists(id).await,
        }
    }

    /// List comments on a recipe ordered by `created_at` descending.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_comments(&self, recipe_id: &RecipeId) -> Result<Vec<Comment>, StoreError> {
        match self {
            Self::Memory(store) => store.list_comments(recipe_id),
            Self::Postgres(store) => store.list_comments(recipe_id).await,
        }
    }

    /// Insert a comment under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails; nothing is persisted then.
    pub async fn insert_comment(&self, draft: CommentDraft) -> Result<Comment, StoreError> {
        match self {
            Self::Memory(store) => store.insert_comment(draft),
            Self::Postgres(store) => store.insert_comment(draft).await,
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the schema migrations in `crates/server/migrations/`.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
