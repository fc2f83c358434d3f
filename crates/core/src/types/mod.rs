//! Core types for Recipe Box.
//!
//! This module provides the document types shared by the API server and its
//! clients, plus type-safe identifier wrappers.

pub mod comment;
pub mod id;
pub mod recipe;
pub mod timestamp;

pub use comment::{COMMENT_MAX_CHARS, Comment, NewComment, USERNAME_MAX_CHARS};
pub use id::*;
pub use recipe::{CATEGORIES, DEFAULT_CATEGORY, NewRecipe, Recipe, ingredient_lines};
