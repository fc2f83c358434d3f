//! Recipe Box Core - Shared types library.
//!
//! This crate provides the types and pure logic used across all Recipe Box
//! components:
//! - `server` - JSON API over the recipe and comment collections
//! - `client` - Typed API client and HTML rendering
//! - `cli` - Command-line front-end, migrations, and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Recipe and comment documents plus type-safe IDs
//! - [`api`] - JSON response envelopes
//! - [`sanitize`] - Shallow input sanitization applied before persistence
//! - [`validation`] - Advisory recipe form validation
//! - [`search`] - Browse state with in-memory search and category filtering
//! - [`display`] - Excerpts, date formatting, and comment ordering

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod display;
pub mod sanitize;
pub mod search;
pub mod types;
pub mod validation;

pub use search::{BrowseState, SearchQuery};
pub use types::*;
pub use validation::{FormError, validate_recipe_form};
