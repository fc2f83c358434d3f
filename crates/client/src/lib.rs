//! Recipe Box client library.
//!
//! # Modules
//!
//! - [`api`] - Typed client for the recipes and comments endpoints
//! - [`error`] - Fetch failures and the generic user notices
//! - [`render`] - Askama pages and fragments
//! - [`debounce`] - Quiet-period debouncing for search terms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod debounce;
pub mod error;
pub mod render;

pub use api::ApiClient;
pub use error::{ClientError, FetchError, Operation};
