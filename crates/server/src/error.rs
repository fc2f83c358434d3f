//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, ApiError>`. Client errors map to 4xx JSON
//! bodies; store failures are logged, captured to Sentry, and answered with a
//! generic 500 that never carries driver error text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use recipe_box_core::RecipeId;
use recipe_box_core::api::ErrorBody;

use crate::store::StoreError;

/// API error type for the recipes and comments handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more required fields were absent or empty.
    #[error("Missing required fields: {}", missing.join(", "))]
    MissingFields {
        required: &'static [&'static str],
        missing: Vec<&'static str>,
    },

    /// A field or parameter was present but unacceptable.
    #[error("{error}: {message}")]
    Invalid {
        error: &'static str,
        message: String,
    },

    /// The referenced recipe does not exist.
    #[error("Recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    /// No API route matches the path.
    #[error("Route not found")]
    RouteNotFound,

    /// The route exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed(&'static [&'static str]),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Shorthand for [`ApiError::Invalid`].
    pub fn invalid(error: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            error,
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields { .. } | Self::Invalid { .. } => StatusCode::BAD_REQUEST,
            Self::RecipeNotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::MissingFields { required, missing } => ErrorBody {
                required: Some(required.iter().map(|f| (*f).to_owned()).collect()),
                ..ErrorBody::new("Missing required fields")
                    .with_message(format!("Missing: {}", missing.join(", ")))
            },
            Self::Invalid { error, message } => ErrorBody::new(*error).with_message(message.clone()),
            Self::RecipeNotFound(id) => ErrorBody {
                recipe_id: Some(id.clone()),
                ..ErrorBody::new("Recipe not found")
                    .with_message("No recipe exists with the given id")
            },
            Self::RouteNotFound => {
                ErrorBody::new("Not found").with_message("No API route matches this path")
            }
            Self::MethodNotAllowed(allowed) => ErrorBody {
                allowed_methods: Some(allowed.iter().map(|m| (*m).to_owned()).collect()),
                ..ErrorBody::new("Method not allowed")
            },
            // Don't expose internal error details to clients
            Self::Store(_) => ErrorBody::new("Internal server error")
                .with_message("The request could not be completed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::MissingFields {
            required: &["name", "ingredients"],
            missing: vec!["name"],
        };
        assert_eq!(err.to_string(), "Missing required fields: name");

        let err = ApiError::invalid("Invalid username", "too long");
        assert_eq!(err.to_string(), "Invalid username: too long");
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::invalid("x", "y").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::RecipeNotFound(RecipeId::new("r")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MethodNotAllowed(&["GET"]).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Store(StoreError::Unavailable("poisoned".to_owned())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_missing_fields_body_lists_required() {
        let (status, json) = body_json(ApiError::MissingFields {
            required: &["name", "ingredients", "instructions"],
            missing: vec!["ingredients"],
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required fields");
        assert_eq!(
            json["required"],
            serde_json::json!(["name", "ingredients", "instructions"])
        );
    }

    #[tokio::test]
    async fn test_store_error_body_hides_details() {
        let (status, json) =
            body_json(ApiError::Store(StoreError::Unavailable("secret detail".to_owned()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal server error");
        assert!(!json.to_string().contains("secret detail"));
    }

    #[tokio::test]
    async fn test_not_found_body_carries_recipe_id() {
        let (_, json) = body_json(ApiError::RecipeNotFound(RecipeId::new("abc"))).await;
        assert_eq!(json["recipeId"], "abc");
    }
}
