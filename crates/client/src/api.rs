//! Typed client for the recipes and comments endpoints.
//!
//! Every call returns the parsed payload or a [`ClientError`]. Handler error
//! bodies are logged at debug level and otherwise dropped.

use std::sync::Arc;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use recipe_box_core::api::{
    CommentCreated, CommentList, ErrorBody, RecipeCreated, RecipeDeleted, RecipeEnvelope,
    RecipeList,
};
use recipe_box_core::{Comment, NewComment, NewRecipe, Recipe, RecipeId};

use crate::error::{ClientError, FetchError, Operation};

/// Environment variable naming the API base URL.
pub const API_URL_ENV: &str = "RECIPE_BOX_API_URL";

/// Base URL used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Client for the Recipe Box JSON API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base,
            }),
        })
    }

    /// Create a client from `RECIPE_BOX_API_URL`, defaulting to localhost.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the configured URL is invalid.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let base = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Self::new(&base)
    }

    /// The server base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// Build `{base}/api/{segments...}`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
        operation: Operation,
    ) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::new(operation, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::new(operation, e))?;

        if !status.is_success() {
            let error = serde_json::from_str::<ErrorBody>(&body)
                .map_or_else(|_| body.chars().take(200).collect(), |e| e.error);
            debug!(status = %status, error = %error, "API returned non-success status");
            return Err(ClientError::new(
                operation,
                FetchError::Status {
                    status: status.as_u16(),
                    error,
                },
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!(error = %e, "Failed to parse API response");
            ClientError::new(operation, e)
        })
    }

    /// All recipes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on any fetch failure.
    #[instrument(skip(self))]
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, ClientError> {
        let url = self.endpoint(&["recipes"]);
        let list: RecipeList = Self::send(self.inner.client.get(url), Operation::Load).await?;
        Ok(list.recipes)
    }

    /// The `n` most recently created recipes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on any fetch failure.
    #[instrument(skip(self))]
    pub async fn recent_recipes(&self, n: usize) -> Result<Vec<Recipe>, ClientError> {
        let mut url = self.endpoint(&["recipes"]);
        url.query_pairs_mut().append_pair("recent", &n.to_string());
        let list: RecipeList = Self::send(self.inner.client.get(url), Operation::Load).await?;
        Ok(list.recipes)
    }

    /// One recipe by id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on any fetch failure, including 404.
    #[instrument(skip(self))]
    pub async fn get_recipe(&self, id: &RecipeId) -> Result<Recipe, ClientError> {
        let url = self.endpoint(&["recipes", id.as_str()]);
        let envelope: RecipeEnvelope =
            Self::send(self.inner.client.get(url), Operation::Load).await?;
        Ok(envelope.recipe)
    }

    /// Submit a new recipe and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on any fetch failure, including validation 400s.
    #[instrument(skip(self, recipe), fields(name = %recipe.name))]
    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ClientError> {
        let url = self.endpoint(&["recipes"]);
        let created: RecipeCreated =
            Self::send(self.inner.client.post(url).json(recipe), Operation::Save).await?;
        Ok(created.recipe)
    }

    /// Delete a recipe. Its comments stay on the server.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on any fetch failure, including 404.
    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, id: &RecipeId) -> Result<RecipeId, ClientError> {
        let url = self.endpoint(&["recipes", id.as_str()]);
        let deleted: RecipeDeleted =
            Self::send(self.inner.client.delete(url), Operation::Save).await?;
        Ok(deleted.recipe_id)
    }

    /// Comments on a recipe, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on any fetch failure.
    #[instrument(skip(self))]
    pub async fn list_comments(&self, recipe_id: &RecipeId) -> Result<Vec<Comment>, ClientError> {
        let mut url = self.endpoint(&["comments"]);
        url.query_pairs_mut()
            .append_pair("recipeId", recipe_id.as_str());
        let list: CommentList = Self::send(self.inner.client.get(url), Operation::Load).await?;
        Ok(list.comments)
    }

    /// Post a comment and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on any fetch failure, including 400 and 404.
    #[instrument(skip(self, comment), fields(recipe_id = %comment.recipe_id))]
    pub async fn post_comment(&self, comment: &NewComment) -> Result<Comment, ClientError> {
        let url = self.endpoint(&["comments"]);
        let created: CommentCreated =
            Self::send(self.inner.client.post(url).json(comment), Operation::Save).await?;
        Ok(created.comment)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(
            client.endpoint(&["recipes"]).as_str(),
            "http://localhost:3000/api/recipes"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ApiClient::new("https://example.com/box/").unwrap();
        assert_eq!(
            client.endpoint(&["recipes", "abc"]).as_str(),
            "https://example.com/box/api/recipes/abc"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        let url = client.endpoint(&["recipes", "a/b c"]);
        assert_eq!(url.path(), "/api/recipes/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_non_base_urls() {
        assert!(ApiClient::new("mailto:chef@example.com").is_err());
        assert!(ApiClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_load_failure() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.list_recipes().await.unwrap_err();
        assert_eq!(err.operation, Operation::Load);
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), Operation::Load.notice());
    }
}
