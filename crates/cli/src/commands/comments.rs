//! `recipe-box comments ...`

use recipe_box_client::ApiClient;
use recipe_box_core::{NewComment, RecipeId};

use super::comment_lines;

/// List the comments on a recipe, newest first.
///
/// # Errors
///
/// Returns `ClientError` if the comments cannot be loaded.
pub async fn list(api: &ApiClient, recipe_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let comments = api.list_comments(&RecipeId::new(recipe_id)).await?;

    #[allow(clippy::print_stdout)]
    {
        if comments.is_empty() {
            println!("No comments yet.");
        }
        for line in comment_lines(comments, chrono::Utc::now()) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Post a comment on a recipe.
///
/// # Errors
///
/// Returns `ClientError` if the recipe does not exist or the comment is rejected.
pub async fn add(
    api: &ApiClient,
    recipe_id: &str,
    username: String,
    comment: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let created = api
        .post_comment(&NewComment {
            recipe_id: RecipeId::new(recipe_id),
            username,
            comment,
        })
        .await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Comment added: {}", created.id);
    }
    Ok(())
}
