//! `recipe-box render`: write a static front-end.
//!
//! Output layout:
//!
//! ```text
//! DIR/index.html          - home page, 3 newest recipes
//! DIR/recipes.html        - listing with category filter
//! DIR/recipes/<id>.html   - one page per recipe with its comments
//! ```
//!
//! The directory can be served by `recipe-box-server` via
//! `RECIPE_BOX_STATIC_DIR`.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use recipe_box_client::ApiClient;
use recipe_box_client::render::{self, HOME_RECENT_COUNT};
use recipe_box_core::{BrowseState, RecipeId};

/// Ids become file names; anything outside this set is skipped.
fn is_safe_file_stem(id: &RecipeId) -> bool {
    !id.as_str().is_empty()
        && id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

async fn write_unavailable(out: &Path, message: &'static str) -> std::io::Result<()> {
    tokio::fs::create_dir_all(out).await?;
    let home = render::home_unavailable(message).map_err(std::io::Error::other)?;
    let listing = render::recipes_unavailable(message).map_err(std::io::Error::other)?;
    tokio::fs::write(out.join("index.html"), home).await?;
    tokio::fs::write(out.join("recipes.html"), listing).await
}

/// Fetch recipes and comments and write the static pages under `out`.
///
/// When the recipes cannot be loaded, the two top-level pages are still
/// written, each carrying the generic notice, and the error is returned.
///
/// # Errors
///
/// Returns `ClientError` on fetch failures, `askama::Error` on template
/// failures, or `std::io::Error` if files cannot be written.
pub async fn run(api: &ApiClient, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = match api.list_recipes().await {
        Ok(all) => api.recent_recipes(HOME_RECENT_COUNT).await.map(|recent| (all, recent)),
        Err(e) => Err(e),
    };
    let (all, recent) = match loaded {
        Ok(pair) => pair,
        Err(e) => {
            write_unavailable(out, e.user_message()).await?;
            return Err(e.into());
        }
    };

    tokio::fs::create_dir_all(out.join("recipes")).await?;
    tokio::fs::write(out.join("index.html"), render::home(&recent)?).await?;

    let state = BrowseState::new(all);
    tokio::fs::write(out.join("recipes.html"), render::recipes(&state)?).await?;

    let now = Utc::now();
    let mut written = 0usize;
    for recipe in state.recipes() {
        if !is_safe_file_stem(&recipe.id) {
            warn!(recipe_id = %recipe.id, "Skipping recipe with unsafe id");
            continue;
        }
        let comments = api.list_comments(&recipe.id).await?;
        let page = render::recipe_page(recipe, comments, now)?;
        let path = out.join("recipes").join(format!("{}.html", recipe.id));
        tokio::fs::write(path, page).await?;
        written += 1;
    }

    info!(dir = %out.display(), recipes = written, "Static front-end written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_file_stems() {
        assert!(is_safe_file_stem(&RecipeId::new("abc123XYZ")));
        assert!(!is_safe_file_stem(&RecipeId::new("../etc/passwd")));
        assert!(!is_safe_file_stem(&RecipeId::new("")));
    }
}
