//! `recipe-box search`: live search over the loaded recipe list.
//!
//! Recipes are fetched once. Each stdin line replaces the search term; terms
//! are debounced so a fast burst of input recomputes the list only once.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use recipe_box_client::ApiClient;
use recipe_box_client::debounce::{SEARCH_DEBOUNCE, debounce};
use recipe_box_core::BrowseState;

use super::print_recipe_lines;

fn print_matches(state: &BrowseState) {
    let visible = state.visible();

    #[allow(clippy::print_stdout)]
    {
        println!(
            "-- {} of {} recipe(s) match {:?}",
            visible.len(),
            state.recipes().len(),
            state.query().term
        );
    }
    print_recipe_lines(visible);
}

/// Load all recipes, then filter them by each debounced stdin line.
///
/// # Errors
///
/// Returns `ClientError` if the recipes cannot be loaded.
pub async fn run(api: &ApiClient, category: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = BrowseState::new(api.list_recipes().await?);
    state.set_category(category);
    print_matches(&state);

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let mut terms = debounce(rx, SEARCH_DEBOUNCE);
    while let Some(term) = terms.recv().await {
        state.set_search_term(term);
        print_matches(&state);
    }
    Ok(())
}
