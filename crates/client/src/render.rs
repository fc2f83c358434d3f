//! HTML rendering with askama.
//!
//! View types hold display-ready strings derived from the API documents by
//! the pure transforms in `recipe_box_core::display`. Every template declares
//! HTML escaping, so user-supplied text is always escaped when inserted into
//! markup; the shallow bracket stripping done by the server is a separate
//! layer and is never relied on here.

use askama::Template;
use chrono::{DateTime, Utc};

use recipe_box_core::display::{excerpt, format_date, format_relative, newest_first};
use recipe_box_core::{BrowseState, CATEGORIES, Comment, Recipe, RecipeId};

/// Recipes shown on the home page.
pub const HOME_RECENT_COUNT: usize = 3;

/// A recipe as shown on a listing card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub prep_time: String,
    pub cook_time: String,
    pub excerpt: String,
    pub created: String,
}

impl From<&Recipe> for RecipeCard {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            name: recipe.name.clone(),
            category: recipe.category.clone(),
            prep_time: recipe.prep_time.clone(),
            cook_time: recipe.cook_time.clone(),
            excerpt: excerpt(recipe),
            created: format_date(recipe.created_at),
        }
    }
}

/// A comment with its relative timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub username: String,
    pub comment: String,
    pub when: String,
}

impl CommentView {
    #[must_use]
    pub fn new(comment: &Comment, now: DateTime<Utc>) -> Self {
        Self {
            username: comment.username.clone(),
            comment: comment.comment.clone(),
            when: format_relative(comment.created_at, now),
        }
    }
}

fn comment_views(comments: Vec<Comment>, now: DateTime<Utc>) -> Vec<CommentView> {
    newest_first(comments)
        .iter()
        .map(|c| CommentView::new(c, now))
        .collect()
}

/// Everything the detail view shows for one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub category: String,
    pub prep_time: String,
    pub cook_time: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub notes: String,
    pub created: String,
    pub comments: Vec<CommentView>,
}

impl RecipeDetail {
    #[must_use]
    pub fn new(recipe: &Recipe, comments: Vec<Comment>, now: DateTime<Utc>) -> Self {
        Self {
            id: recipe.id.to_string(),
            name: recipe.name.clone(),
            category: recipe.category.clone(),
            prep_time: recipe.prep_time.clone(),
            cook_time: recipe.cook_time.clone(),
            ingredients: recipe.ingredient_lines().map(str::to_owned).collect(),
            instructions: recipe.instructions.clone(),
            notes: recipe.notes.clone(),
            created: format_date(recipe.created_at),
            comments: comment_views(comments, now),
        }
    }
}

/// One entry in the category filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub value: String,
    pub selected: bool,
}

/// Form categories first, then any other category present in the list.
fn category_options(state: &BrowseState) -> Vec<CategoryOption> {
    let selected = state.query().category.as_deref();
    let mut values: Vec<&str> = CATEGORIES.to_vec();
    values.extend(
        state
            .categories()
            .into_iter()
            .filter(|c| !CATEGORIES.iter().any(|known| known == c)),
    );

    values
        .into_iter()
        .map(|value| CategoryOption {
            value: value.to_owned(),
            selected: selected == Some(value),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "home.html", escape = "html")]
pub struct HomePage {
    pub root: &'static str,
    pub cards: Vec<RecipeCard>,
    pub notice: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "recipes.html", escape = "html")]
pub struct RecipesPage {
    pub root: &'static str,
    pub cards: Vec<RecipeCard>,
    pub categories: Vec<CategoryOption>,
    pub search_term: String,
    pub notice: Option<&'static str>,
}

/// Stand-alone page for one recipe, written to `recipes/<id>.html`.
#[derive(Template)]
#[template(path = "recipe.html", escape = "html")]
pub struct RecipePage {
    pub root: &'static str,
    pub recipe: RecipeDetail,
}

/// Detail fragment opened over the listing.
#[derive(Template)]
#[template(path = "partials/recipe_modal.html", escape = "html")]
pub struct RecipeModal {
    pub recipe: RecipeDetail,
}

#[derive(Template)]
#[template(path = "partials/comments.html", escape = "html")]
pub struct CommentThread {
    pub recipe_id: String,
    pub comments: Vec<CommentView>,
}

#[derive(Template)]
#[template(path = "partials/notice.html", escape = "html")]
pub struct Notice {
    pub message: String,
}

/// Render the home page with the newest recipes.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn home(recent: &[Recipe]) -> askama::Result<String> {
    HomePage {
        root: "",
        cards: recent.iter().take(HOME_RECENT_COUNT).map(RecipeCard::from).collect(),
        notice: None,
    }
    .render()
}

/// Render the listing page from the current browse state.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn recipes(state: &BrowseState) -> askama::Result<String> {
    RecipesPage {
        root: "",
        cards: state.visible().into_iter().map(RecipeCard::from).collect(),
        categories: category_options(state),
        search_term: state.query().term.clone(),
        notice: None,
    }
    .render()
}

/// Render a failed page load: the page chrome plus one generic notice.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn home_unavailable(message: &'static str) -> askama::Result<String> {
    HomePage {
        root: "",
        cards: Vec::new(),
        notice: Some(message),
    }
    .render()
}

/// Render the listing page when the recipes could not be loaded.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn recipes_unavailable(message: &'static str) -> askama::Result<String> {
    RecipesPage {
        root: "",
        cards: Vec::new(),
        categories: category_options(&BrowseState::default()),
        search_term: String::new(),
        notice: Some(message),
    }
    .render()
}

/// Render the stand-alone page for one recipe.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn recipe_page(
    recipe: &Recipe,
    comments: Vec<Comment>,
    now: DateTime<Utc>,
) -> askama::Result<String> {
    RecipePage {
        root: "../",
        recipe: RecipeDetail::new(recipe, comments, now),
    }
    .render()
}

/// Render the detail modal for one recipe.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn recipe_modal(
    recipe: &Recipe,
    comments: Vec<Comment>,
    now: DateTime<Utc>,
) -> askama::Result<String> {
    RecipeModal {
        recipe: RecipeDetail::new(recipe, comments, now),
    }
    .render()
}

/// Render the comment thread for a recipe, newest first.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn comment_thread(
    recipe_id: &RecipeId,
    comments: Vec<Comment>,
    now: DateTime<Utc>,
) -> askama::Result<String> {
    CommentThread {
        recipe_id: recipe_id.to_string(),
        comments: comment_views(comments, now),
    }
    .render()
}

/// Render a notice fragment (empty state or error).
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn notice(message: impl Into<String>) -> askama::Result<String> {
    Notice {
        message: message.into(),
    }
    .render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use recipe_box_core::CommentId;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn recipe(id: &str, name: &str, category: &str) -> Recipe {
        Recipe {
            id: RecipeId::new(id),
            name: name.to_owned(),
            category: category.to_owned(),
            prep_time: "10 min".to_owned(),
            cook_time: String::new(),
            ingredients: "flour\n\nsugar\n  eggs  ".to_owned(),
            instructions: "Whisk everything together and bake until golden.".to_owned(),
            notes: String::new(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    fn comment(username: &str, text: &str, minutes_ago: i64) -> Comment {
        Comment {
            id: CommentId::new(format!("c-{minutes_ago}")),
            recipe_id: RecipeId::new("r1"),
            username: username.to_owned(),
            comment: text.to_owned(),
            created_at: Some(now() - Duration::minutes(minutes_ago)),
        }
    }

    #[test]
    fn test_card_uses_pure_transforms() {
        let card = RecipeCard::from(&recipe("r1", "Cake", "dessert"));
        assert_eq!(card.created, "March 5, 2024");
        assert!(card.excerpt.starts_with("Whisk everything"));
        assert!(card.excerpt.ends_with("..."));
    }

    #[test]
    fn test_home_shows_at_most_three_cards() {
        let recipes: Vec<_> = (0..5)
            .map(|i| recipe(&format!("r{i}"), &format!("Recipe {i}"), "dinner"))
            .collect();
        let html = home(&recipes).unwrap();
        assert_eq!(html.matches("class=\"recipe-card\"").count(), 3);
        assert!(html.contains("recipes/r0.html"));
        assert!(!html.contains("Recipe 3"));
    }

    #[test]
    fn test_home_empty_state() {
        let html = home(&[]).unwrap();
        assert!(html.contains("No recipes yet"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut evil = recipe("r1", "<script>alert(1)</script>", "dinner");
        evil.notes = "Salt & pepper".to_owned();
        let html = recipe_modal(
            &evil,
            vec![comment("<b>mallory</b>", "<img src=x onerror=alert(1)>", 5)],
            now(),
        )
        .unwrap();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>mallory"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Salt &amp; pepper"));
    }

    #[test]
    fn test_modal_lists_ingredients_and_comments_newest_first() {
        let html = recipe_modal(
            &recipe("r1", "Cake", "dessert"),
            vec![comment("Old", "first", 120), comment("New", "second", 2)],
            now(),
        )
        .unwrap();

        assert_eq!(html.matches("<li>").count(), 3);
        let newer = html.find("second").unwrap();
        let older = html.find("first").unwrap();
        assert!(newer < older);
        assert!(html.contains("2 minutes ago"));
        assert!(html.contains("2 hours ago"));
    }

    #[test]
    fn test_recipes_page_filters_and_marks_selected_category() {
        let mut state = BrowseState::new(vec![
            recipe("r1", "Pancakes", "breakfast"),
            recipe("r2", "Stew", "dinner"),
            recipe("r3", "Tea", "drinks"),
        ]);
        state.set_category(Some("dinner".to_owned()));

        let html = recipes(&state).unwrap();
        assert!(html.contains("Stew"));
        assert!(!html.contains("Pancakes"));
        assert!(html.contains("<option value=\"dinner\" selected>"));
        assert!(html.contains("<option value=\"drinks\">"));
    }

    #[test]
    fn test_unavailable_pages_show_one_notice() {
        let html = recipes_unavailable("Unable to load").unwrap();
        assert_eq!(html.matches("role=\"alert\"").count(), 1);
        assert!(!html.contains("recipe-card"));
    }

    #[test]
    fn test_comment_thread_handles_missing_dates() {
        let mut undated = comment("Ann", "Yum", 0);
        undated.created_at = None;
        let html = comment_thread(&RecipeId::new("r1"), vec![undated], now()).unwrap();
        assert!(html.contains("Date unavailable"));
        assert!(html.contains("data-recipe-id=\"r1\""));
    }

    #[test]
    fn test_recipe_page_links_back_to_listing() {
        let html = recipe_page(&recipe("r1", "Cake", "dessert"), Vec::new(), now()).unwrap();
        assert!(html.contains("href=\"../recipes.html\""));
        assert!(html.contains("No comments yet."));
    }
}
