//! Subcommand implementations.
//!
//! Every command talks to the API through `ApiClient`, except `migrate`,
//! which connects to `PostgreSQL` directly.

pub mod comments;
pub mod migrate;
pub mod recipes;
pub mod render;
pub mod search;
pub mod seed;

use chrono::{DateTime, Utc};

use recipe_box_core::display::{excerpt, format_date, format_relative, newest_first};
use recipe_box_core::{Comment, Recipe};

/// One line per recipe: id, name, category, and creation date.
pub(crate) fn recipe_line(recipe: &Recipe) -> String {
    format!(
        "{}  {}  [{}]  {}",
        recipe.id,
        recipe.name,
        recipe.category,
        format_date(recipe.created_at)
    )
}

/// Print recipes one per line with their card excerpt.
pub(crate) fn print_recipe_lines<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) {
    #[allow(clippy::print_stdout)]
    {
        for recipe in recipes {
            println!("{}", recipe_line(recipe));
            println!("    {}", excerpt(recipe));
        }
    }
}

/// Multi-line rendering of one recipe.
pub(crate) fn recipe_details(recipe: &Recipe) -> String {
    let mut out = format!("{}  [{}]\n", recipe.name, recipe.category);
    out.push_str(&format!("Added {}\n", format_date(recipe.created_at)));
    if !recipe.prep_time.is_empty() {
        out.push_str(&format!("Prep: {}\n", recipe.prep_time));
    }
    if !recipe.cook_time.is_empty() {
        out.push_str(&format!("Cook: {}\n", recipe.cook_time));
    }

    out.push_str("\nIngredients:\n");
    for line in recipe.ingredient_lines() {
        out.push_str(&format!("  - {line}\n"));
    }
    out.push_str(&format!("\nInstructions:\n{}\n", recipe.instructions));
    if !recipe.notes.is_empty() {
        out.push_str(&format!("\nNotes:\n{}\n", recipe.notes));
    }
    out
}

/// Comment thread, newest first, with relative dates.
pub(crate) fn comment_lines(comments: Vec<Comment>, now: DateTime<Utc>) -> Vec<String> {
    newest_first(comments)
        .iter()
        .map(|c| {
            format!(
                "{} ({}): {}",
                c.username,
                format_relative(c.created_at, now),
                c.comment
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use recipe_box_core::{CommentId, RecipeId};

    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: RecipeId::new("abc"),
            name: "Toast".to_owned(),
            category: "breakfast".to_owned(),
            prep_time: String::new(),
            cook_time: "3 min".to_owned(),
            ingredients: "bread\n\nbutter".to_owned(),
            instructions: "Toast the bread and butter it.".to_owned(),
            notes: String::new(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    #[test]
    fn test_recipe_line() {
        assert_eq!(recipe_line(&recipe()), "abc  Toast  [breakfast]  March 5, 2024");
    }

    #[test]
    fn test_recipe_details_skip_empty_fields() {
        let details = recipe_details(&recipe());
        assert!(details.contains("Cook: 3 min"));
        assert!(!details.contains("Prep:"));
        assert!(!details.contains("Notes:"));
        assert!(details.contains("  - bread\n  - butter\n"));
    }

    #[test]
    fn test_comment_lines_newest_first() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let comment = |id: &str, minutes: i64| Comment {
            id: CommentId::new(id),
            recipe_id: RecipeId::new("abc"),
            username: "Ann".to_owned(),
            comment: id.to_owned(),
            created_at: Some(now - Duration::minutes(minutes)),
        };
        let lines = comment_lines(vec![comment("older", 90), comment("newer", 1)], now);
        assert_eq!(lines[0], "Ann (1 minute ago): newer");
        assert_eq!(lines[1], "Ann (1 hour ago): older");
    }
}
