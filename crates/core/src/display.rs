//! Pure display transforms used by the rendering layer.
//!
//! Nothing here produces markup; these functions turn documents into the
//! strings and orderings that templates display.

use chrono::{DateTime, Utc};

use crate::types::{Comment, Recipe, ingredient_lines};

/// Number of instruction characters shown on a recipe card.
pub const EXCERPT_CHARS: usize = 120;

/// Number of ingredient lines used when a card falls back to ingredients.
pub const EXCERPT_INGREDIENTS: usize = 3;

/// Card text for a recipe that has neither instructions nor ingredients.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Rendered in place of a missing or unparseable timestamp.
pub const DATE_UNAVAILABLE: &str = "Date unavailable";

/// Relative dates switch to absolute dates at this many days.
const RELATIVE_DAYS_LIMIT: i64 = 7;

/// Derive the short description shown on a recipe card.
///
/// Prefers the first 120 characters of the instructions, then the first three
/// ingredient lines joined by `", "`, then a fixed fallback.
#[must_use]
pub fn excerpt(recipe: &Recipe) -> String {
    let instructions = recipe.instructions.trim();
    if !instructions.is_empty() {
        let head: String = instructions.chars().take(EXCERPT_CHARS).collect();
        return format!("{head}...");
    }

    let lines: Vec<&str> = ingredient_lines(&recipe.ingredients)
        .take(EXCERPT_INGREDIENTS)
        .collect();
    if !lines.is_empty() {
        return format!("{}...", lines.join(", "));
    }

    NO_DESCRIPTION.to_owned()
}

/// Format a timestamp as `Month D, YYYY`.
#[must_use]
pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(
        || DATE_UNAVAILABLE.to_owned(),
        |at| at.format("%B %-d, %Y").to_string(),
    )
}

/// Format a comment timestamp relative to `now`.
///
/// `just now` under a minute, then minutes, hours, and days; a week or more
/// falls back to [`format_date`]. Timestamps in the future count as `just now`.
#[must_use]
pub fn format_relative(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return DATE_UNAVAILABLE.to_owned();
    };

    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_owned()
    } else if hours < 1 {
        ago(minutes, "minute")
    } else if days < 1 {
        ago(hours, "hour")
    } else if days < RELATIVE_DAYS_LIMIT {
        ago(days, "day")
    } else {
        format_date(Some(at))
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Sort comments newest first.
///
/// The sort is stable; comments without a timestamp go last.
#[must_use]
pub fn newest_first(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    comments
}
