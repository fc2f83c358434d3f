//! Comment document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CommentId, RecipeId};
use super::timestamp::deserialize_lenient;

/// Maximum username length, in characters.
pub const USERNAME_MAX_CHARS: usize = 100;

/// Maximum comment body length, in characters.
pub const COMMENT_MAX_CHARS: usize = 1000;

/// A persisted comment on a recipe.
///
/// `recipe_id` referenced an existing recipe when the comment was created;
/// nothing keeps it valid afterwards (deleting a recipe leaves its comments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub recipe_id: RecipeId,
    pub username: String,
    pub comment: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a comment submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub recipe_id: RecipeId,
    pub username: String,
    pub comment: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_wire_shape() {
        let body = NewComment {
            recipe_id: RecipeId::new("r1"),
            username: "Ann".to_owned(),
            comment: "Delicious!".to_owned(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"recipeId": "r1", "username": "Ann", "comment": "Delicious!"})
        );
    }

    #[test]
    fn test_comment_decodes_with_bad_timestamp() {
        let json = r#"{"id":"c1","recipeId":"r1","username":"Ann","comment":"Yum","createdAt":"soon"}"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.recipe_id.as_str(), "r1");
        assert!(comment.created_at.is_none());
    }
}
