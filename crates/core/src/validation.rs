//! Pre-submit validation of the recipe form.
//!
//! This is advisory only: it gives fast feedback before a request is sent.
//! The recipes endpoint validates independently, and a client that skips this
//! step is still held to the server's rules.

use crate::types::NewRecipe;

/// Minimum recipe name length, in characters.
pub const NAME_MIN_CHARS: usize = 3;

/// Minimum instructions length, in characters.
pub const INSTRUCTIONS_MIN_CHARS: usize = 20;

/// The first rule a recipe form violates.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a recipe name.")]
    NameRequired,
    #[error("Recipe name must be at least {min} characters.", min = NAME_MIN_CHARS)]
    NameTooShort,
    #[error("Please select a category.")]
    CategoryRequired,
    #[error("Please list the ingredients.")]
    IngredientsRequired,
    #[error("Please enter the instructions.")]
    InstructionsRequired,
    #[error("Instructions must be at least {min} characters.", min = INSTRUCTIONS_MIN_CHARS)]
    InstructionsTooShort,
}

/// Validate a recipe form, reporting the first failing rule.
///
/// Rules are checked in form order: name, category, ingredients, instructions.
/// Values are trimmed before measuring.
///
/// # Errors
///
/// Returns the [`FormError`] for the first rule that fails.
pub fn validate_recipe_form(form: &NewRecipe) -> Result<(), FormError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(FormError::NameRequired);
    }
    if name.chars().count() < NAME_MIN_CHARS {
        return Err(FormError::NameTooShort);
    }

    if form.category.as_deref().is_none_or(|c| c.trim().is_empty()) {
        return Err(FormError::CategoryRequired);
    }

    if form.ingredients.trim().is_empty() {
        return Err(FormError::IngredientsRequired);
    }

    let instructions = form.instructions.trim();
    if instructions.is_empty() {
        return Err(FormError::InstructionsRequired);
    }
    if instructions.chars().count() < INSTRUCTIONS_MIN_CHARS {
        return Err(FormError::InstructionsTooShort);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> NewRecipe {
        NewRecipe {
            name: "Grandma's Pie".to_owned(),
            category: Some("dessert".to_owned()),
            ingredients: "flour\nsugar".to_owned(),
            instructions: "Mix and bake for one hour at 350 degrees.".to_owned(),
            ..NewRecipe::default()
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(validate_recipe_form(&valid_form()), Ok(()));
    }

    #[test]
    fn test_name_rules() {
        let mut form = valid_form();
        form.name = "   ".to_owned();
        assert_eq!(validate_recipe_form(&form), Err(FormError::NameRequired));

        form.name = " Pi ".to_owned();
        assert_eq!(validate_recipe_form(&form), Err(FormError::NameTooShort));

        form.name = "Pie".to_owned();
        assert_eq!(validate_recipe_form(&form), Ok(()));
    }

    #[test]
    fn test_category_required() {
        let mut form = valid_form();
        form.category = None;
        assert_eq!(validate_recipe_form(&form), Err(FormError::CategoryRequired));

        form.category = Some(String::new());
        assert_eq!(validate_recipe_form(&form), Err(FormError::CategoryRequired));
    }

    #[test]
    fn test_ingredients_required() {
        let mut form = valid_form();
        form.ingredients = "\n  \n".to_owned();
        assert_eq!(validate_recipe_form(&form), Err(FormError::IngredientsRequired));
    }

    #[test]
    fn test_instruction_rules() {
        let mut form = valid_form();
        form.instructions = String::new();
        assert_eq!(validate_recipe_form(&form), Err(FormError::InstructionsRequired));

        form.instructions = "Bake it.".to_owned();
        assert_eq!(validate_recipe_form(&form), Err(FormError::InstructionsTooShort));

        form.instructions = "a".repeat(INSTRUCTIONS_MIN_CHARS);
        assert_eq!(validate_recipe_form(&form), Ok(()));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let form = NewRecipe {
            name: "ab".to_owned(),
            ..NewRecipe::default()
        };
        assert_eq!(validate_recipe_form(&form), Err(FormError::NameTooShort));

        let form = NewRecipe {
            name: "Soup".to_owned(),
            category: Some("lunch".to_owned()),
            ..NewRecipe::default()
        };
        assert_eq!(validate_recipe_form(&form), Err(FormError::IngredientsRequired));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FormError::NameTooShort.to_string(),
            "Recipe name must be at least 3 characters."
        );
        assert_eq!(
            FormError::InstructionsTooShort.to_string(),
            "Instructions must be at least 20 characters."
        );
    }
}
