//! `recipe-box seed`: post a handful of sample recipes.

use tracing::info;

use recipe_box_client::ApiClient;
use recipe_box_core::{NewRecipe, validate_recipe_form};

fn sample(
    name: &str,
    category: &str,
    prep_time: &str,
    cook_time: &str,
    ingredients: &[&str],
    instructions: &str,
) -> NewRecipe {
    NewRecipe {
        name: name.to_owned(),
        category: Some(category.to_owned()),
        prep_time: Some(prep_time.to_owned()),
        cook_time: Some(cook_time.to_owned()),
        ingredients: ingredients.join("\n"),
        instructions: instructions.to_owned(),
        notes: None,
    }
}

/// Sample recipes used by `seed`. All pass form validation.
#[must_use]
pub fn samples() -> Vec<NewRecipe> {
    vec![
        sample(
            "Buttermilk Pancakes",
            "breakfast",
            "10 min",
            "15 min",
            &["2 cups flour", "2 cups buttermilk", "2 eggs", "2 tbsp sugar"],
            "Whisk the dry ingredients, fold in the wet ones, and cook on a hot griddle.",
        ),
        sample(
            "Tomato Soup",
            "lunch",
            "10 min",
            "30 min",
            &["1 kg tomatoes", "1 onion", "2 cloves garlic", "500 ml stock"],
            "Soften the onion and garlic, add tomatoes and stock, simmer, then blend.",
        ),
        sample(
            "Overnight Oats",
            "breakfast",
            "5 min",
            "0 min",
            &["1 cup oats", "1 cup milk", "1 tbsp honey"],
            "Stir everything together in a jar and refrigerate overnight.",
        ),
        sample(
            "Roast Chicken",
            "dinner",
            "15 min",
            "90 min",
            &["1 whole chicken", "1 lemon", "fresh thyme", "salt"],
            "Stuff the chicken with lemon and thyme, season well, and roast at 200C.",
        ),
        sample(
            "Iced Mint Tea",
            "beverage",
            "5 min",
            "5 min",
            &["4 black tea bags", "1 bunch mint", "ice"],
            "Steep the tea and mint in hot water, cool, and pour over plenty of ice.",
        ),
    ]
}

/// Post every sample recipe.
///
/// # Errors
///
/// Returns `ClientError` if a recipe cannot be saved.
pub async fn run(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    for recipe in samples() {
        validate_recipe_form(&recipe)?;
        let created = api.create_recipe(&recipe).await?;
        info!(recipe_id = %created.id, name = %created.name, "Seeded recipe");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_pass_form_validation() {
        for recipe in samples() {
            assert_eq!(validate_recipe_form(&recipe), Ok(()), "{}", recipe.name);
        }
    }
}
