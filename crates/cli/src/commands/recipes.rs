//! `recipe-box recipes ...`

use clap::Args;
use tracing::info;

use recipe_box_client::ApiClient;
use recipe_box_core::{NewRecipe, RecipeId, validate_recipe_form};

use super::{comment_lines, print_recipe_lines, recipe_details};

/// Fields for `recipes add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Recipe name (at least 3 characters)
    #[arg(long)]
    pub name: String,

    /// Category, e.g. breakfast, lunch, dinner, dessert, snack, beverage
    #[arg(long)]
    pub category: Option<String>,

    /// Preparation time, free text
    #[arg(long)]
    pub prep_time: Option<String>,

    /// Cooking time, free text
    #[arg(long)]
    pub cook_time: Option<String>,

    /// Ingredients, one per line
    #[arg(long)]
    pub ingredients: String,

    /// Instructions (at least 20 characters)
    #[arg(long)]
    pub instructions: String,

    /// Optional notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<AddArgs> for NewRecipe {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            prep_time: args.prep_time,
            cook_time: args.cook_time,
            ingredients: args.ingredients,
            instructions: args.instructions,
            notes: args.notes,
        }
    }
}

/// List all recipes, or the `recent` newest.
///
/// # Errors
///
/// Returns `ClientError` if the recipes cannot be loaded.
pub async fn list(api: &ApiClient, recent: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let recipes = match recent {
        Some(n) => api.recent_recipes(n).await?,
        None => api.list_recipes().await?,
    };

    if recipes.is_empty() {
        #[allow(clippy::print_stdout)]
        {
            println!("No recipes yet.");
        }
        return Ok(());
    }
    print_recipe_lines(&recipes);
    Ok(())
}

/// Show one recipe followed by its comment thread.
///
/// # Errors
///
/// Returns `ClientError` if the recipe or its comments cannot be loaded.
pub async fn show(api: &ApiClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = RecipeId::new(id);
    let recipe = api.get_recipe(&id).await?;
    let comments = api.list_comments(&id).await?;
    let count = comments.len();

    #[allow(clippy::print_stdout)]
    {
        println!("{}", recipe_details(&recipe));
        println!("Comments ({count}):");
        for line in comment_lines(comments, chrono::Utc::now()) {
            println!("  {line}");
        }
    }
    Ok(())
}

/// Validate the form locally, then submit it.
///
/// # Errors
///
/// Returns `FormError` if a form rule fails (nothing is sent), or
/// `ClientError` if the server rejects or cannot store the recipe.
pub async fn add(api: &ApiClient, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let recipe = NewRecipe::from(args);
    validate_recipe_form(&recipe)?;

    let created = api.create_recipe(&recipe).await?;
    info!(recipe_id = %created.id, "Recipe created");

    #[allow(clippy::print_stdout)]
    {
        println!("Recipe created: {}", created.id);
    }
    Ok(())
}

/// Delete a recipe by id.
///
/// # Errors
///
/// Returns `ClientError` if the recipe does not exist or cannot be deleted.
pub async fn delete(api: &ApiClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let deleted = api.delete_recipe(&RecipeId::new(id)).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Recipe deleted: {deleted}");
    }
    Ok(())
}
