//! Recipe Box CLI - Browse, search, and render recipes; manage the database.
//!
//! # Usage
//!
//! ```bash
//! # List recipes (all, or the 3 newest)
//! recipe-box recipes list
//! recipe-box recipes list --recent 3
//!
//! # Add a recipe
//! recipe-box recipes add --name "Grandma's Pie" \
//!     --category dessert --ingredients $'flour\nbutter\napples' \
//!     --instructions "Mix, fill the crust, and bake for an hour."
//!
//! # Comment on a recipe
//! recipe-box comments add <recipe-id> --username Ann --text "Delicious!"
//!
//! # Interactive search: one term per line on stdin
//! recipe-box search --category dinner
//!
//! # Write a static front-end
//! recipe-box render --out public/
//!
//! # Run PostgreSQL migrations
//! recipe-box migrate
//! ```
//!
//! # Environment Variables
//!
//! - `RECIPE_BOX_API_URL` - API server base URL (default: `http://127.0.0.1:3000`)
//! - `RECIPE_BOX_DATABASE_URL` / `DATABASE_URL` - for `migrate`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use recipe_box_client::{ApiClient, ClientError};

mod commands;

#[derive(Parser)]
#[command(name = "recipe-box")]
#[command(author, version, about = "Recipe Box command-line tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage recipes
    Recipes {
        #[command(subcommand)]
        action: RecipeAction,
    },
    /// Read and post comments
    Comments {
        #[command(subcommand)]
        action: CommentAction,
    },
    /// Search recipes; reads one search term per line from stdin
    Search {
        /// Only show recipes in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Write a static front-end (index, listing, and one page per recipe)
    Render {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Post a few sample recipes
    Seed,
    /// Run PostgreSQL database migrations
    Migrate,
}

#[derive(Subcommand)]
enum RecipeAction {
    /// List recipes, newest first
    List {
        /// Only the N most recently created recipes
        #[arg(short, long)]
        recent: Option<usize>,
    },
    /// Show one recipe with its comments
    Show {
        /// Recipe id
        id: String,
    },
    /// Submit a new recipe
    Add(commands::recipes::AddArgs),
    /// Delete a recipe (its comments are kept)
    Delete {
        /// Recipe id
        id: String,
    },
}

#[derive(Subcommand)]
enum CommentAction {
    /// List comments on a recipe, newest first
    List {
        /// Recipe id
        recipe_id: String,
    },
    /// Post a comment on a recipe
    Add {
        /// Recipe id
        recipe_id: String,

        /// Display name (1-100 characters)
        #[arg(short, long)]
        username: String,

        /// Comment text (1-1000 characters)
        #[arg(short, long)]
        text: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "recipe_box_cli=info,recipe_box_client=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        match e.downcast_ref::<ClientError>() {
            Some(client_error) => {
                tracing::debug!(error = %client_error, "API call failed");
                #[allow(clippy::print_stderr)]
                {
                    eprintln!("{}", client_error.user_message());
                }
            }
            None => tracing::error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiClient::from_env;
    match cli.command {
        Commands::Recipes { action } => match action {
            RecipeAction::List { recent } => commands::recipes::list(&api()?, recent).await?,
            RecipeAction::Show { id } => commands::recipes::show(&api()?, &id).await?,
            RecipeAction::Add(args) => commands::recipes::add(&api()?, args).await?,
            RecipeAction::Delete { id } => commands::recipes::delete(&api()?, &id).await?,
        },
        Commands::Comments { action } => match action {
            CommentAction::List { recipe_id } => {
                commands::comments::list(&api()?, &recipe_id).await?;
            }
            CommentAction::Add {
                recipe_id,
                username,
                text,
            } => commands::comments::add(&api()?, &recipe_id, username, text).await?,
        },
        Commands::Search { category } => commands::search::run(&api()?, category).await?,
        Commands::Render { out } => commands::render::run(&api()?, &out).await?,
        Commands::Seed => commands::seed::run(&api()?).await?,
        Commands::Migrate => commands::migrate::run().await?,
    }
    Ok(())
}
