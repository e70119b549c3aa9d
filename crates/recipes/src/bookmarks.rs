use crate::prelude::{eprintln, print, println, *};
use colored::Colorize;
use prettytable::row;
use recipes_core::recipe::Recipe;

#[derive(Debug, clap::Parser)]
#[command(name = "bookmarks")]
#[command(about = "Bookmarked recipes")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List bookmarked recipes
    #[clap(name = "list")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bookmark a recipe
    #[clap(name = "add")]
    Add {
        /// Recipe ID
        id: String,
    },

    /// Remove a bookmark
    #[clap(name = "delete")]
    Delete {
        /// Recipe ID
        id: String,
    },
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = global.config()?;
    let mut store = crate::store::open(&config)?;

    match app.command {
        Commands::List { json } => {
            let bookmarks = &store.state().bookmarks;
            if json {
                println!("{}", serde_json::to_string_pretty(bookmarks)?);
            } else {
                print!("{}", format_recipe_list("BOOKMARKS", bookmarks));
            }
        }
        Commands::Add { id } => {
            // The store keeps duplicates; the CLI does not create them.
            if store.state().is_bookmarked(&id) {
                println!("{} is already bookmarked", id);
                return Ok(());
            }

            store.load_recipe(&id).await?;
            let recipe = store
                .state()
                .recipe
                .clone()
                .ok_or_else(|| eyre!("Recipe {} was not loaded", id))?;
            let title = recipe.title.clone();

            store.add_bookmark(recipe)?;
            println!("Bookmarked {} ({})", title, id);
        }
        Commands::Delete { id } => {
            if !store.state().is_bookmarked(&id) {
                eprintln!("{} is not bookmarked", id);
            }

            store.delete_bookmark(&id)?;
            println!("Removed bookmark {}", id);
        }
    }

    Ok(())
}

/// Titled table of recipes: ID, title, publisher
pub fn format_recipe_list(heading: &str, recipes: &[Recipe]) -> String {
    let mut result = String::new();

    result.push_str(&f!(
        "\n{}\n",
        f!("{} ({})", heading, recipes.len()).bright_cyan().bold()
    ));

    if recipes.is_empty() {
        result.push_str(&f!("{}\n", "Nothing here yet.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.set_titles(row!["ID", "TITLE", "PUBLISHER"]);

    for recipe in recipes {
        table.add_row(row![recipe.id, recipe.title, recipe.publisher]);
    }

    result.push_str(&table.to_string());
    result
}
