use crate::bookmarks::format_recipe_list;
use crate::prelude::{print, println, *};
use crate::show::format_ingredients;
use colored::Colorize;
use recipes_core::recipe::Recipe;

#[derive(Debug, clap::Parser)]
#[command(name = "shop")]
#[command(about = "Shopping list")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the recipes on the shopping list
    #[clap(name = "list")]
    List {
        /// Include each recipe's ingredients
        #[arg(short, long)]
        ingredients: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a recipe to the shopping list
    #[clap(name = "add")]
    Add {
        /// Recipe ID
        id: String,

        /// Servings to shop for
        #[arg(short, long)]
        servings: Option<u32>,
    },

    /// Remove a recipe from the shopping list
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
        Commands::List { ingredients, json } => {
            let shop = &store.state().shop;
            if json {
                println!("{}", serde_json::to_string_pretty(shop)?);
            } else if ingredients {
                print!("{}", format_shopping_list(shop));
            } else {
                print!("{}", format_recipe_list("SHOPPING LIST", shop));
            }
        }
        Commands::Add { id, servings } => {
            store.load_recipe(&id).await?;
            if let Some(servings) = servings {
                store.update_servings(servings)?;
            }

            let recipe = store
                .state()
                .recipe
                .clone()
                .ok_or_else(|| eyre!("Recipe {} was not loaded", id))?;
            let title = recipe.title.clone();
            let before = store.state().shop.len();

            store.add_to_shopping_cart(recipe)?;

            if store.state().shop.len() > before {
                println!("Added {} ({}) to the shopping list", title, id);
            } else {
                println!("{} is already on the shopping list", id);
            }
        }
        Commands::Delete { id } => {
            store.delete_shopping_item(&id)?;
            println!("Removed {} from the shopping list", id);
        }
    }

    Ok(())
}

/// Every recipe on the list followed by its ingredients
fn format_shopping_list(shop: &[Recipe]) -> String {
    let mut result = String::new();

    result.push_str(&f!(
        "\n{}\n",
        f!("SHOPPING LIST ({})", shop.len()).bright_cyan().bold()
    ));

    if shop.is_empty() {
        result.push_str(&f!("{}\n", "Nothing here yet.".yellow()));
        return result;
    }

    for recipe in shop {
        result.push_str(&f!(
            "\n{} {}\n",
            recipe.title.white().bold(),
            f!("({} servings)", recipe.servings).bright_black()
        ));
        result.push_str(&format_ingredients(&recipe.ingredients));
    }

    result
}
