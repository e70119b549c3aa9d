use crate::prelude::{print, println, *};
use colored::Colorize;
use prettytable::row;
use recipes_core::recipe::{Ingredient, Recipe};

#[derive(Debug, clap::Args, Clone)]
pub struct ShowOptions {
    /// Recipe ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Rescale the ingredients to this many servings
    #[arg(short, long)]
    pub servings: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, global: crate::Global) -> Result<()> {
    let config = global.config()?;
    let mut store = crate::store::open(&config)?;

    if global.verbose {
        println!("Fetching recipe {}...", options.id);
    }

    store.load_recipe(&options.id).await?;

    if let Some(servings) = options.servings {
        store.update_servings(servings)?;
    }

    let recipe = store
        .state()
        .recipe
        .as_ref()
        .ok_or_else(|| eyre!("Recipe {} was not loaded", options.id))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
    } else {
        print!("{}", format_recipe_text(recipe));
    }

    Ok(())
}

/// Render a quantity the way a cook would write it: no trailing zeros
pub fn format_quantity(quantity: Option<f64>) -> String {
    match quantity {
        None => String::new(),
        Some(q) if q.fract() == 0.0 => f!("{}", q as i64),
        Some(q) => {
            let rounded = f!("{:.2}", q);
            rounded.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// Ingredient table: quantity, unit, description
pub fn format_ingredients(ingredients: &[Ingredient]) -> String {
    let mut table = new_table();

    for ingredient in ingredients {
        table.add_row(row![
            format_quantity(ingredient.quantity),
            ingredient.unit,
            ingredient.description
        ]);
    }

    table.to_string()
}

fn format_recipe_text(recipe: &Recipe) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("{}\n", recipe.title.to_uppercase().bright_cyan().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&f!(
        "{}: {} | {}: {} min | {}: {}\n",
        "Publisher".green(),
        recipe.publisher.bright_white(),
        "Cooking time".green(),
        recipe.cooking_time.to_string().bright_yellow(),
        "Servings".green(),
        recipe.servings.to_string().bright_yellow()
    ));
    result.push_str(&f!("{}: {}\n", "ID".green(), recipe.id.bright_white()));

    if recipe.bookmarked {
        result.push_str(&f!("{}\n", "★ Bookmarked".bright_magenta()));
    }

    result.push_str(&f!("\n{}\n", "INGREDIENTS".bright_yellow().bold()));
    if recipe.ingredients.is_empty() {
        result.push_str(&f!("{}\n", "No ingredients listed.".yellow()));
    } else {
        result.push_str(&format_ingredients(&recipe.ingredients));
    }

    if !recipe.source_url.is_empty() {
        result.push_str(&f!(
            "\n{}: {}\n",
            "Directions".green(),
            recipe.source_url.cyan().underline()
        ));
    }

    result.push_str(&f!("\n{}:\n", "To change servings".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        f!("recipes show {} --servings <number>", recipe.id).cyan()
    ));
    result.push_str(&f!("\n{}:\n", "To bookmark".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        f!("recipes bookmarks add {}", recipe.id).cyan()
    ));

    result.push('\n');
    result
}
