use crate::prelude::{println, *};
use recipes_core::upload::{NewRecipeForm, INGREDIENT_PREFIX};

#[derive(Debug, clap::Args, Clone)]
pub struct UploadOptions {
    /// Recipe title
    #[arg(long)]
    pub title: String,

    /// URL of the full directions
    #[arg(long)]
    pub source_url: String,

    /// URL of the recipe picture
    #[arg(long)]
    pub image: String,

    /// Who published the recipe
    #[arg(long)]
    pub publisher: String,

    /// Preparation time in minutes
    #[arg(long)]
    pub cooking_time: String,

    /// Number of servings
    #[arg(long)]
    pub servings: String,

    /// Ingredient as "quantity,unit,description" (quantity and unit may be empty). Repeatable.
    #[arg(short, long = "ingredient", value_name = "INGREDIENT")]
    pub ingredients: Vec<String>,

    /// Output the created recipe as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: UploadOptions, global: crate::Global) -> Result<()> {
    let config = global.config()?;

    if config.api_key.is_none() {
        return Err(Error::Config(
            "An API key is required to upload recipes. Set RECIPES_API_KEY or pass --api-key"
                .to_string(),
        )
        .into());
    }

    let mut store = crate::store::open(&config)?;
    let form = build_form(&options);

    store.upload_recipe(&form).await?;

    let recipe = store
        .state()
        .recipe
        .as_ref()
        .ok_or_else(|| eyre!("Uploaded recipe was not returned"))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
    } else {
        println!("Uploaded and bookmarked {} ({})", recipe.title, recipe.id);
        println!("  recipes show {}", recipe.id);
    }

    Ok(())
}

/// Form fields in the order the upload form lists them
fn build_form(options: &UploadOptions) -> NewRecipeForm {
    let form = NewRecipeForm::new()
        .with("title", options.title.as_str())
        .with("sourceUrl", options.source_url.as_str())
        .with("image", options.image.as_str())
        .with("publisher", options.publisher.as_str())
        .with("cookingTime", options.cooking_time.as_str())
        .with("servings", options.servings.as_str());

    options
        .ingredients
        .iter()
        .enumerate()
        .fold(form, |form, (i, ingredient)| {
            form.with(f!("{}-{}", INGREDIENT_PREFIX, i + 1), ingredient.as_str())
        })
}
