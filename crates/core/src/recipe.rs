use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A single ingredient line
///
/// `quantity` is `None` for lines like "salt to taste". It is never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
}

/// Full recipe as held in the application state
///
/// Serialized with the camelCase field names used by the stored bookmarks
/// and shopping list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub cooking_time: u32,
    #[serde(default)]
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub bookmarked: bool,
}

impl Recipe {
    /// Rescale every ingredient to `new_servings` and store the new count
    ///
    /// Quantities are multiplied by `new_servings / servings`. Missing
    /// quantities stay missing. Scaling from zero servings only updates the
    /// count.
    pub fn update_servings(&mut self, new_servings: u32) {
        if self.servings == 0 {
            self.servings = new_servings;
            return;
        }

        let old = f64::from(self.servings);
        let new = f64::from(new_servings);

        for ingredient in &mut self.ingredients {
            ingredient.quantity = ingredient.quantity.map(|q| q * new / old);
        }

        self.servings = new_servings;
    }

    /// Summary view of this recipe, as listed in search results
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            image: self.image.clone(),
            publisher: self.publisher.clone(),
            key: self.key.clone(),
        }
    }
}

/// Search result entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub image: String,
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Recipe as returned by the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiRecipe {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub cooking_time: u32,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub key: Option<String>,
}

/// Search result entry as returned by the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiRecipeSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecipeEnvelope {
    data: RecipeData,
}

#[derive(Debug, Deserialize)]
struct RecipeData {
    recipe: ApiRecipe,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    data: SearchData,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(default)]
    recipes: Vec<ApiRecipeSummary>,
}

/// Convert an API recipe into the state representation
///
/// An empty ownership key is dropped. The bookmarked flag starts cleared.
pub fn transform_recipe(recipe: ApiRecipe) -> Recipe {
    Recipe {
        id: recipe.id,
        title: recipe.title,
        image: recipe.image_url,
        ingredients: recipe.ingredients,
        publisher: recipe.publisher,
        servings: recipe.servings,
        cooking_time: recipe.cooking_time,
        source_url: recipe.source_url,
        key: recipe.key.filter(|k| !k.is_empty()),
        bookmarked: false,
    }
}

/// Convert API search entries into summaries, keeping their order
pub fn transform_summaries(recipes: Vec<ApiRecipeSummary>) -> Vec<RecipeSummary> {
    recipes
        .into_iter()
        .map(|recipe| RecipeSummary {
            id: recipe.id,
            title: recipe.title,
            image: recipe.image_url,
            publisher: recipe.publisher,
            key: recipe.key.filter(|k| !k.is_empty()),
        })
        .collect()
}

/// Extract the recipe from a `{ data: { recipe } }` response body
pub fn recipe_from_response(body: Value) -> Result<Recipe> {
    let envelope: RecipeEnvelope =
        serde_json::from_value(body).map_err(|e| Error::Response(e.to_string()))?;
    Ok(transform_recipe(envelope.data.recipe))
}

/// Extract the search results from a `{ data: { recipes } }` response body
pub fn summaries_from_response(body: Value) -> Result<Vec<RecipeSummary>> {
    let envelope: SearchEnvelope =
        serde_json::from_value(body).map_err(|e| Error::Response(e.to_string()))?;
    Ok(transform_summaries(envelope.data.recipes))
}
