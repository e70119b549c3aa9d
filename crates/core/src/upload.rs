//! New recipe form parsing
//!
//! Turns the free-form fields of the "add recipe" form into the payload the
//! API accepts. Parsing happens before any request is made, so a malformed
//! ingredient never reaches the network.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::recipe::Ingredient;

/// Form fields whose name starts with this prefix are ingredient lines
pub const INGREDIENT_PREFIX: &str = "ingredient";

const INGREDIENT_FORMAT_ERROR: &str =
    "Wrong ingredient format. Please use the format 'quantity,unit,description'";

/// Raw "add recipe" form, as an ordered list of named fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecipeForm {
    fields: Vec<(String, String)>,
}

impl NewRecipeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, keeping insertion order
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Value of the first field called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Non-empty ingredient field values, in form order
    pub fn ingredient_values(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(name, value)| name.starts_with(INGREDIENT_PREFIX) && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }
}

/// Body sent to the API when creating a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadPayload {
    pub title: String,
    pub image_url: String,
    pub source_url: String,
    pub publisher: String,
    pub servings: u32,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
}

/// Parse one `quantity,unit,description` ingredient line
///
/// Each part is trimmed. An empty quantity means "no quantity".
pub fn parse_ingredient(value: &str) -> Result<Ingredient> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();

    let [quantity, unit, description] = parts.as_slice() else {
        return Err(Error::Format(INGREDIENT_FORMAT_ERROR.to_string()));
    };

    let quantity = if quantity.is_empty() {
        None
    } else {
        Some(
            quantity
                .parse::<f64>()
                .map_err(|_| Error::Format(format!("Invalid ingredient quantity: {quantity}")))?,
        )
    };

    Ok(Ingredient {
        quantity,
        unit: unit.to_string(),
        description: description.to_string(),
    })
}

/// Parse every ingredient line of the form
pub fn parse_ingredients(form: &NewRecipeForm) -> Result<Vec<Ingredient>> {
    form.ingredient_values().map(parse_ingredient).collect()
}

fn parse_count(form: &NewRecipeForm, name: &str) -> Result<u32> {
    let raw = form.get(name).unwrap_or_default().trim();
    raw.parse::<u32>()
        .map_err(|_| Error::Format(format!("Invalid {name}: '{raw}'")))
}

/// Build the upload payload from a form
pub fn build_upload_payload(form: &NewRecipeForm) -> Result<UploadPayload> {
    let ingredients = parse_ingredients(form)?;
    let field = |name: &str| form.get(name).unwrap_or_default().to_string();

    Ok(UploadPayload {
        title: field("title"),
        image_url: field("image"),
        source_url: field("sourceUrl"),
        publisher: field("publisher"),
        servings: parse_count(form, "servings")?,
        cooking_time: parse_count(form, "cookingTime")?,
        ingredients,
    })
}
