//! Application state
//!
//! [`AppState`] is owned by whoever drives the application and passed to the
//! parts that need it. Mutations here are pure; persisting the bookmarks and
//! the shopping list after a mutation is a separate, explicit step.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::recipe::{Recipe, RecipeSummary};
use crate::search::SearchState;
use crate::storage::{KeyValueStore, BOOKMARKS_KEY, SHOPPING_KEY};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Recipe currently on display
    pub recipe: Option<Recipe>,
    pub search: SearchState,
    pub bookmarks: Vec<Recipe>,
    /// Shopping list, unique by recipe id
    pub shop: Vec<Recipe>,
}

impl AppState {
    pub fn new(results_per_page: usize) -> Self {
        Self {
            search: SearchState::new(results_per_page),
            ..Default::default()
        }
    }

    /// Build a state with bookmarks and shopping list restored from `store`
    ///
    /// A missing key means an empty collection.
    pub fn load(results_per_page: usize, store: &impl KeyValueStore) -> Result<Self> {
        let mut state = Self::new(results_per_page);
        state.bookmarks = load_collection(store, BOOKMARKS_KEY)?;
        state.shop = load_collection(store, SHOPPING_KEY)?;
        Ok(state)
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|bookmark| bookmark.id == id)
    }

    /// Make `recipe` the current recipe, flagging it if it is bookmarked
    pub fn set_recipe(&mut self, mut recipe: Recipe) {
        recipe.bookmarked = self.is_bookmarked(&recipe.id);
        self.recipe = Some(recipe);
    }

    /// Record a new query and its results, back on page 1
    pub fn set_search_results(&mut self, query: &str, results: Vec<RecipeSummary>) {
        self.search.query = query.to_string();
        self.search.set_results(results);
    }

    /// Rescale the current recipe to `new_servings`
    pub fn update_servings(&mut self, new_servings: u32) -> Result<()> {
        let recipe = self.recipe.as_mut().ok_or(Error::NoRecipe)?;
        recipe.update_servings(new_servings);
        Ok(())
    }

    /// Append `recipe` to the bookmarks
    ///
    /// No duplicate check is made. When `recipe` is the current recipe both
    /// copies are flagged as bookmarked.
    pub fn add_bookmark(&mut self, mut recipe: Recipe) {
        if self.recipe.as_ref().is_some_and(|current| current.id == recipe.id) {
            recipe.bookmarked = true;
        }
        self.set_current_bookmarked(&recipe.id, true);
        self.bookmarks.push(recipe);
    }

    /// Remove the first bookmark with `id`, if any
    pub fn delete_bookmark(&mut self, id: &str) {
        if let Some(index) = self.bookmarks.iter().position(|bookmark| bookmark.id == id) {
            self.bookmarks.remove(index);
        }

        self.set_current_bookmarked(id, false);
    }

    /// Add `recipe` to the shopping list unless one with the same id is there
    ///
    /// Returns whether the recipe was inserted.
    pub fn add_to_shop(&mut self, recipe: Recipe) -> bool {
        if self.shop.iter().any(|item| item.id == recipe.id) {
            return false;
        }

        self.shop.push(recipe);
        true
    }

    /// Remove every shopping list entry with `id`
    pub fn delete_shop_item(&mut self, id: &str) {
        self.shop.retain(|item| item.id != id);
    }

    pub fn persist_bookmarks(&self, store: &mut impl KeyValueStore) -> Result<()> {
        save_collection(store, BOOKMARKS_KEY, &self.bookmarks)
    }

    pub fn persist_shop(&self, store: &mut impl KeyValueStore) -> Result<()> {
        save_collection(store, SHOPPING_KEY, &self.shop)
    }

    fn set_current_bookmarked(&mut self, id: &str, bookmarked: bool) {
        if let Some(current) = self.recipe.as_mut().filter(|current| current.id == id) {
            current.bookmarked = bookmarked;
        }
    }
}

fn load_collection<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Vec<T>> {
    match store.get(key)? {
        Some(raw) if !raw.is_empty() => serde_json::from_str(&raw).map_err(|e| Error::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        }),
        _ => Ok(Vec::new()),
    }
}

fn save_collection<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<()> {
    let raw = serde_json::to_string(items).map_err(|e| Error::Storage(e.to_string()))?;
    store.set(key, &raw)
}
