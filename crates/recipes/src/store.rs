//! Application state store
//!
//! [`Store`] owns the [`AppState`] together with the two collaborators it
//! needs: the remote API and the key-value storage. Every mutation of the
//! bookmarks or the shopping list is written to storage before the method
//! returns. Network and storage errors are handed back unchanged.

use recipes_core::recipe::{recipe_from_response, summaries_from_response, Recipe, RecipeSummary};
use recipes_core::state::AppState;
use recipes_core::storage::{FileStore, KeyValueStore, BOOKMARKS_KEY, SHOPPING_KEY};
use recipes_core::upload::{build_upload_payload, NewRecipeForm};

use crate::api::{Endpoints, HttpRecipeApi, RecipeApi};
use crate::config::ApiConfig;
use crate::prelude::*;

pub struct Store<A, S> {
    api: A,
    storage: S,
    endpoints: Endpoints,
    state: AppState,
}

/// Store wired to the HTTP API and the on-disk storage described by `config`
pub fn open(config: &ApiConfig) -> Result<Store<HttpRecipeApi, FileStore>, Error> {
    let endpoints = Endpoints::new(config.base_url.clone(), config.api_key.clone());
    let storage = FileStore::new(config.data_dir.clone());

    Store::open(
        HttpRecipeApi::new()?,
        storage,
        endpoints,
        config.results_per_page,
    )
}

/// Remove the stored collections described by `config` without reading them
///
/// Works on unreadable data, where [`open`] fails.
pub fn clear(config: &ApiConfig) -> Result<(), Error> {
    let mut storage = FileStore::new(config.data_dir.clone());
    clear_collections(&mut storage)
}

fn clear_collections(storage: &mut impl KeyValueStore) -> Result<(), Error> {
    storage.clear(BOOKMARKS_KEY)?;
    storage.clear(SHOPPING_KEY)?;
    Ok(())
}

impl<A: RecipeApi, S: KeyValueStore> Store<A, S> {
    /// Create the store, restoring bookmarks and the shopping list from `storage`
    pub fn open(
        api: A,
        storage: S,
        endpoints: Endpoints,
        results_per_page: usize,
    ) -> Result<Self, Error> {
        let state = AppState::load(results_per_page, &storage)?;

        log::debug!(
            "restored {} bookmarks and {} shopping items",
            state.bookmarks.len(),
            state.shop.len()
        );

        Ok(Self {
            api,
            storage,
            endpoints,
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Fetch recipe `id` and make it the current recipe
    pub async fn load_recipe(&mut self, id: &str) -> Result<(), Error> {
        let body = self.api.fetch(&self.endpoints.recipe(id), None).await?;
        let recipe = recipe_from_response(body)?;

        log::info!("loaded recipe {} ({})", recipe.id, recipe.title);

        self.state.set_recipe(recipe);
        Ok(())
    }

    /// Search for `query`, replacing the results and going back to page 1
    ///
    /// The query is recorded even if the search fails.
    pub async fn load_search_results(&mut self, query: &str) -> Result<(), Error> {
        self.state.search.query = query.to_string();

        let body = self.api.fetch(&self.endpoints.search(query), None).await?;
        let results = summaries_from_response(body)?;

        log::info!("search '{}' returned {} results", query, results.len());

        self.state.set_search_results(query, results);
        Ok(())
    }

    /// Select `page` (default: the current page) and return its results
    pub fn get_search_results_page(&mut self, page: Option<usize>) -> &[RecipeSummary] {
        self.state.search.results_page(page)
    }

    /// Rescale the current recipe's ingredients to `new_servings`
    pub fn update_servings(&mut self, new_servings: u32) -> Result<(), Error> {
        self.state.update_servings(new_servings)?;
        Ok(())
    }

    pub fn add_bookmark(&mut self, recipe: Recipe) -> Result<(), Error> {
        self.state.add_bookmark(recipe);
        self.persist_bookmarks()
    }

    pub fn delete_bookmark(&mut self, id: &str) -> Result<(), Error> {
        self.state.delete_bookmark(id);
        self.persist_bookmarks()
    }

    /// Add `recipe` to the shopping list unless it is already there
    ///
    /// Storage is written either way.
    pub fn add_to_shopping_cart(&mut self, recipe: Recipe) -> Result<(), Error> {
        if !self.state.add_to_shop(recipe) {
            log::debug!("recipe already in the shopping list");
        }
        self.persist_shop()
    }

    pub fn delete_shopping_item(&mut self, id: &str) -> Result<(), Error> {
        self.state.delete_shop_item(id);
        self.persist_shop()
    }

    /// Create a recipe from `form`, make it current and bookmark it
    ///
    /// The form is validated before anything is sent.
    pub async fn upload_recipe(&mut self, form: &NewRecipeForm) -> Result<(), Error> {
        let payload = build_upload_payload(form)?;
        let body = serde_json::to_value(&payload)
            .map_err(|e| Error::Format(f!("Failed to encode recipe: {e}")))?;

        let response = self.api.fetch(&self.endpoints.upload(), Some(&body)).await?;
        let recipe = recipe_from_response(response)?;

        log::info!("uploaded recipe {} ({})", recipe.id, recipe.title);

        self.state.set_recipe(recipe.clone());
        self.add_bookmark(recipe)
    }

    /// Remove the stored bookmarks and shopping list
    ///
    /// The in-memory collections are left as they are.
    pub fn clear_data(&mut self) -> Result<(), Error> {
        clear_collections(&mut self.storage)
    }

    fn persist_bookmarks(&mut self) -> Result<(), Error> {
        self.state.persist_bookmarks(&mut self.storage)?;
        Ok(())
    }

    fn persist_shop(&mut self) -> Result<(), Error> {
        self.state.persist_shop(&mut self.storage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipes_core::storage::MemoryStore;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays canned responses and records every request
    #[derive(Default)]
    struct FakeApi {
        responses: RefCell<VecDeque<Result<Value, Error>>>,
        requests: RefCell<Vec<(String, Option<Value>)>>,
    }

    impl FakeApi {
        fn with(responses: Vec<Result<Value, Error>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                requests: RefCell::default(),
            }
        }
    }

    impl RecipeApi for FakeApi {
        async fn fetch(&self, url: &str, body: Option<&Value>) -> Result<Value, Error> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), body.cloned()));
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Network("no response queued".to_string())))
        }
    }

    fn recipe_body(id: &str, servings: u32) -> Value {
        json!({
            "status": "success",
            "data": {
                "recipe": {
                    "id": id,
                    "title": format!("Recipe {id}"),
                    "image_url": "http://img/r.jpg",
                    "source_url": "http://src/r",
                    "publisher": "Test Kitchen",
                    "servings": servings,
                    "cooking_time": 30,
                    "ingredients": [
                        { "quantity": 2, "unit": "cups", "description": "flour" },
                        { "quantity": null, "unit": "", "description": "salt" }
                    ]
                }
            }
        })
    }

    fn search_body(n: usize) -> Value {
        let recipes: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "id": i.to_string(),
                    "title": format!("Pizza {i}"),
                    "image_url": "http://img/p.jpg",
                    "publisher": "Pizzeria"
                })
            })
            .collect();
        json!({ "status": "success", "results": n, "data": { "recipes": recipes } })
    }

    fn store(responses: Vec<Result<Value, Error>>) -> Store<FakeApi, MemoryStore> {
        Store::open(
            FakeApi::with(responses),
            MemoryStore::new(),
            Endpoints::new("https://api.test/recipes", Some("k".to_string())),
            10,
        )
        .unwrap()
    }

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {id}"),
            servings: 4,
            ..Default::default()
        }
    }

    fn stored(store: &Store<FakeApi, MemoryStore>, key: &str) -> Vec<Recipe> {
        let raw = store.storage.get(key).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_load_recipe() {
        let mut store = store(vec![Ok(recipe_body("abc", 4))]);

        store.load_recipe("abc").await.unwrap();

        let current = store.state().recipe.as_ref().unwrap();
        assert_eq!(current.id, "abc");
        assert_eq!(current.image, "http://img/r.jpg");
        assert!(!current.bookmarked);
        assert_eq!(
            store.api.requests.borrow()[0],
            ("https://api.test/recipes/abc?key=k".to_string(), None)
        );
    }

    #[tokio::test]
    async fn test_load_recipe_marks_bookmarked() {
        let mut store = store(vec![Ok(recipe_body("abc", 4))]);
        store.add_bookmark(recipe("abc")).unwrap();

        store.load_recipe("abc").await.unwrap();

        assert!(store.state().recipe.as_ref().unwrap().bookmarked);
    }

    #[tokio::test]
    async fn test_load_recipe_propagates_error() {
        let error = Error::Network("Invalid _id: nope (400)".to_string());
        let mut store = store(vec![Err(error.clone())]);

        let result = store.load_recipe("nope").await;

        assert_eq!(result, Err(error));
        assert_eq!(store.state().recipe, None);
    }

    #[tokio::test]
    async fn test_load_search_results() {
        let mut store = store(vec![Ok(search_body(25))]);
        store.get_search_results_page(Some(3));

        store.load_search_results("pizza").await.unwrap();

        let search = &store.state().search;
        assert_eq!(search.query, "pizza");
        assert_eq!(search.results.len(), 25);
        assert_eq!(search.page, 1);
        assert_eq!(
            store.api.requests.borrow()[0].0,
            "https://api.test/recipes?search=pizza&key=k"
        );
    }

    #[tokio::test]
    async fn test_load_search_results_records_query_on_failure() {
        let mut store = store(vec![Err(Error::Network("offline".to_string()))]);

        let result = store.load_search_results("soup").await;

        assert!(matches!(result, Err(Error::Network(_))));
        assert_eq!(store.state().search.query, "soup");
        assert!(store.state().search.results.is_empty());
    }

    #[tokio::test]
    async fn test_get_search_results_page() {
        let mut store = store(vec![Ok(search_body(25))]);
        store.load_search_results("pizza").await.unwrap();

        assert_eq!(store.get_search_results_page(None).len(), 10);

        let third = store.get_search_results_page(Some(3));
        assert_eq!(third.len(), 5);
        assert_eq!(third[0].id, "20");
        assert_eq!(store.state().search.page, 3);

        assert!(store.get_search_results_page(Some(4)).is_empty());
    }

    #[tokio::test]
    async fn test_update_servings_round_trip() {
        let mut store = store(vec![Ok(recipe_body("abc", 4))]);
        store.load_recipe("abc").await.unwrap();

        store.update_servings(6).unwrap();
        let current = store.state().recipe.as_ref().unwrap();
        assert_eq!(current.servings, 6);
        assert_eq!(current.ingredients[0].quantity, Some(3.0));
        assert_eq!(current.ingredients[1].quantity, None);

        store.update_servings(4).unwrap();
        let q = store.state().recipe.as_ref().unwrap().ingredients[0]
            .quantity
            .unwrap();
        assert!((q - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_servings_without_recipe() {
        let mut store = store(vec![]);
        assert_eq!(store.update_servings(2), Err(Error::NoRecipe));
    }

    #[test]
    fn test_bookmarks_are_persisted() {
        let mut store = store(vec![]);

        store.add_bookmark(recipe("a")).unwrap();
        store.add_bookmark(recipe("b")).unwrap();
        assert_eq!(stored(&store, BOOKMARKS_KEY).len(), 2);

        store.delete_bookmark("a").unwrap();
        let bookmarks = stored(&store, BOOKMARKS_KEY);
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].id, "b");
    }

    #[test]
    fn test_delete_missing_bookmark_still_persists() {
        let mut store = store(vec![]);

        store.delete_bookmark("missing").unwrap();

        assert!(stored(&store, BOOKMARKS_KEY).is_empty());
    }

    #[test]
    fn test_add_to_shopping_cart_twice() {
        let mut store = store(vec![]);

        store.add_to_shopping_cart(recipe("a")).unwrap();
        store.add_to_shopping_cart(recipe("a")).unwrap();

        assert_eq!(store.state().shop.len(), 1);
        assert_eq!(stored(&store, SHOPPING_KEY).len(), 1);
    }

    #[test]
    fn test_add_to_shopping_cart_duplicate_still_persists() {
        let mut store = store(vec![]);
        store.add_to_shopping_cart(recipe("a")).unwrap();
        store.storage.clear(SHOPPING_KEY).unwrap();

        store.add_to_shopping_cart(recipe("a")).unwrap();

        let shop = stored(&store, SHOPPING_KEY);
        assert_eq!(shop.len(), 1);
        assert_eq!(shop[0].id, "a");
    }

    #[test]
    fn test_delete_shopping_item() {
        let mut store = store(vec![]);
        store.add_to_shopping_cart(recipe("a")).unwrap();
        store.add_to_shopping_cart(recipe("b")).unwrap();

        store.delete_shopping_item("a").unwrap();

        let shop = stored(&store, SHOPPING_KEY);
        assert_eq!(shop.len(), 1);
        assert_eq!(shop[0].id, "b");
    }

    #[test]
    fn test_open_restores_collections() {
        let mut storage = MemoryStore::new();
        let saved = serde_json::to_string(&vec![recipe("a"), recipe("b")]).unwrap();
        storage.set(BOOKMARKS_KEY, &saved).unwrap();

        let store = Store::open(
            FakeApi::default(),
            storage,
            Endpoints::new("https://api.test/recipes", None),
            10,
        )
        .unwrap();

        assert_eq!(store.state().bookmarks.len(), 2);
        assert!(store.state().shop.is_empty());
    }

    #[tokio::test]
    async fn test_upload_recipe() {
        let mut store = store(vec![Ok(json!({
            "status": "success",
            "data": {
                "recipe": {
                    "id": "new-id",
                    "title": "Pancakes",
                    "servings": 4,
                    "cooking_time": 20,
                    "key": "k",
                    "ingredients": [
                        { "quantity": 200, "unit": "g", "description": "flour" }
                    ]
                }
            }
        }))]);

        let form = NewRecipeForm::new()
            .with("title", "Pancakes")
            .with("sourceUrl", "https://example.com")
            .with("image", "https://example.com/p.jpg")
            .with("publisher", "Me")
            .with("cookingTime", "20")
            .with("servings", "4")
            .with("ingredient-1", "200,g,flour");

        store.upload_recipe(&form).await.unwrap();

        let current = store.state().recipe.as_ref().unwrap();
        assert_eq!(current.id, "new-id");
        assert_eq!(current.key.as_deref(), Some("k"));
        assert!(current.bookmarked);
        assert!(store.state().is_bookmarked("new-id"));
        assert_eq!(stored(&store, BOOKMARKS_KEY)[0].id, "new-id");
        assert!(stored(&store, BOOKMARKS_KEY)[0].bookmarked);

        let requests = store.api.requests.borrow();
        let (url, body) = &requests[0];
        assert_eq!(url, "https://api.test/recipes?key=k");
        let body = body.as_ref().unwrap();
        assert_eq!(body["title"], "Pancakes");
        assert_eq!(body["cooking_time"], 20);
        assert_eq!(body["ingredients"][0]["unit"], "g");
    }

    #[tokio::test]
    async fn test_upload_recipe_bad_ingredient_sends_nothing() {
        let mut store = store(vec![]);
        let form = NewRecipeForm::new()
            .with("title", "Broken")
            .with("cookingTime", "10")
            .with("servings", "2")
            .with("ingredient-1", "200,g");

        let result = store.upload_recipe(&form).await;

        assert!(matches!(result, Err(Error::Format(_))));
        assert!(store.api.requests.borrow().is_empty());
        assert!(store.state().bookmarks.is_empty());
    }

    #[test]
    fn test_clear_data() {
        let mut store = store(vec![]);
        store.add_bookmark(recipe("a")).unwrap();
        store.add_to_shopping_cart(recipe("b")).unwrap();

        store.clear_data().unwrap();

        assert_eq!(store.storage.get(BOOKMARKS_KEY).unwrap(), None);
        assert_eq!(store.storage.get(SHOPPING_KEY).unwrap(), None);
    }

    fn file_config(dir: &std::path::Path) -> ApiConfig {
        ApiConfig {
            base_url: "https://api.test/recipes".to_string(),
            api_key: None,
            results_per_page: 10,
            data_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_clear_recovers_unreadable_data() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = file_config(temp_dir.path());
        std::fs::write(temp_dir.path().join("bookmarks.json"), r#"[{"id":"a","ti"#).unwrap();

        assert!(matches!(open(&config), Err(Error::Storage(_))));

        clear(&config).unwrap();

        assert!(!temp_dir.path().join("bookmarks.json").exists());
        let store = open(&config).unwrap();
        assert!(store.state().bookmarks.is_empty());
    }
}
