use std::path::PathBuf;

use crate::prelude::*;
use recipes_core::search::DEFAULT_RESULTS_PER_PAGE;

/// Recipe API configuration from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Needed for uploads and for reading your own recipes
    pub api_key: Option<String>,
    pub results_per_page: usize,
    /// Where bookmarks and the shopping list are stored
    pub data_dir: PathBuf,
}

impl ApiConfig {
    /// Default forkify v2 endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://forkify-api.herokuapp.com/api/v2/recipes";

    /// Load configuration from environment variables
    ///
    /// Uses RECIPES_API_URL with default fallback
    /// Uses RECIPES_API_KEY if set
    /// Uses RECIPES_PER_PAGE with default fallback
    /// Uses RECIPES_DATA_DIR, otherwise the platform data directory
    pub fn from_env() -> Result<Self, Error> {
        let results_per_page = match std::env::var("RECIPES_PER_PAGE") {
            Ok(raw) => parse_results_per_page(&raw)?,
            Err(_) => DEFAULT_RESULTS_PER_PAGE,
        };

        let data_dir = match std::env::var("RECIPES_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir()?,
        };

        Ok(Self {
            base_url: std::env::var("RECIPES_API_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("RECIPES_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            results_per_page,
            data_dir,
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        api_key: Option<String>,
        results_per_page: Option<usize>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, Error> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        if let Some(per_page) = results_per_page {
            if per_page == 0 {
                return Err(Error::Config(
                    "Results per page must be at least 1".to_string(),
                ));
            }
            self.results_per_page = per_page;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        Ok(self)
    }
}

fn parse_results_per_page(raw: &str) -> Result<usize, Error> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Config(f!(
            "RECIPES_PER_PAGE must be a positive integer, got '{raw}'"
        ))),
    }
}

fn default_data_dir() -> Result<PathBuf, Error> {
    dirs_next::data_dir()
        .map(|dir| dir.join("recipes"))
        .ok_or_else(|| Error::Config("Unable to determine data directory".to_string()))
}
