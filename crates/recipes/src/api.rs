use serde_json::Value;

use crate::prelude::*;

/// Remote JSON API used by the [`Store`](crate::store::Store)
///
/// Errors are returned as they happen; callers decide what to tell the user.
#[allow(async_fn_in_trait)]
pub trait RecipeApi {
    /// GET `url`, or POST `body` to it as JSON when a body is given
    async fn fetch(&self, url: &str, body: Option<&Value>) -> Result<Value, Error>;
}

/// [`RecipeApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
    client: reqwest::Client,
}

impl HttpRecipeApi {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(f!("recipes/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(f!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl RecipeApi for HttpRecipeApi {
    async fn fetch(&self, url: &str, body: Option<&Value>) -> Result<Value, Error> {
        let request = match body {
            Some(body) => {
                log::debug!("POST {}", redact_key(url));
                self.client.post(url).json(body)
            }
            None => {
                log::debug!("GET {}", redact_key(url));
                self.client.get(url)
            }
        };

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(f!("Failed to reach the recipe API: {e}")))?;

        let status = response.status();
        let data: std::result::Result<Value, _> = response.json().await;

        if !status.is_success() {
            let message = data
                .ok()
                .and_then(|data| data.get("message").and_then(Value::as_str).map(String::from))
                .unwrap_or_else(|| "Request failed".to_string());
            return Err(Error::Network(f!("{message} ({status})")));
        }

        data.map_err(|e| Error::Validation(f!("Failed to parse API response: {e}")))
    }
}

/// URLs of the recipe API operations
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base_url: String,
    api_key: Option<String>,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// `{base}/{id}?key=...`
    pub fn recipe(&self, id: &str) -> String {
        let url = f!("{}/{}", self.base_url, urlencoding::encode(id));
        self.with_key(url, '?')
    }

    /// `{base}?search={query}&key=...`
    pub fn search(&self, query: &str) -> String {
        let url = f!("{}?search={}", self.base_url, urlencoding::encode(query));
        self.with_key(url, '&')
    }

    /// `{base}?key=...`
    pub fn upload(&self) -> String {
        self.with_key(self.base_url.clone(), '?')
    }

    fn with_key(&self, url: String, separator: char) -> String {
        match &self.api_key {
            Some(key) => f!("{url}{separator}key={}", urlencoding::encode(key)),
            None => url,
        }
    }
}

/// Hide the API key when logging a URL
fn redact_key(url: &str) -> String {
    match url.find("key=") {
        Some(index) => f!("{}key=***", &url[..index]),
        None => url.to_string(),
    }
}
