use super::*;
use serde::de::DeserializeOwned;

/// Default public clue API
pub const DEFAULT_API_URL: &str = "https://rithm-jeopardy.herokuapp.com/api/";

/// HTTP client for the clue API (`/categories` and `/category`)
pub struct HttpCatalog {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpCatalog {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(CatalogError::Config("API base URL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            base_url,
            client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> CatalogResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = tokio::time::timeout(
            self.timeout,
            self.client.get(&url).query(query).send(),
        )
        .await
        .map_err(|_| CatalogError::Timeout(self.timeout))?
        .map_err(|e| CatalogError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    async fn list_categories(&self, max_count: usize) -> CatalogResult<Vec<Category>> {
        self.get_json("categories", &[("count", max_count.to_string())])
            .await
    }

    async fn get_category(&self, id: CategoryId) -> CatalogResult<CategoryDetail> {
        self.get_json("category", &[("id", id.to_string())]).await
    }
}
