use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::fmt;

use crate::catalog::records::RecipeRecord;

/// Environment variable naming an optional bearer token for the catalog.
const CATALOG_API_KEY_ENV_VAR: &str = "CATALOG_API_KEY";

#[derive(Debug)]
pub enum CatalogFetchError {
    MissingEndpoint(String),
    NetworkError(reqwest::Error),
    DecodeError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl fmt::Display for CatalogFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogFetchError::MissingEndpoint(var_name) => {
                write!(f, "Catalog endpoint not found in environment: {}", var_name)
            }
            CatalogFetchError::NetworkError(err) => write!(f, "Network error: {}", err),
            CatalogFetchError::DecodeError(err) => write!(f, "Corpus decode error: {}", err),
            CatalogFetchError::ApiError { status, error_body } => {
                write!(f, "Catalog API error {}: {}", status, error_body)
            }
        }
    }
}

impl Error for CatalogFetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CatalogFetchError::NetworkError(err) => Some(err),
            CatalogFetchError::DecodeError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogFetchError {
    fn from(err: reqwest::Error) -> Self {
        CatalogFetchError::NetworkError(err)
    }
}

impl From<serde_json::Error> for CatalogFetchError {
    fn from(err: serde_json::Error) -> Self {
        CatalogFetchError::DecodeError(err)
    }
}

/// Remote recipe catalog reached over HTTP. The base URL comes from an
/// environment variable so deployments can point at different catalogs
/// without a rebuild.
pub struct CatalogEndpoint {
    base_url_env_var: String,
}

impl CatalogEndpoint {
    pub fn from_env(base_url_env_var: &str) -> Self {
        dotenv().ok();
        Self {
            base_url_env_var: base_url_env_var.to_string(),
        }
    }

    /// Fetches the full recipe corpus as a JSON array of `RecipeRecord`.
    /// The endpoint is expected to serve only publicly visible, complete
    /// records; this crate does no visibility filtering of its own.
    pub async fn fetch_recipe_corpus(&self) -> Result<Vec<RecipeRecord>, CatalogFetchError> {
        dotenv().ok();
        let base_url = env::var(&self.base_url_env_var)
            .map_err(|_| CatalogFetchError::MissingEndpoint(self.base_url_env_var.clone()))?;

        let client = Client::new();
        let url = format!("{}/recipes", base_url.trim_end_matches('/'));

        let mut request = client.get(&url).header("Accept", "application/json");
        if let Ok(api_key) = env::var(CATALOG_API_KEY_ENV_VAR) {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;

        if response.status().is_success() {
            let body = response.text().await?;
            let corpus: Vec<RecipeRecord> = serde_json::from_str(&body)?;
            Ok(corpus)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(CatalogFetchError::ApiError { status, error_body })
        }
    }
}
