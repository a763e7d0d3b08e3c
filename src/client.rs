use log::{debug, info};
use reqwest::Client;
use url::Url;

use crate::endpoint::{Endpoint, NutritionDetailsEndpoint, RecipeSearchEndpoint};
use crate::model::{NutritionAnalysis, RecipeSubmission, RecipeSummary, SearchQuery};
use crate::FinderError;

/// Application id and key sent as query parameters on every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
        }
    }

    /// Pair up optional halves; both or neither must be present
    pub fn from_parts(
        app_id: Option<String>,
        app_key: Option<String>,
    ) -> Result<Option<Self>, FinderError> {
        match (app_id, app_key) {
            (Some(id), Some(key)) => Ok(Some(Credentials::new(id, key))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(FinderError::MissingCredentials(
                "app_id is set but app_key is missing".to_string(),
            )),
            (None, Some(_)) => Err(FinderError::MissingCredentials(
                "app_key is set but app_id is missing".to_string(),
            )),
        }
    }
}

// Keep the key out of debug logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"***")
            .finish()
    }
}

/// HTTP client for the Edamam recipe search and nutrition analysis API
#[derive(Debug, Clone)]
pub struct EdamamClient {
    client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl EdamamClient {
    /// Create a client; without credentials `base_url` is expected to be a proxy that adds them
    pub fn new(
        client: Client,
        base_url: Url,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            client,
            base_url,
            credentials,
        }
    }

    /// Create a client from configuration
    pub fn from_config(config: &crate::config::EdamamConfig) -> Result<Self, FinderError> {
        let mut builder = crate::EdamamClientBuilder::default().base_url(&config.base_url);
        if let Some(id) = &config.app_id {
            builder = builder.app_id(id);
        }
        if let Some(key) = &config.app_key {
            builder = builder.app_key(key);
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Search recipes by keyword and optional diet filter
    pub async fn search_recipes(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        self.execute(&RecipeSearchEndpoint::new(query.clone())).await
    }

    /// Submit a recipe for nutrition analysis
    pub async fn analyze_nutrition(
        &self,
        submission: &RecipeSubmission,
    ) -> Result<NutritionAnalysis, FinderError> {
        self.execute(&NutritionDetailsEndpoint::new(submission.clone()))
            .await
    }

    /// Send one request for `endpoint` and project its decoded response
    pub async fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Output, FinderError> {
        let url = self.endpoint_url(endpoint)?;
        let method = endpoint.method();
        info!("{} {}", method, redact(&url));

        let mut request = self.client.request(method, url);
        if let Some(body) = endpoint.body()? {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        let text = response.text().await?;
        if !status.is_success() {
            debug!("Error response body: {}", text);
            return Err(FinderError::from_status(status.as_u16(), text));
        }

        debug!("API response: {}", text);
        let decoded: E::Response = serde_json::from_str(&text)?;
        Ok(E::project(decoded))
    }

    /// Full request URL: base, endpoint path, endpoint query, then credentials
    pub fn endpoint_url<E: Endpoint>(&self, endpoint: &E) -> Result<Url, FinderError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.path().trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| FinderError::BuilderError(format!("Invalid request URL: {}", e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in endpoint.query() {
                pairs.append_pair(name, &value);
            }
            if let Some(credentials) = &self.credentials {
                pairs.append_pair("app_id", &credentials.app_id);
                pairs.append_pair("app_key", &credentials.app_key);
            }
        }

        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }
}

/// URL safe to log: the app key is masked
fn redact(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "app_key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();
    if pairs.is_empty() {
        return masked.to_string();
    }
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
