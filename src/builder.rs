use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::client::{Credentials, EdamamClient};
use crate::config::DEFAULT_BASE_URL;
use crate::FinderError;

/// Builder for configuring an [`EdamamClient`]
#[derive(Debug, Default)]
pub struct EdamamClientBuilder {
    base_url: Option<String>,
    app_id: Option<String>,
    app_key: Option<String>,
    timeout: Option<Duration>,
}

impl EdamamClientBuilder {
    /// Set the API base URL
    ///
    /// Point this at a trusted proxy and leave the credentials unset to keep
    /// the app key off the machine running the client.
    ///
    /// # Example
    /// ```
    /// use recipe_finder::EdamamClientBuilder;
    ///
    /// let builder = EdamamClientBuilder::default()
    ///     .base_url("http://localhost:8080/edamam");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the application identifier
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Set the application key
    pub fn app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Set both credentials at once
    ///
    /// # Example
    /// ```
    /// use recipe_finder::EdamamClientBuilder;
    ///
    /// let client = EdamamClientBuilder::default()
    ///     .credentials("my-app-id", "my-app-key")
    ///     .build()
    ///     .unwrap();
    /// assert!(client.has_credentials());
    /// ```
    pub fn credentials(self, app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        self.app_id(app_id).app_key(app_key)
    }

    /// Set a timeout for HTTP requests
    ///
    /// Without one, requests wait as long as the transport allows.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Validate the settings and create the client
    ///
    /// # Errors
    /// Returns `FinderError` if:
    /// - the base URL does not parse or is not http(s)
    /// - only one of app id / app key was given
    /// - the HTTP client cannot be created
    pub fn build(self) -> Result<EdamamClient, FinderError> {
        let raw = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw)
            .map_err(|e| FinderError::BuilderError(format!("Invalid base URL '{}': {}", raw, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FinderError::BuilderError(format!(
                "Base URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        let credentials = Credentials::from_parts(
            self.app_id.filter(|s| !s.trim().is_empty()),
            self.app_key.filter(|s| !s.trim().is_empty()),
        )?;

        let mut client = Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client.build()?;

        Ok(EdamamClient::new(client, base_url, credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let client = EdamamClientBuilder::default().build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.edamam.com/");
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = EdamamClientBuilder::default().base_url("not a url").build();
        assert!(matches!(result, Err(FinderError::BuilderError(_))));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = EdamamClientBuilder::default()
            .base_url("ftp://example.com")
            .build();
        match result {
            Err(FinderError::BuilderError(msg)) => assert!(msg.contains("http")),
            other => panic!("Expected BuilderError, got {:?}", other),
        }
    }

    #[test]
    fn test_half_credentials_rejected() {
        let result = EdamamClientBuilder::default().app_id("only-id").build();
        assert!(matches!(result, Err(FinderError::MissingCredentials(_))));
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let client = EdamamClientBuilder::default()
            .credentials("  ", "")
            .build()
            .unwrap();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_timeout_accepted() {
        let client = EdamamClientBuilder::default()
            .credentials("id", "key")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert!(client.has_credentials());
    }
}
