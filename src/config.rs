use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Default Edamam API host
pub const DEFAULT_BASE_URL: &str = "https://api.edamam.com";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FinderConfig {
    /// Edamam API settings
    #[serde(default)]
    pub edamam: EdamamConfig,
}

/// Connection settings for the Edamam API
#[derive(Debug, Deserialize, Clone)]
pub struct EdamamConfig {
    /// Application identifier (can also be set via EDAMAM_APP_ID)
    pub app_id: Option<String>,
    /// Application key (can also be set via EDAMAM_APP_KEY)
    pub app_key: Option<String>,
    /// Base URL for the API, or for a proxy that adds credentials itself
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; unset leaves the transport default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for EdamamConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl EdamamConfig {
    /// Fill in missing credentials from the plain EDAMAM_APP_ID / EDAMAM_APP_KEY variables
    pub fn with_env_credentials(mut self) -> Self {
        if self.app_id.is_none() {
            self.app_id = std::env::var("EDAMAM_APP_ID").ok();
        }
        if self.app_key.is_none() {
            self.app_key = std::env::var("EDAMAM_APP_KEY").ok();
        }
        self
    }
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. EDAMAM_APP_ID / EDAMAM_APP_KEY for credentials
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = load_config()?;
        config.edamam = config.edamam.with_env_credentials();
        Ok(config)
    }
}

/// Load configuration from file and environment variables
///
/// Environment variable format: RECIPE_FINDER__EDAMAM__APP_ID
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_FINDER__EDAMAM__APP_KEY
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
