//! Remote API configuration

use thiserror::Error;

/// Base URL of the inventory REST API used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://6712a5e16c5f5ced662443cb.mockapi.io/api/v2";

/// Where the remote store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Configuration baked in at build time.
    ///
    /// A browser bundle has no process environment, so `INVENTORY_API_URL`
    /// is read when the crate is compiled.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        let builder = Self::builder();
        match option_env!("INVENTORY_API_URL") {
            Some(url) => builder.base_url(url).build(),
            None => builder.build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the API root
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Builder for ApiConfig
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
}

impl ApiConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ConfigError::MissingValue("base_url"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }
        Ok(ApiConfig {
            base_url: url.to_string(),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
