//! Client configuration
//!
//! Values come from compiled-in defaults, optionally overridden by
//! environment variables (`CATALOG_BASE_URL`, `CATALOG_TIMEOUT_SECS`,
//! `CATALOG_CONNECT_TIMEOUT_SECS`).

use std::time::Duration;

/// Base URL of the production catalog
pub const DEFAULT_BASE_URL: &str = "https://meijer-maui-test-default-rtdb.firebaseio.com/";
/// Request timeout applied at the transport boundary
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Connect timeout applied at the transport boundary
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// The image origin rejects default client headers, so image requests
/// present themselves as a mobile browser.
pub const IMAGE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; Mobile) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.120 Mobile Safari/537.36";
pub const IMAGE_ACCEPT: &str = "image/webp,image/apng,image/*,*/*;q=0.8";
pub const IMAGE_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const IMAGE_REFERER: &str = "https://www.meijer.com/";

/// Headers attached to every image request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeaders {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
}

impl Default for ImageHeaders {
    fn default() -> Self {
        Self {
            user_agent: IMAGE_USER_AGENT.to_string(),
            accept: IMAGE_ACCEPT.to_string(),
            accept_language: IMAGE_ACCEPT_LANGUAGE.to_string(),
            referer: IMAGE_REFERER.to_string(),
        }
    }
}

/// Settings shared by the catalog client and the image loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Catalog root; always ends with `/` so relative paths join below it
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub image_headers: ImageHeaders,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            image_headers: ImageHeaders::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at `base_url` with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Reads overrides from the environment, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CATALOG_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::new(base_url)
            .with_timeout(Duration::from_secs(env_secs(
                "CATALOG_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )))
            .with_connect_timeout(Duration::from_secs(env_secs(
                "CATALOG_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

fn env_secs(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig::new("http://127.0.0.1:9000");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/");

        let config = ClientConfig::new("http://127.0.0.1:9000/api/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api/");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.image_headers.referer, "https://www.meijer.com/");
    }
}
