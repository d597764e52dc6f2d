//! Product image retrieval
//!
//! The image origin rejects default client headers, so every request
//! carries the browser-like header set from [`ImageHeaders`]. Failures
//! never reach the view state; they degrade to a placeholder.

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER, USER_AGENT,
};
use tracing::{debug, warn};

use crate::catalog::CatalogError;
use crate::config::{ClientConfig, ImageHeaders};

/// What the presentation layer should draw for an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageContent {
    Loaded {
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
    /// Neutral placeholder shown when the image could not be fetched
    Placeholder,
}

impl ImageContent {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageContent::Placeholder)
    }
}

pub struct ImageLoader {
    client: reqwest::Client,
}

impl ImageLoader {
    pub fn new(config: &ClientConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .default_headers(header_map(&config.image_headers)?)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches `url`, falling back to [`ImageContent::Placeholder`] on any failure.
    pub async fn load(&self, url: &str) -> ImageContent {
        match self.fetch(url).await {
            Ok(content) => content,
            Err(e) => {
                warn!("image {} unavailable: {}", url, e);
                ImageContent::Placeholder
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<ImageContent, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(CatalogError::Status {
                context: "Failed to load image",
                status,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(ImageContent::Loaded {
            content_type,
            bytes,
        })
    }
}

fn header_map(headers: &ImageHeaders) -> Result<HeaderMap, CatalogError> {
    let mut map = HeaderMap::new();
    for (name, value) in [
        (USER_AGENT, &headers.user_agent),
        (ACCEPT, &headers.accept),
        (ACCEPT_LANGUAGE, &headers.accept_language),
        (REFERER, &headers.referer),
    ] {
        let value = HeaderValue::from_str(value)
            .map_err(|e| CatalogError::InvalidHeader(format!("{}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_map_carries_browser_headers() {
        let map = header_map(&ImageHeaders::default()).unwrap();

        assert_eq!(map.get(REFERER).unwrap(), "https://www.meijer.com/");
        assert_eq!(map.get(ACCEPT_LANGUAGE).unwrap(), "en-US,en;q=0.9");
        assert!(map
            .get(USER_AGENT)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_header_map_rejects_control_characters() {
        let headers = ImageHeaders {
            referer: "https://example.com/\n".into(),
            ..ImageHeaders::default()
        };
        assert!(header_map(&headers).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades_to_placeholder() {
        let loader = ImageLoader::new(&ClientConfig::default()).unwrap();

        let content = loader.load("http://127.0.0.1:1/banana.jpg").await;

        assert!(content.is_placeholder());
    }
}
