use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a catalog request.
///
/// Controllers never match on the variant; they keep only the rendered
/// message, so every variant must read well on its own.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{context}: {}", .status.as_u16())]
    Status {
        context: &'static str,
        status: StatusCode,
    },

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
