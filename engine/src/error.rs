use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;

/// Rejections that happen before any network activity.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("A poster is already being generated")]
    Busy,

    #[error("Please enter a movie title")]
    EmptyTitle,

    #[error("Please select an art style")]
    MissingStyle,

    #[error("Please enter your OpenAI API key first")]
    MissingCredential,
}

/// Any failure of the call to the image API. Sources are shared so the error
/// can be cloned into UI messages.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    #[error("Network error: {0}")]
    Network(#[source] Arc<reqwest::Error>),

    #[error("Image API error ({status}): {message}")]
    Status { status: StatusCode, message: String },

    #[error("Malformed response: {0}")]
    Malformed(#[source] Arc<serde_json::Error>),

    #[error("The image API returned no images")]
    NoImages,

    #[error("The first returned image has no URL")]
    MissingUrl,
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(Arc::new(e))
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(Arc::new(e))
    }
}
