use std::{fmt, pin::Pin};

use bytes::Bytes;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{error::RequestError, poster::Model};

pub mod openai;
pub use openai::OpenAiImages;

pub type ImgApiBox = Box<dyn ImageApi + Send + Sync>;
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RequestError>> + Send + 'a>>;

/// The secret that authorizes calls to the image API. Never printed.
pub struct Credential(SecretString);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::from(secret.into()))
    }

    pub fn is_present(&self) -> bool {
        !self.0.expose_secret().trim().is_empty()
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

pub struct GenerationRequest {
    pub credential: Credential,
    pub model: Model,
    pub prompt: String,
}

/// One entry of the image list returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl ImageDescriptor {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            revised_prompt: None,
        }
    }
}

pub trait ImageApi {
    /// Issues exactly one generation call.
    fn generate<'a>(&'a self, req: &'a GenerationRequest) -> ApiFuture<'a, Vec<ImageDescriptor>>;

    /// Downloads a generated image.
    fn fetch<'a>(&'a self, url: &'a str) -> ApiFuture<'a, Bytes>;

    fn clone(&self) -> ImgApiBox;
}
