use bytes::Bytes;
use log::{debug, info};
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};

use crate::{
    error::RequestError,
    image_api::{ApiFuture, GenerationRequest, ImageApi, ImageDescriptor, ImgApiBox},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI Images API.
#[derive(Clone)]
pub struct OpenAiImages {
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub created: Option<u64>,
    pub data: Vec<ImageDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiImages {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }
}

impl Default for OpenAiImages {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Prefers the API's own error message, falls back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

impl ImageApi for OpenAiImages {
    fn generate<'a>(&'a self, req: &'a GenerationRequest) -> ApiFuture<'a, Vec<ImageDescriptor>> {
        Box::pin(async move {
            let body = RequestBody {
                model: req.model.id(),
                prompt: &req.prompt,
            };
            info!("Requesting poster from {} with {}", self.base_url, body.model);
            debug!("Prompt: {}", body.prompt);

            let resp = self
                .client
                .post(self.generations_url())
                .bearer_auth(req.credential.expose())
                .header(header::ACCEPT, "application/json")
                .json(&body)
                .send()
                .await?;

            let status = resp.status();
            let text = resp.text().await?;
            if !status.is_success() {
                return Err(RequestError::Status {
                    status,
                    message: error_message(&text),
                });
            }

            let parsed: ResponseBody = serde_json::from_str(&text)?;
            debug!(
                "Received {} image(s), created at {:?}",
                parsed.data.len(),
                parsed.created
            );
            Ok(parsed.data)
        })
    }

    fn fetch<'a>(&'a self, url: &'a str) -> ApiFuture<'a, Bytes> {
        Box::pin(async move {
            let resp = self.client.get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(RequestError::Status {
                    status,
                    message: error_message(&body),
                });
            }
            Ok(resp.bytes().await?)
        })
    }

    fn clone(&self) -> ImgApiBox {
        Box::new(Clone::clone(self))
    }
}
