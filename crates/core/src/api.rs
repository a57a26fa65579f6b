//! Client for the remote image generation and post service.
//!
//! Both endpoints take a JSON body over POST:
//!
//! - `dalle`: `{"prompt": ..}` answered by `{"photo": "<base64 image>"}`
//! - `post`: `{"name": .., "prompt": .., "photo": "<data uri>"}` answered by any JSON
//!
//! The form talks to the service only through [`ImageApi`], so tests and
//! alternative backends can stand in for [`HttpImageApi`].

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::form::DraftPost;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Body of an image generation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    photo: String,
}

/// Remote operations the form depends on.
#[async_trait]
pub trait ImageApi: Send + Sync {
    /// Generates an image for the prompt and returns its base64 payload.
    async fn generate_image(&self, request: &GenerateRequest) -> Result<String>;

    /// Publishes the finished draft.
    async fn create_post(&self, post: &DraftPost) -> Result<()>;
}

/// [`ImageApi`] over HTTP with `reqwest`.
pub struct HttpImageApi {
    client: reqwest::Client,
    generate_url: Url,
    post_url: Url,
}

impl HttpImageApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            generate_url: config.generate_url()?,
            post_url: config.post_url()?,
        })
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: &Url, body: &T) -> Result<String> {
        let response = self.client.post(url.clone()).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl ImageApi for HttpImageApi {
    async fn generate_image(&self, request: &GenerateRequest) -> Result<String> {
        tracing::debug!(url = %self.generate_url, "requesting image generation");
        let body = self.post_json(&self.generate_url, request).await?;
        parse_generate_response(&body)
    }

    async fn create_post(&self, post: &DraftPost) -> Result<()> {
        tracing::debug!(url = %self.post_url, "publishing post");
        let body = self.post_json(&self.post_url, post).await?;
        // The body content is unused, but it has to be JSON
        let _: serde_json::Value = serde_json::from_str(&body)?;
        Ok(())
    }
}

fn parse_generate_response(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    if response.photo.is_empty() {
        return Err(AppError::malformed("response contained an empty photo"));
    }
    Ok(response.photo)
}
