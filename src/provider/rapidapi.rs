//! RapidAPI provider: one call generates and returns an envelope pointing at
//! the image, a second call downloads it.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{ProviderError, ThumbnailProvider, USER_AGENT, error_details};
use crate::constants::{RAPIDAPI_IMAGE_URL_POINTER, RAPIDAPI_SIZE, RAPIDAPI_STYLE_ID};

const X_RAPIDAPI_KEY: &str = "x-rapidapi-key";
const X_RAPIDAPI_HOST: &str = "x-rapidapi-host";

/// Request body for the generation call
#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    style_id: u32,
    size: &'a str,
}

/// Calls a RapidAPI text-to-image service.
pub struct RapidApiProvider {
    client: reqwest::Client,
    generate_url: Url,
    host: String,
    api_key: String,
}

impl RapidApiProvider {
    /// Builds a provider posting to `generate_url`, the RapidAPI host header is
    /// taken from the URL.
    pub fn new(generate_url: Url, api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let host = generate_url.host_str().unwrap_or_default().to_string();
        Ok(Self {
            client,
            generate_url,
            host,
            api_key: api_key.into(),
        })
    }

    async fn request_generation(&self, prompt: &str) -> Result<Value, ProviderError> {
        let resp = self
            .client
            .post(self.generate_url.clone())
            .header(X_RAPIDAPI_KEY, &self.api_key)
            .header(X_RAPIDAPI_HOST, &self.host)
            .json(&GenerateRequest {
                prompt,
                style_id: RAPIDAPI_STYLE_ID,
                size: RAPIDAPI_SIZE,
            })
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let (message, body) = error_details(&bytes);
            return Err(ProviderError::Http {
                status,
                message,
                body,
            });
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            ProviderError::InvalidResponse(format!(
                "{err}: {}",
                String::from_utf8_lossy(&bytes)
            ))
        })
    }

    async fn download(&self, url: Url) -> Result<Vec<u8>, ProviderError> {
        debug!("GET {}", url);
        let download_error = |reason: String| ProviderError::Download {
            url: url.to_string(),
            reason,
        };
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| download_error(err.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(download_error(status.to_string()));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| download_error(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl std::fmt::Debug for RapidApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RapidApiProvider")
            .field("generate_url", &self.generate_url.as_str())
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Finds the image URL in a generation envelope.
fn image_url(envelope: &Value) -> Option<Url> {
    envelope
        .pointer(RAPIDAPI_IMAGE_URL_POINTER)?
        .as_str()
        .and_then(|url| Url::parse(url).ok())
}

#[async_trait]
impl ThumbnailProvider for RapidApiProvider {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        let envelope = self.request_generation(prompt).await?;
        let Some(url) = image_url(&envelope) else {
            return Err(ProviderError::MissingImageUrl(envelope));
        };
        let bytes = self.download(url).await?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "RapidAPI"
    }
}
