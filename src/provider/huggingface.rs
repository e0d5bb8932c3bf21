//! Hugging Face inference provider, the response body is the image itself.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::{ProviderError, ThumbnailProvider, USER_AGENT, error_details};
use crate::constants::MODEL_LOADING_MARKER;

#[derive(Serialize, Debug)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Calls a Hugging Face text-to-image model.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    endpoint: Url,
    model: String,
    token: Option<String>,
}

impl HuggingFaceProvider {
    /// Builds a provider for `model` served under `endpoint`.
    ///
    /// Without a token requests are anonymous, which Hugging Face rate limits heavily.
    pub fn new(
        endpoint: Url,
        model: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            endpoint,
            model: model.into(),
            token: token.filter(|token| !token.trim().is_empty()),
        })
    }

    fn model_url(&self) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for HuggingFaceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceProvider")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ThumbnailProvider for HuggingFaceProvider {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        let url = self.model_url();
        debug!("POST {}", url);
        let mut request = self
            .client
            .post(&url)
            .json(&InferenceRequest { inputs: prompt });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let (message, body) = error_details(&bytes);
            if message.contains(MODEL_LOADING_MARKER) {
                return Err(ProviderError::ModelLoading(message));
            }
            return Err(ProviderError::Http {
                status,
                message,
                body,
            });
        }

        debug!("Received {} bytes from {}", bytes.len(), self.model);
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "Hugging Face Inference"
    }
}
