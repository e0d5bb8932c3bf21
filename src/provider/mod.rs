//! Text-to-image providers.
//!
//! Each provider turns a prompt into raw image bytes in whatever format the
//! upstream service produces; normalising to PNG happens in [`crate::imaging`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

mod huggingface;
mod rapidapi;

pub use huggingface::HuggingFaceProvider;
pub use rapidapi::RapidApiProvider;

/// User agent sent on every outbound request
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Which provider the service talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderKind {
    /// Hugging Face inference, returns image bytes directly
    #[default]
    #[value(name = "huggingface")]
    HuggingFace,
    /// RapidAPI generation, returns a URL that is fetched in a second call
    #[value(name = "rapidapi")]
    RapidApi,
}

/// A text-to-image backend.
#[async_trait]
pub trait ThumbnailProvider: Send + Sync {
    /// Generates an image for the prompt and returns the encoded bytes.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ProviderError>;

    /// Display name, used in logs.
    fn name(&self) -> &'static str;
}

/// Errors returned by providers.
#[derive(Debug)]
pub enum ProviderError {
    /// The upstream model is still loading
    ModelLoading(String),
    /// Upstream answered with a non-success status
    Http {
        /// Upstream status
        status: StatusCode,
        /// Upstream error message, or the raw body when it had none
        message: String,
        /// Upstream body, when it was JSON
        body: Option<Value>,
    },
    /// The generation envelope had no usable image URL
    MissingImageUrl(Value),
    /// Fetching the generated image failed
    Download {
        /// Where we tried to fetch it from
        url: String,
        /// Upstream status text or transport error
        reason: String,
    },
    /// Transport failure talking to the provider
    Network(reqwest::Error),
    /// The provider answered with something unparseable
    InvalidResponse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelLoading(message) => write!(f, "{message}"),
            Self::Http {
                status, message, ..
            } => {
                if message.is_empty() {
                    write!(f, "Provider returned {status}")
                } else {
                    write!(f, "Provider returned {status}: {message}")
                }
            }
            Self::MissingImageUrl(_) => write!(f, "Could not find image URL in provider response"),
            Self::Download { url, reason } => {
                write!(f, "Failed to download image from {url}: {reason}")
            }
            Self::Network(err) => write!(f, "Network error: {err}"),
            Self::InvalidResponse(message) => write!(f, "Invalid provider response: {message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err)
    }
}

/// Pulls a message out of an error body.
///
/// Providers usually answer `{"error": "..."}`, sometimes with a list of
/// messages; anything else is reported as text.
pub(crate) fn error_details(bytes: &[u8]) -> (String, Option<Value>) {
    let Ok(body) = serde_json::from_slice::<Value>(bytes) else {
        return (String::from_utf8_lossy(bytes).trim().to_string(), None);
    };
    let message = match body.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Array(messages)) => messages
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.to_string(),
    };
    (message, Some(body))
}

#[cfg(test)]
pub(crate) mod testing {
    /// Serves `router` on an ephemeral local port and returns its base URL.
    pub(crate) async fn spawn_mock(router: axum::Router) -> url::Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("mock provider address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        url::Url::parse(&format!("http://{addr}/")).expect("mock provider url")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_details_prefers_error_field() {
        let (message, body) = error_details(br#"{"error": "Model x is currently loading", "estimated_time": 20.0}"#);
        assert_eq!(message, "Model x is currently loading");
        assert_eq!(body.expect("json body")["estimated_time"], json!(20.0));
    }

    #[test]
    fn error_details_joins_lists() {
        let (message, _) = error_details(br#"{"error": ["first", "second"]}"#);
        assert_eq!(message, "first; second");
    }

    #[test]
    fn error_details_falls_back_to_text() {
        let (message, body) = error_details(b"  gateway fell over\n");
        assert_eq!(message, "gateway fell over");
        assert!(body.is_none());
    }

    #[test]
    fn http_error_display_includes_status_line() {
        let err = ProviderError::Http {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: String::new(),
            body: None,
        };
        assert_eq!(err.to_string(), "Provider returned 429 Too Many Requests");
    }
}
