//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::constants::{MODEL_LOADING_MESSAGE, PROVIDER_UNAVAILABLE_MESSAGE};
use crate::provider::ProviderError;

/// Errors surfaced by the `/generate` endpoint.
#[derive(Debug)]
pub enum ThumbnailError {
    /// The request body or title was invalid
    BadRequest(String),
    /// No provider was configured at startup
    ProviderUnavailable,
    /// The provider model is still warming up, the caller should retry
    ModelLoading,
    /// The provider answered with something we can't use
    Upstream {
        /// Human readable description, includes upstream status text where there is one
        message: String,
        /// Raw provider response, when it was JSON
        response: Option<Value>,
    },
    /// Anything else
    InternalServerError(String),
}

impl std::fmt::Display for ThumbnailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "{message}"),
            Self::ProviderUnavailable => write!(f, "{PROVIDER_UNAVAILABLE_MESSAGE}"),
            Self::ModelLoading => write!(f, "{MODEL_LOADING_MESSAGE}"),
            Self::Upstream { message, .. } => write!(f, "{message}"),
            Self::InternalServerError(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ThumbnailError {}

impl ThumbnailError {
    /// The HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ProviderUnavailable | Self::ModelLoading => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream { .. } | Self::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ProviderError> for ThumbnailError {
    fn from(err: ProviderError) -> Self {
        let message = err.to_string();
        match err {
            ProviderError::ModelLoading(_) => ThumbnailError::ModelLoading,
            ProviderError::MissingImageUrl(raw) => ThumbnailError::Upstream {
                message: "Could not find image URL in provider response".to_string(),
                response: Some(raw),
            },
            ProviderError::Http { body, .. } => ThumbnailError::Upstream {
                message,
                response: body,
            },
            ProviderError::Download { .. } => ThumbnailError::Upstream {
                message,
                response: None,
            },
            ProviderError::Network(_) | ProviderError::InvalidResponse(_) => {
                ThumbnailError::InternalServerError(message)
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<Value>,
}

impl IntoResponse for ThumbnailError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match &self {
            ThumbnailError::BadRequest(message) => info!("Bad request received: {}", message),
            ThumbnailError::ProviderUnavailable => warn!("Request received with no provider"),
            ThumbnailError::ModelLoading => warn!("Provider model is still loading"),
            ThumbnailError::Upstream { message, response } => {
                error!("Upstream error: {} response={:?}", message, response)
            }
            ThumbnailError::InternalServerError(message) => {
                error!("Internal server error: {}", message)
            }
        }
        let error = self.to_string();
        let response = match self {
            ThumbnailError::Upstream { response, .. } => response,
            _ => None,
        };
        (status, Json(ErrorBody { error, response })).into_response()
    }
}

/// Startup configuration failures.
#[derive(Debug)]
pub enum ConfigError {
    /// The RapidAPI provider was selected without `RAPIDAPI_KEY`
    MissingRapidApiKey,
    /// A provider could not be constructed
    Provider(ProviderError),
    /// A provider endpoint is not a valid URL
    InvalidUrl(String, url::ParseError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRapidApiKey => write!(
                f,
                "RAPIDAPI_KEY must be set when using the rapidapi provider"
            ),
            Self::Provider(err) => write!(f, "Failed to initialize provider: {err}"),
            Self::InvalidUrl(url, err) => write!(f, "Invalid provider URL {url}: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ProviderError> for ConfigError {
    fn from(err: ProviderError) -> Self {
        ConfigError::Provider(err)
    }
}
