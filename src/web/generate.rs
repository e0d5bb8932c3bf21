use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::AppState;
use crate::constants::{PNG_CONTENT_TYPE, TITLE_REQUIRED_MESSAGE};
use crate::error::ThumbnailError;
use crate::imaging::reencode_png;
use crate::prompt::thumbnail_prompt;

/// Body of `POST /generate`
#[derive(Deserialize, Debug)]
pub(crate) struct GenerationRequest {
    #[serde(default)]
    title: Option<String>,
}

impl GenerationRequest {
    /// Parses and validates the body, returning the title.
    pub(crate) fn title_from_body(body: &[u8]) -> Result<String, ThumbnailError> {
        let bad_body = || {
            ThumbnailError::BadRequest(
                "Request body must be a JSON object with a string 'title'".to_string(),
            )
        };
        let value: Value = serde_json::from_slice(body).map_err(|err| {
            debug!("Request body is not JSON: {}", err);
            bad_body()
        })?;
        if !value.is_object() {
            return Err(bad_body());
        }
        let request: GenerationRequest = serde_json::from_value(value).map_err(|err| {
            debug!("Invalid request body: {}", err);
            bad_body()
        })?;
        request
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| ThumbnailError::BadRequest(TITLE_REQUIRED_MESSAGE.to_string()))
    }
}

/// handles POST /generate
#[instrument(skip_all)]
pub(crate) async fn generate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ThumbnailError> {
    let title = GenerationRequest::title_from_body(&body)?;
    let provider = state
        .provider
        .as_ref()
        .ok_or(ThumbnailError::ProviderUnavailable)?;

    let prompt = thumbnail_prompt(&title);
    info!("Generating thumbnail for {:?} via {}", title, provider.name());
    debug!("Prompt: {}", prompt);

    let image = provider.generate(&prompt).await?;
    let png = reencode_png(&image)?;
    Ok(([(CONTENT_TYPE, PNG_CONTENT_TYPE)], png).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(body: &str) -> Result<String, ThumbnailError> {
        GenerationRequest::title_from_body(body.as_bytes())
    }

    #[test]
    fn accepts_titles() {
        assert_eq!(
            title(r#"{"title": "My Cool Video"}"#).expect("valid"),
            "My Cool Video"
        );
        assert_eq!(
            title(r#"{"title": " padded ", "extra": true}"#).expect("valid"),
            " padded "
        );
    }

    #[test]
    fn rejects_missing_or_blank_titles() {
        for body in [r#"{}"#, r#"{"title": null}"#, r#"{"title": ""}"#, r#"{"title": "  \t"}"#] {
            match title(body) {
                Err(ThumbnailError::BadRequest(message)) => {
                    assert_eq!(message, TITLE_REQUIRED_MESSAGE)
                }
                other => panic!("{body} gave {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_objects() {
        for body in ["", "not json", "[1, 2]", r#"["x"]"#, r#""title""#, r#"{"title": 5}"#] {
            assert!(
                matches!(title(body), Err(ThumbnailError::BadRequest(_))),
                "{body} should be rejected"
            );
        }
    }
}
