//! Config handling

use std::sync::Arc;

use tracing::log::LevelFilter;
use tracing::{error, info, warn};
use url::Url;

use crate::cli::CliOptions;
use crate::constants::{HUGGINGFACE_INFERENCE_URL, RAPIDAPI_GENERATE_URL};
use crate::error::ConfigError;
use crate::provider::{HuggingFaceProvider, ProviderKind, RapidApiProvider, ThumbnailProvider};

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Builds the configured provider from CLI/env options.
///
/// A Hugging Face client that fails to build is logged and left out, so the
/// server still starts and answers 503. A RapidAPI setup without a key is a
/// startup error.
pub fn build_provider(
    cli: &CliOptions,
) -> Result<Option<Arc<dyn ThumbnailProvider>>, ConfigError> {
    match cli.provider {
        ProviderKind::HuggingFace => {
            if cli.hf_token.is_none() {
                warn!("HF_TOKEN is not set, requests will be anonymous");
            }
            let endpoint = endpoint_or(cli.huggingface_url.as_ref(), HUGGINGFACE_INFERENCE_URL)?;
            match HuggingFaceProvider::new(endpoint, cli.model.as_str(), cli.hf_token.clone()) {
                Ok(provider) => {
                    info!("Using Hugging Face model {}", cli.model);
                    let provider: Arc<dyn ThumbnailProvider> = Arc::new(provider);
                    Ok(Some(provider))
                }
                Err(err) => {
                    error!("Failed to initialize inference client: {}", err);
                    Ok(None)
                }
            }
        }
        ProviderKind::RapidApi => {
            let api_key = cli
                .rapidapi_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or(ConfigError::MissingRapidApiKey)?;
            let generate_url = endpoint_or(cli.rapidapi_url.as_ref(), RAPIDAPI_GENERATE_URL)?;
            info!("Using RapidAPI endpoint {}", generate_url);
            let provider: Arc<dyn ThumbnailProvider> =
                Arc::new(RapidApiProvider::new(generate_url, api_key)?);
            Ok(Some(provider))
        }
    }
}

fn endpoint_or(configured: Option<&Url>, default: &str) -> Result<Url, ConfigError> {
    match configured {
        Some(url) => Ok(url.clone()),
        None => Url::parse(default).map_err(|err| ConfigError::InvalidUrl(default.to_string(), err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::try_parse_from(std::iter::once("thumbgen").chain(args.iter().copied()))
            .expect("parse cli")
    }

    #[test]
    fn huggingface_provider_builds() {
        let provider = build_provider(&parse(&["--provider", "huggingface", "--hf-token", "hf_test"]))
            .expect("build")
            .expect("provider present");
        assert_eq!(provider.name(), "Hugging Face Inference");
    }

    #[test]
    fn rapidapi_requires_a_key() {
        let err = build_provider(&parse(&["--provider", "rapidapi", "--rapidapi-key", " "]))
            .err()
            .expect("missing key should fail");
        assert!(matches!(err, ConfigError::MissingRapidApiKey));
    }

    #[test]
    fn rapidapi_with_key() {
        let provider = build_provider(&parse(&["--provider", "rapidapi", "--rapidapi-key", "k"]))
            .expect("build")
            .expect("provider present");
        assert_eq!(provider.name(), "RapidAPI");
    }

    #[test]
    fn default_endpoints_parse() {
        assert!(endpoint_or(None, HUGGINGFACE_INFERENCE_URL).is_ok());
        assert!(endpoint_or(None, RAPIDAPI_GENERATE_URL).is_ok());
    }
}
