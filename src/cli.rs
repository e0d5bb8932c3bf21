//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use url::Url;

use crate::constants::DEFAULT_MODEL;
use crate::provider::ProviderKind;

#[derive(Parser)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "THUMBGEN_DEBUG")]
    /// Enable debug logging. Env: THUMBGEN_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "5000", env = "THUMBGEN_PORT")]
    /// http listener, defaults to `5000`.
    /// Env: THUMBGEN_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "THUMBGEN_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: THUMBGEN_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, value_enum, default_value_t, env = "THUMBGEN_PROVIDER")]
    /// Image generation provider.
    /// Env: THUMBGEN_PROVIDER
    pub provider: ProviderKind,

    #[clap(long, default_value = DEFAULT_MODEL, env = "THUMBGEN_MODEL")]
    /// Hugging Face model id.
    /// Env: THUMBGEN_MODEL
    pub model: String,
    #[clap(long, env = "HF_TOKEN", hide_env_values = true)]
    /// Hugging Face access token.
    /// Env: HF_TOKEN
    pub hf_token: Option<String>,
    #[clap(long, env = "THUMBGEN_HUGGINGFACE_URL")]
    /// Override the Hugging Face inference endpoint, the model id is appended.
    /// Env: THUMBGEN_HUGGINGFACE_URL
    pub huggingface_url: Option<Url>,

    #[clap(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
    /// RapidAPI key, required with `--provider rapidapi`.
    /// Env: RAPIDAPI_KEY
    pub rapidapi_key: Option<String>,
    #[clap(long, env = "THUMBGEN_RAPIDAPI_URL")]
    /// Override the RapidAPI generation endpoint.
    /// Env: THUMBGEN_RAPIDAPI_URL
    pub rapidapi_url: Option<Url>,
}

fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

impl std::fmt::Debug for CliOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliOptions")
            .field("debug", &self.debug)
            .field("port", &self.port)
            .field("listen_address", &self.listen_address)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("hf_token", &redact(&self.hf_token))
            .field("huggingface_url", &self.huggingface_url)
            .field("rapidapi_key", &redact(&self.rapidapi_key))
            .field("rapidapi_url", &self.rapidapi_url)
            .finish()
    }
}
