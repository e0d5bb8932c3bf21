use std::process::ExitCode;

use clap::Parser;
use thumbgen::config::{build_provider, setup_logging};
use tracing::{debug, error};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    // .env has to be loaded before clap reads the environment
    let dotenv_result = dotenv::dotenv();
    let cli = thumbgen::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return ExitCode::FAILURE;
    }
    match dotenv_result {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(err) => debug!("No .env file loaded: {}", err),
    }

    let provider = match build_provider(&cli) {
        Ok(provider) => provider,
        Err(err) => {
            error!("Configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) =
        thumbgen::web::setup_server(&cli.listen_address, cli.port, provider).await
    {
        error!("Application error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
