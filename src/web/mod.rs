//! HTTP surface

use std::num::NonZeroU16;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::provider::ThumbnailProvider;

mod generate;

use generate::generate_handler;

#[derive(Clone)]
pub(crate) struct AppState {
    /// `None` when the provider failed to initialize at startup
    provider: Option<Arc<dyn ThumbnailProvider>>,
}

impl AppState {
    fn new(provider: Option<Arc<dyn ThumbnailProvider>>) -> Self {
        Self { provider }
    }
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/generate", axum::routing::post(generate_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Starts the HTTP server and runs until interrupted.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    provider: Option<Arc<dyn ThumbnailProvider>>,
) -> Result<(), anyhow::Error> {
    match &provider {
        Some(provider) => info!("Provider: {}", provider.name()),
        None => warn!("No provider available, /generate will answer 503"),
    }
    let app = create_router().with_state(AppState::new(provider));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|err| error!("Server error: {}", err))?;
    Ok(())
}
