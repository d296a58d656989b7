pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, ServerConfig, UpstreamConfig};
use crate::error::Result;
use crate::http::HttpClient;
use crate::llm::Dispatcher;

pub use router::build_router;

const USER_AGENT: &str = concat!("toolbox-web/", env!("CARGO_PKG_VERSION"));

/// Shared, read-only request context. Nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub http: HttpClient,
    pub server: Arc<ServerConfig>,
    pub upstream: Arc<UpstreamConfig>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = HttpClient::new(USER_AGENT, config.upstream.timeout())?;
        let dispatcher = Dispatcher::new(
            config.provider_keys(),
            config.upstream.openai_base_url.clone(),
            config.upstream.gemini_base_url.clone(),
            http.clone(),
        );
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            http,
            server: Arc::new(config.server.clone()),
            upstream: Arc::new(config.upstream.clone()),
        })
    }
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
