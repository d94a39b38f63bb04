//! HTTP query service over a gotaxon store: boots by loading the four
//! structured buckets into memory, then serves gi2taxid, taxid2taxon,
//! name2taxid and lca over a JSON envelope. Ported from
//! `taxon/server.go`'s `StartServer` and its handlers.

pub mod config;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;

use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

/// Build the application router, including the tracing and per-request
/// timeout middleware.
pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .merge(routes::router())
        .with_state(state.clone())
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).latency_unit(tower_http::LatencyUnit::Micros)),
        )
}

/// Load the taxonomy graph, build the router, bind and serve until a ctrl-c
/// or SIGTERM. Does not return until shutdown completes.
pub async fn run(config: ServerConfig) -> Result<()> {
    let state = AppState::boot(&config).await?;

    let app = router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(%addr, "gotaxon-server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("gotaxon-server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => tracing::error!("failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }

    tokio::time::sleep(Duration::from_millis(200)).await;
}
