//! Web layer module
//!
//! HTTP interface of the Pokedex Proxy. Handlers are thin and delegate to
//! [`LookupService`] for lookups and to the shared caches for the
//! operational endpoints.
//!
//! # Routes
//!
//! - `GET /pokemon/{name}`: plain lookup
//! - `GET /pokemon/translated/{name}`: lookup with a translated description
//! - `GET /health`, `GET /live`, `GET /ready`: health checks
//! - `GET /api/v1/cache`, `DELETE /api/v1/cache/species/{name}`: cache inspection

use anyhow::{Result, anyhow};
use axum::{
    Router,
    routing::{delete, get},
};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    cache::Cache,
    config::Config,
    models::{SpeciesRecord, TranslationResult},
    services::LookupService,
};

pub mod handlers;
pub mod middleware;
pub mod responses;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub lookup_service: LookupService,
    pub species_cache: Cache<SpeciesRecord>,
    /// `None` when translation caching is disabled
    pub translation_cache: Option<Cache<TranslationResult>>,
    pub config: Config,
}

/// Build the application router with all routes and layers
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pokemon/{name}", get(handlers::pokemon::get_pokemon))
        .route(
            "/pokemon/translated/{name}",
            get(handlers::pokemon::get_translated_pokemon),
        )
        .route("/health", get(handlers::health::health_check))
        .route("/live", get(handlers::health::liveness_check))
        .route("/ready", get(handlers::health::readiness_check))
        .nest("/api/v1", api_v1_routes())
        .fallback(handlers::route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .with_state(state)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/cache", get(handlers::cache::get_cache_snapshot))
        .route(
            "/cache/species/{name}",
            delete(handlers::cache::evict_species),
        )
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> Result<Self> {
        let addr: SocketAddr = state.config.listen_address().parse().map_err(|e| {
            anyhow!(
                "Invalid listen address {}: {}",
                state.config.listen_address(),
                e
            )
        })?;

        Ok(Self {
            app: create_router(state),
            addr,
        })
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Serve until `cancellation_token` fires.
    ///
    /// The bind outcome is reported through `ready_signal` before any request
    /// is served. On cancellation the listener stops accepting and in-flight
    /// requests are drained; bounding the drain is up to the caller.
    pub async fn serve_with_cancellation(
        self,
        ready_signal: oneshot::Sender<Result<()>>,
        cancellation_token: CancellationToken,
    ) -> Result<()> {
        match tokio::net::TcpListener::bind(&self.addr).await {
            Ok(listener) => {
                let _ = ready_signal.send(Ok(()));

                let shutdown_signal = async move {
                    cancellation_token.cancelled().await;
                    info!("Web server received cancellation signal, shutting down gracefully");
                };

                axum::serve(listener, self.app)
                    .with_graceful_shutdown(shutdown_signal)
                    .await?;
                Ok(())
            }
            Err(bind_error) => {
                let bind_err_msg = format!("Failed to bind to {}: {}", self.addr, bind_error);
                let _ = ready_signal.send(Err(anyhow!("{}", bind_err_msg)));
                Err(anyhow!("{}", bind_err_msg))
            }
        }
    }

    /// Run the server until `shutdown` resolves, then drain for at most
    /// `grace_period`.
    ///
    /// Fails on a bind failure and when the server stops before `shutdown`
    /// resolves. Requests still running once the grace period elapses are
    /// dropped.
    pub async fn run_until<F>(self, shutdown: F, grace_period: Duration) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.addr;
        let cancellation_token = CancellationToken::new();
        let (ready_tx, ready_rx) = oneshot::channel();
        let mut server_handle =
            tokio::spawn(self.serve_with_cancellation(ready_tx, cancellation_token.clone()));

        match ready_rx.await {
            Ok(Ok(())) => info!(%addr, "Web server is now listening"),
            Ok(Err(bind_error)) => return Err(bind_error),
            Err(_) => return Err(anyhow!("Web server task completed without signaling")),
        }

        tokio::select! {
            _ = shutdown => {}
            result = &mut server_handle => {
                return Err(match result {
                    Ok(Err(e)) => e,
                    Ok(Ok(())) => anyhow!("Web server stopped unexpectedly"),
                    Err(join_error) => anyhow!("Web server task failed: {join_error}"),
                });
            }
        }

        cancellation_token.cancel();
        match tokio::time::timeout(grace_period, &mut server_handle).await {
            Ok(Ok(result)) => {
                info!("Web server stopped");
                result
            }
            Ok(Err(join_error)) => Err(anyhow!("Web server task failed: {join_error}")),
            Err(_) => {
                warn!(
                    grace_period = ?grace_period,
                    "In-flight requests did not finish within the grace period, forcing shutdown"
                );
                server_handle.abort();
                Ok(())
            }
        }
    }
}

/// Resolve when the process receives SIGINT or SIGTERM
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
                    _ = sigint.recv() => {
                        info!("Received SIGINT (Ctrl+C), shutting down gracefully")
                    }
                }
            }
            _ => {
                warn!("Failed to install unix signal handlers, falling back to Ctrl+C");
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down gracefully");
}
