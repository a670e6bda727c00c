use crate::config::PersonConfig;
use crate::handlers;
use crate::services::{LazyPersonStore, MongoConnector, StoreConnector};
use axum::{routing::get, Router};
use service_core::config::{EnvSource, ProcessEnv};
use service_core::error::AppError;
use service_core::middleware::correlation_span;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: PersonConfig,
    pub store: LazyPersonStore,
    pub env: Arc<dyn EnvSource>,
}

impl AppState {
    pub fn new(
        config: PersonConfig,
        connector: Arc<dyn StoreConnector>,
        env: Arc<dyn EnvSource>,
    ) -> Self {
        let store = LazyPersonStore::new(config.mongodb.clone(), connector);
        Self { config, store, env }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/hello", get(handlers::hello))
        .route("/healthz", get(handlers::healthz))
        .route(
            "/personer",
            get(handlers::list_personer).post(handlers::save_person),
        )
        .layer(TraceLayer::new_for_http().make_span_with(correlation_span))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: PersonConfig) -> Result<Self, AppError> {
        let state = AppState::new(config, Arc::new(MongoConnector), Arc::new(ProcessEnv));
        Self::with_state(state).await
    }

    pub async fn with_state(state: AppState) -> Result<Self, AppError> {
        let port = state.config.common.port;
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
