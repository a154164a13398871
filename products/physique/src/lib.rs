//! HTTP front end for mesh generation and body-proportion analysis.

pub mod config;
pub mod error;
pub mod handlers;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;

use {
    axum::{Router, routing::post},
    meshgen::MeshGenerator,
    proportion::AnalyzerOptions,
    std::{future::Future, net::SocketAddr, sync::Arc},
    tokio::net::{TcpListener, ToSocketAddrs},
};

/// Immutable state shared by all handlers.
pub struct AppState {
    pub generator: MeshGenerator,
    pub analyzer: AnalyzerOptions,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            generator: MeshGenerator::new(config.meshgen().clone()),
            analyzer: AnalyzerOptions::default()
                .with_include_measurements(config.include_measurements()),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate", post(handlers::generate))
        .route("/analyze", post(handlers::analyze_proportions))
        .route("/measure", post(handlers::measure))
        .with_state(state)
}

pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    local_addr: SocketAddr,
}

impl Server {
    /// Bind the listener. Requests are not served until `run`.
    pub async fn bind(addr: impl ToSocketAddrs, state: AppState) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            state: Arc::new(state),
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until the process is killed.
    pub async fn run(self) -> std::io::Result<()> {
        axum::serve(self.listener, router(self.state)).await
    }

    /// Serve until `shutdown` completes, then finish in-flight requests.
    pub async fn run_until(self, shutdown: impl Future<Output = ()> + Send + 'static) -> std::io::Result<()> {
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
    }
}
