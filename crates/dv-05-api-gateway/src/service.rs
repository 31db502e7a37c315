//! # API Gateway Service
//!
//! Binds the listener and serves the router until the shutdown future
//! resolves. In-flight requests complete before `serve` returns.

use crate::domain::config::GatewayConfig;
use crate::router::{build_router, AppState};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    pub fn new(config: GatewayConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub async fn bind(&self) -> io::Result<TcpListener> {
        TcpListener::bind(self.config.http_addr()).await
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        let router = build_router(self.state, &self.config);
        info!(%addr, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
