use axum::{Router, routing::get};
use futures_util::future::try_join_all;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    api::{handlers, routes},
    config::{HubConfig, Topology},
    error::ServerError,
    state::AppState,
    websocket::handler,
};

pub struct Server {
    state: Arc<AppState>,
    config: HubConfig,
}

impl Server {
    pub fn new(config: HubConfig) -> Self {
        Self {
            state: Arc::new(AppState::new()),
            config,
        }
    }

    /// Binds every configured endpoint and serves until one of them fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let mut listeners = Vec::new();
        for addr in self.config.listen_addrs() {
            let listener = TcpListener::bind(addr)
                .await
                .map_err(|source| ServerError::Bind { addr, source })?;
            listeners.push(listener);
        }

        match self.config.topology {
            Topology::Shared { port } => info!(port, "Listening for producers and observers"),
            Topology::Split {
                producer_port,
                observer_port,
            } => info!(producer_port, observer_port, "Listening on split endpoints"),
        }

        serve(self.state, listeners).await
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(handler::ws_handler))
        .merge(routes::configure_api_routes())
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Serves the hub on already-bound listeners. Every listener shares `state`,
/// so producers and observers meet regardless of the endpoint they used.
pub async fn serve(state: Arc<AppState>, listeners: Vec<TcpListener>) -> Result<(), ServerError> {
    let app = build_router(state);

    try_join_all(listeners.into_iter().map(|listener| {
        let app = app.clone();
        async move {
            if let Ok(addr) = listener.local_addr() {
                info!(%addr, "Hub endpoint ready");
            }
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .map_err(ServerError::Serve)
        }
    }))
    .await?;

    Ok(())
}
