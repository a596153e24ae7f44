// file: src/server/mod.rs
// version: 1.0.0
// guid: a8055631-7e4b-4aea-887c-06dea504f27a

//! HTTP surface: `POST /rsync/run`, `POST /rclone/run` and the panel script
//!
//! The routes can be served on their own with [`serve`] or merged into a
//! host application's router with [`mount`].

pub mod handlers;
pub mod models;

use crate::config::BridgeConfig;
use crate::error::{Result, TransferError};
use crate::transfer::TransferRunner;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub const RSYNC_RUN_PATH: &str = "/rsync/run";
pub const RCLONE_RUN_PATH: &str = "/rclone/run";
/// Where hosts expect extension web assets: `/extensions/<name>/<file>`
pub const PANEL_JS_PATH: &str = "/extensions/transfer-bridge/js/transfer_panel.js";

pub(crate) const PANEL_JS: &str = include_str!("../../web/js/transfer_panel.js");

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<TransferRunner>,
}

impl AppState {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            runner: Arc::new(TransferRunner::new(config)),
        }
    }
}

/// Router holding the two run endpoints and the panel script
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(RSYNC_RUN_PATH, post(handlers::handle_rsync_run))
        .route(RCLONE_RUN_PATH, post(handlers::handle_rclone_run))
        .route(PANEL_JS_PATH, get(handlers::handle_panel_js))
        .with_state(state)
}

/// Register the endpoints on a host application's router
pub fn mount(host: Router, state: AppState) -> Router {
    host.merge(router(state))
}

/// Serve the endpoints standalone until `shutdown` resolves
pub async fn serve<F>(config: BridgeConfig, bind: Option<SocketAddr>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind.unwrap_or(config.server.bind);
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TransferError::server(format!("Failed to bind {}: {}", addr, e)))?;
    let local_addr = listener.local_addr()?;
    info!("Transfer bridge listening on http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| TransferError::server(e.to_string()))?;

    info!("Transfer bridge stopped");
    Ok(())
}
