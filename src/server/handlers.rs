// file: src/server/handlers.rs
// version: 1.0.0
// guid: 223557fc-bb12-42d2-a225-4c549afabb0d

//! Request handlers for `/rsync/run`, `/rclone/run` and the panel script

use super::models::{RcloneRunRequest, RsyncRunRequest, RunResponse};
use super::{AppState, PANEL_JS};
use crate::error::TransferError;
use crate::transfer::{Tool, TransferRunner, TransferSpec};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{error, warn};

type HandlerResponse = (StatusCode, Json<RunResponse>);

/// Serve the embedded panel script
pub async fn handle_panel_js() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        PANEL_JS,
    )
}

pub async fn handle_rsync_run(
    State(state): State<AppState>,
    payload: Result<Json<RsyncRunRequest>, JsonRejection>,
) -> HandlerResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection),
    };

    let (spec, timeout) = request.into_spec(Tool::Rsync);
    execute(&state.runner, spec, timeout).await
}

pub async fn handle_rclone_run(
    State(state): State<AppState>,
    payload: Result<Json<RcloneRunRequest>, JsonRejection>,
) -> HandlerResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection),
    };

    let (spec, timeout) = request.into_spec();
    execute(&state.runner, spec, timeout).await
}

async fn execute(runner: &TransferRunner, spec: TransferSpec, timeout: Option<u64>) -> HandlerResponse {
    match runner.run(&spec, timeout).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome.into())),
        Err(err) => {
            let status = status_for(&err);
            if status.is_client_error() {
                warn!("Rejected {} request: {}", spec.tool, err);
            } else {
                error!("{} run failed: {}", spec.tool, err);
            }
            (status, Json(RunResponse::from(&err)))
        }
    }
}

fn status_for(err: &TransferError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn invalid_body(rejection: JsonRejection) -> HandlerResponse {
    warn!("Invalid request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(RunResponse::failure(
            format!("Invalid request body: {}", rejection.body_text()),
            "",
        )),
    )
}
