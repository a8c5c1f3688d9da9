use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use bytes::Bytes;
use common::{Track, TracksResponse};
use tracing::warn;

use crate::state::AppState;
use crate::utils::{json_error_response, json_response};

/// Scans the music directory from scratch and returns every tagged file.
pub async fn list_tracks(State(state): State<AppState>) -> Response {
    let catalog = Arc::clone(&state.catalog);
    match tokio::task::spawn_blocking(move || catalog.scan()).await {
        Ok(scan) => json_response(StatusCode::OK, &TracksResponse::from(scan.tracks)),
        Err(err) => {
            warn!("Catalog scan join error: {}", err);
            json_error_response(StatusCode::INTERNAL_SERVER_ERROR, "catalog scan failed")
        }
    }
}

/// Parses a submitted track and sends it back. Nothing is written to disk.
pub async fn echo_track(body: Bytes) -> Response {
    match serde_json::from_slice::<Track>(&body) {
        Ok(track) => json_response(StatusCode::CREATED, &track),
        Err(err) => json_error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("invalid track: {}", err),
        ),
    }
}
