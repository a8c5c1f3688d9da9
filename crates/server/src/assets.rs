use std::path::Path;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::debug;

use crate::state::AppState;
use crate::utils::text_response;

pub fn assets_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/elm.js", get(elm_js))
        .route("/style.css", get(style_css))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Response {
    serve_asset(&state.web_root, "index.html", false).await
}

async fn elm_js(State(state): State<AppState>) -> Response {
    serve_asset(&state.web_root, "elm.js", false).await
}

async fn style_css(State(state): State<AppState>) -> Response {
    serve_asset(&state.web_root, "style.css", true).await
}

/// Reads `file` from the web root. With `empty_if_missing` an absent file
/// is served as an empty body of the right type instead of a 404.
async fn serve_asset(web_root: &Path, file: &str, empty_if_missing: bool) -> Response {
    let path = web_root.join(file);
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(_) if empty_if_missing => Vec::new(),
        Err(err) => {
            debug!("Asset {} unavailable: {}", path.display(), err);
            return not_found().await;
        }
    };
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let mut response = Response::new(Body::from(data));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref())
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    response
}

pub async fn not_found() -> Response {
    text_response(StatusCode::NOT_FOUND, "File not found.")
}
