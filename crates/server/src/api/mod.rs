pub mod tracks;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::assets::{assets_router, not_found};
use crate::state::AppState;

const MAX_TRACK_BODY: usize = 1 << 20;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/tracks",
            get(tracks::list_tracks)
                .post(tracks::echo_track)
                .layer(DefaultBodyLimit::max(MAX_TRACK_BODY)),
        )
        .with_state(state)
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api_router(state.clone()))
        .merge(assets_router(state))
        .fallback(not_found)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
