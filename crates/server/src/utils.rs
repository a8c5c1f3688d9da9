use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::state::ErrorResponse;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Serializes `value` with the catalog's JSON content type. A value that
/// fails to serialize becomes a 500.
pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => {
            let mut response = Response::new(Body::from(body));
            *response.status_mut() = status;
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON_CONTENT_TYPE),
            );
            response
        }
        Err(err) => {
            error!("Failed to serialize response: {}", err);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

pub fn json_error_response(status: StatusCode, message: impl Into<String>) -> Response {
    json_response(
        status,
        &ErrorResponse {
            error: message.into(),
        },
    )
}

pub fn text_response(status: StatusCode, message: &'static str) -> Response {
    (status, message).into_response()
}
