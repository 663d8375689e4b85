use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// An error with a fixed HTTP status and a machine-readable kind.
///
/// The `Display` output is the human-readable message sent to clients, so it
/// must never include internal details.
pub trait ApiError: std::fmt::Display {
    fn status(&self) -> StatusCode;
    fn kind(&self) -> &'static str;
}

/// Render an [`ApiError`] as `{ "kind": ..., "message": ... }` with its status.
///
/// Logging is left to the caller: tower-http TraceLayer already records
/// method/uri/status for every request, so only 5xx need extra context.
pub fn error_response<E: ApiError>(err: &E) -> Response {
    let body = serde_json::json!({
        "kind": err.kind(),
        "message": err.to_string(),
    });
    (err.status(), axum::Json(body)).into_response()
}
