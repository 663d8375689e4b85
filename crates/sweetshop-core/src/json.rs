//! JSON body extractor with a uniform 400 rejection.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, error_response};

/// Body could not be read as the endpoint's request schema: malformed JSON,
/// wrong content type, wrong field types or unknown fields.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InvalidBody(pub String);

impl ApiError for InvalidBody {
    fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn kind(&self) -> &'static str {
        "INVALID_BODY"
    }
}

impl IntoResponse for InvalidBody {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}

/// Drop-in replacement for [`axum::Json`] on the request side.
///
/// axum answers schema mismatches with 422 and syntax errors with 400; the
/// shop API reports every unreadable body as a 400 `INVALID_BODY`.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InvalidBody;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(InvalidBody(rejection.body_text())),
        }
    }
}
