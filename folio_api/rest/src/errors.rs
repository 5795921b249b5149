use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_models::contact::ContactFieldErrors;

use crate::models::ApiFailure;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("internal error: {err}"),
    )
}

pub fn failure(code: StatusCode, msg: impl Into<String>) -> Response {
    (code, Json(ApiFailure::new(msg.into(), None))).into_response()
}

pub fn validation_failed(errors: ContactFieldErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiFailure::new("validation failed".into(), Some(errors))),
    )
        .into_response()
}
