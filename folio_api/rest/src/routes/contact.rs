use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::{failure, internal_server_error, validation_failed},
    models::contact::{parse_submission, ApiContactSent},
};

pub const CONTACT_ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(CONTACT_ROUTE, routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!(status = %rejection.status(), "failed to read request body");
            return failure(rejection.status(), rejection.body_text());
        }
    };

    let body = match serde_json::from_slice::<Value>(&body) {
        Ok(body) if !is_falsy(&body) => body,
        _ => return failure(StatusCode::BAD_REQUEST, "invalid JSON"),
    };

    let submission = match parse_submission(&body) {
        Ok(submission) => submission,
        Err(errors) => {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "rejected contact submission");
            return validation_failed(errors);
        }
    };

    match service.send_message(submission).await {
        Ok(id) => Json(ApiContactSent { ok: true, id }).into_response(),
        Err(err @ ContactSendMessageError::MissingConfig(_))
        | Err(err @ ContactSendMessageError::Provider(_)) => {
            failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

/// `null`, `false`, zero and the empty string do not count as a request body.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(-0.0), json!("")] {
            assert!(is_falsy(&value), "{value}");
        }
        for value in [json!(true), json!(1), json!(" "), json!([]), json!({})] {
            assert!(!is_falsy(&value), "{value}");
        }
    }
}
