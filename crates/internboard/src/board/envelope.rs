//! `{ success, message?, ...data }` response bodies shared by both routers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info};

use super::error::RegistryError;

/// Successful response; the fields of `data` are merged next to `success`.
pub(crate) fn success(status: StatusCode, message: Option<&str>, data: Value) -> Response {
    let mut body = json!({ "success": true });
    if let Value::Object(fields) = &mut body {
        if let Some(message) = message {
            fields.insert("message".to_string(), json!(message));
        }
        if let Value::Object(data) = data {
            fields.extend(data);
        }
    }

    (status, Json(body)).into_response()
}

/// Failure response. Store failures are logged and reported with `context`
/// so internals never reach the caller.
pub(crate) fn failure(err: RegistryError, context: &'static str) -> Response {
    let status = err.status();
    let message = if err.is_client_error() {
        info!(%status, reason = %err, "{context}");
        err.to_string()
    } else {
        error!(error = %err, "{context}");
        context.to_string()
    };

    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

pub(crate) fn rejected_body(rejection: JsonRejection) -> Response {
    bad_request(rejection.body_text())
}

pub(crate) fn rejected_query(rejection: QueryRejection) -> Response {
    bad_request(rejection.body_text())
}

fn bad_request(message: String) -> Response {
    info!(%message, "request rejected before reaching a registry");
    let body = json!({ "success": false, "message": message });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
