//! Problem+json error responses.
//!
//! Every failure leaving the API goes through [`ApiError`]: an HTTP status,
//! a stable machine-readable code, a human message, and the request's trace
//! ID. Workflow errors keep their messages verbatim; only the status and
//! code are decided here.

use axum::{
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::telemetry;
use crate::workflow::WorkflowError;

/// Body of every error response the API emits.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// Status for the response; never serialized into the body.
    #[serde(skip_serializing, skip_deserializing)]
    pub status: StatusCode,
    /// Stable code clients can branch on.
    pub code: Box<str>,
    /// Human-readable explanation.
    pub message: Box<str>,
    /// Structured extras, e.g. per-field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<serde_json::Value>>,
    /// Correlation ID for matching the response to server logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Box<str>>,
}

impl ApiError {
    pub fn new<C: Into<String>, M: Into<String>>(status: StatusCode, code: C, message: M) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
            details: None,
            trace_id: Self::current_trace_id(),
        }
    }

    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(Box::new(details.into()));
        self
    }

    /// The surrounding request's trace ID, or a short `corr-` ID when the
    /// error is built outside a traced request (tests, startup).
    fn current_trace_id() -> Option<Box<str>> {
        let id = match telemetry::current_trace_id() {
            Some(trace_id) => trace_id,
            None => format!("corr-{}", &uuid::Uuid::new_v4().to_string()[..8]),
        };
        Some(id.into_boxed_str())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            axum::Json(self),
        )
            .into_response()
    }
}

/// True for duplicate-key failures on either backend. Postgres reports
/// SQLSTATE 23505; SQLite uses extended codes 1555 and 2067.
fn is_unique_violation(error: &sea_orm::DbErr) -> bool {
    use sea_orm::RuntimeErr;

    let sqlx_err = match error {
        sea_orm::DbErr::Query(RuntimeErr::SqlxError(e))
        | sea_orm::DbErr::Exec(RuntimeErr::SqlxError(e)) => e,
        _ => return false,
    };
    let Some(db_error) = sqlx_err.as_database_error() else {
        return false;
    };
    if db_error.is_unique_violation() {
        return true;
    }
    matches!(
        db_error.code().as_deref(),
        Some("23505" | "1555" | "2067")
    )
}

impl From<WorkflowError> for ApiError {
    fn from(error: WorkflowError) -> Self {
        let (status, code, message) = match error {
            WorkflowError::Authorization(m) => (StatusCode::FORBIDDEN, "FORBIDDEN", m),
            WorkflowError::NotFound(m) => (StatusCode::NOT_FOUND, "NOT_FOUND", m),
            WorkflowError::Validation(m) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", m),
            WorkflowError::State(m) => (StatusCode::CONFLICT, "STATE_CONFLICT", m),
            WorkflowError::Upload(m) => (StatusCode::UNPROCESSABLE_ENTITY, "UPLOAD_FAILED", m),
            WorkflowError::Remote(db_err) => return db_err.into(),
        };
        Self::new(status, code, message)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        tracing::error!(?error, "Unhandled internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "An internal error occurred",
        )
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON: {err}"),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {err}"),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            _ => "Invalid request body".to_string(),
        };
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(error: sea_orm::DbErr) -> Self {
        if is_unique_violation(&error) {
            tracing::debug!(?error, "Unique constraint violation");
            return Self::new(StatusCode::CONFLICT, "CONFLICT", "Resource already exists");
        }

        match error {
            sea_orm::DbErr::RecordNotFound(record) => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Record not found: {record}"),
            ),
            sea_orm::DbErr::Conn(err) => {
                tracing::error!(?err, "Database connection error");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Database service unavailable",
                )
            }
            other => {
                tracing::error!(error = ?other, "Database error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Database error occurred",
                )
            }
        }
    }
}

/// 401 with an optional custom message.
pub fn unauthorized(message: Option<&str>) -> ApiError {
    ApiError::new(
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED",
        message.unwrap_or("Authentication required"),
    )
}

/// 401 carrying the trace ID the middleware already generated, so the
/// rejection and the request log line correlate.
pub fn unauthorized_with_trace_id(message: Option<&str>, trace_id: String) -> ApiError {
    let mut error = unauthorized(message);
    error.trace_id = Some(trace_id.into_boxed_str());
    error
}

/// 400 with per-field details attached.
pub fn validation_error(message: &str, field_errors: serde_json::Value) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message).with_details(field_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn new_fills_code_message_and_no_details() {
        let error = ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "Test error message",
        );

        assert_eq!(error.code.as_ref(), "VALIDATION_FAILED");
        assert_eq!(error.message.as_ref(), "Test error message");
        assert!(error.details.is_none());
    }

    #[test]
    fn workflow_errors_map_to_their_statuses() {
        let cases: Vec<(WorkflowError, StatusCode, &str)> = vec![
            (
                WorkflowError::Authorization("nope".to_string()),
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
            ),
            (
                WorkflowError::NotFound("tenancy gone".to_string()),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                WorkflowError::Validation("missing description".to_string()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
            ),
            (
                WorkflowError::State("already final".to_string()),
                StatusCode::CONFLICT,
                "STATE_CONFLICT",
            ),
            (
                WorkflowError::Upload("too big".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "UPLOAD_FAILED",
            ),
        ];

        for (source, status, code) in cases {
            let api_error: ApiError = source.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.code.as_ref(), code);
        }
    }

    #[test]
    fn workflow_messages_pass_through_unchanged() {
        let api_error: ApiError =
            WorkflowError::State("inspection abc is already finalized".to_string()).into();
        assert_eq!(
            api_error.message.as_ref(),
            "inspection abc is already finalized"
        );
    }

    #[test]
    fn responses_use_problem_json() {
        let response = ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", "Test error")
            .into_response();

        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
    }

    #[test]
    fn status_survives_into_response() {
        let response = ApiError::new(StatusCode::CONFLICT, "CONFLICT", "Resource already exists")
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn untraced_errors_fall_back_to_a_corr_id() {
        let error = ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "Test error",
        );

        let trace_id = error.trace_id.unwrap();
        assert!(trace_id.starts_with("corr-"));
        assert_eq!(trace_id.len(), "corr-".len() + 8);
    }

    #[test]
    fn record_not_found_maps_to_404() {
        let api_error: ApiError =
            sea_orm::DbErr::RecordNotFound("test_record".to_string()).into();

        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.code.as_ref(), "NOT_FOUND");
        assert!(api_error.message.contains("test_record"));
    }

    #[test]
    fn unauthorized_helper_uses_default_and_custom_messages() {
        let default = unauthorized(None);
        assert_eq!(default.status, StatusCode::UNAUTHORIZED);
        assert_eq!(default.message.as_ref(), "Authentication required");

        let custom = unauthorized(Some("Invalid token"));
        assert_eq!(custom.message.as_ref(), "Invalid token");
    }

    #[test]
    fn validation_helper_attaches_field_details() {
        let field_errors = json!({
            "damage_description": "Required when damage is reported"
        });

        let error = validation_error("Validation failed", field_errors.clone());

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.code.as_ref(), "VALIDATION_FAILED");
        assert_eq!(error.details, Some(Box::new(field_errors)));
        assert!(error.trace_id.is_some());
    }
}
