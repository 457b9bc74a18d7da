//! # Authentication and Authorization
//!
//! Service bearer authentication plus acting-user resolution for protected
//! API endpoints. The `X-User-Id` header names the acting user; their role
//! is read from the profile row, never from the request, and the resulting
//! [`Caller`] is attached to the request for handlers to extract.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized, unauthorized_with_trace_id, validation_error};
use crate::repositories::ProfileRepository;
use crate::server::AppState;
use crate::telemetry::TraceContext;
use crate::workflow::{Caller, UserRole};

/// Extractor for the authenticated caller from request extensions
#[derive(Debug, Clone, Copy)]
pub struct CallerExtension(pub Caller);

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Authentication middleware that validates bearer tokens and resolves the
/// acting user from the `X-User-Id` header against the profiles table.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = request.headers().clone();

    // Extract trace_id from request context for consistent error responses
    let trace_id = request
        .extensions()
        .get::<TraceContext>()
        .map(|ctx| ctx.trace_id.clone());

    let token = extract_bearer_token_with_trace_id(&headers, trace_id)?;
    validate_token(&state.config, token)?;

    let user_id = extract_user_id(&headers)?;
    let profiles = ProfileRepository::new(Arc::clone(&state.db));
    let profile = profiles
        .get_by_id(user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| unauthorized(Some("Unknown user")))?;
    let role = UserRole::parse(&profile.role).map_err(ApiError::from)?;

    let caller = Caller::new(profile.id, role);
    tracing::info!(user_id = %caller.user_id, role = caller.role.as_str(), "Authenticated request");

    let mut request = request;
    request.extensions_mut().insert(CallerExtension(caller));

    Ok(next.run(request).await)
}

fn extract_bearer_token_with_trace_id(
    headers: &HeaderMap,
    trace_id: Option<String>,
) -> Result<&str, ApiError> {
    let fail = |message: &str| match trace_id.clone() {
        Some(trace_id) => unauthorized_with_trace_id(Some(message), trace_id),
        None => unauthorized(Some(message)),
    };

    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| fail("Missing Authorization header"))?
        .to_str()
        .map_err(|_| fail("Invalid Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| fail("Authorization header must use Bearer scheme"))
}

fn validate_token(config: &AppConfig, token: &str) -> Result<(), ApiError> {
    let is_valid = config
        .service_tokens
        .iter()
        .any(|configured| ConstantTimeEq::ct_eq(token.as_bytes(), configured.as_bytes()).into());

    if is_valid {
        Ok(())
    } else {
        Err(unauthorized(Some("Invalid bearer token")))
    }
}

fn extract_user_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let header_value = headers
        .get("X-User-Id")
        .ok_or_else(|| {
            validation_error(
                "Missing required header",
                serde_json::json!({ "X-User-Id": "Required header is missing" }),
            )
        })?
        .to_str()
        .map_err(|_| {
            validation_error(
                "Invalid user header",
                serde_json::json!({ "X-User-Id": "Header must be valid UTF-8" }),
            )
        })?;

    header_value.parse::<Uuid>().map_err(|_| {
        validation_error(
            "Invalid user ID",
            serde_json::json!({ "X-User-Id": "Must be a valid UUID" }),
        )
    })
}

/// OpenAPI header parameter for X-User-Id
#[derive(Debug, Serialize, Deserialize, IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Header)]
pub struct UserHeader {
    /// Acting user identifier (UUID); the role is resolved from their profile
    #[serde(rename = "X-User-Id")]
    #[param(rename = "X-User-Id", value_type = String)]
    pub user_id: String,
}

impl<S> FromRequestParts<S> for CallerExtension
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerExtension>()
            .copied()
            .ok_or_else(|| unauthorized(Some("Caller context missing")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_tokens(tokens: &[&str]) -> AppConfig {
        AppConfig {
            service_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer secret-token".parse().unwrap());
        let token = extract_bearer_token_with_trace_id(&headers, None).unwrap();
        assert_eq!(token, "secret-token");
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dGVzdDoxMjM=".parse().unwrap());
        let err = extract_bearer_token_with_trace_id(&headers, None).unwrap_err();
        assert_eq!(err.code.as_ref(), "UNAUTHORIZED");
    }

    #[test]
    fn token_validation_accepts_any_configured_token() {
        let config = config_with_tokens(&["one", "two"]);
        assert!(validate_token(&config, "one").is_ok());
        assert!(validate_token(&config, "two").is_ok());
        assert!(validate_token(&config, "three").is_err());
    }

    #[test]
    fn user_header_must_be_a_uuid() {
        let mut headers = HeaderMap::new();
        headers.insert("X-User-Id", "not-a-uuid".parse().unwrap());
        let err = extract_user_id(&headers).unwrap_err();
        assert_eq!(err.code.as_ref(), "VALIDATION_FAILED");

        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert("X-User-Id", id.to_string().parse().unwrap());
        assert_eq!(extract_user_id(&headers).unwrap(), id);
    }
}
