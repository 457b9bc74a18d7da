//! # Profile API Handlers
//!
//! Handlers for user profile creation and lookup. Profile creation is an
//! administrative operation; the role written here is what the auth
//! middleware later resolves for the user.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CallerExtension;
use crate::error::ApiError;
use crate::models::profile;
use crate::repositories::{CreateProfileRequest, ProfileRepository};
use crate::server::AppState;
use crate::workflow::{UserRole, WorkflowError};

/// Request payload for creating a profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProfileDto {
    /// Login email, unique across profiles
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Display name
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Role claim: ADMIN, COORDINATOR or TENANT
    #[schema(example = "TENANT")]
    pub role: String,
}

/// Response payload describing a profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    /// Unique identifier (UUID)
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[schema(example = "TENANT")]
    pub role: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl From<profile::Model> for ProfileDto {
    fn from(row: profile::Model) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Create a profile (admin)
#[utoipa::path(
    post,
    path = "/api/v1/profiles",
    security(("bearer_auth" = [])),
    request_body = CreateProfileDto,
    responses(
        (status = 201, description = "Profile created", body = ProfileDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Caller is not an admin", body = ApiError),
        (status = 409, description = "Email already registered", body = ApiError)
    ),
    tag = "profiles"
)]
pub async fn create_profile(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Json(request): Json<CreateProfileDto>,
) -> Result<(StatusCode, Json<ProfileDto>), ApiError> {
    caller
        .require_role(UserRole::Admin)
        .map_err(ApiError::from)?;
    let role = UserRole::parse(&request.role).map_err(ApiError::from)?;

    let repo = ProfileRepository::new(Arc::clone(&state.db));
    let created = repo
        .create(CreateProfileRequest {
            email: request.email,
            name: request.name,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List all profiles (admin)
#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All profiles", body = [ProfileDto]),
        (status = 403, description = "Caller is not an admin", body = ApiError)
    ),
    tag = "profiles"
)]
pub async fn list_profiles(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
) -> Result<Json<Vec<ProfileDto>>, ApiError> {
    caller
        .require_role(UserRole::Admin)
        .map_err(ApiError::from)?;

    let repo = ProfileRepository::new(Arc::clone(&state.db));
    let profiles = repo.list().await?;
    Ok(Json(profiles.into_iter().map(ProfileDto::from).collect()))
}

/// Get a profile by id
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Profile UUID")),
    responses(
        (status = 200, description = "Profile", body = ProfileDto),
        (status = 404, description = "No such profile", body = ApiError)
    ),
    tag = "profiles"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    CallerExtension(_caller): CallerExtension,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileDto>, ApiError> {
    let repo = ProfileRepository::new(Arc::clone(&state.db));
    let found = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::from(WorkflowError::NotFound(format!("profile {id} not found"))))?;
    Ok(Json(found.into()))
}
