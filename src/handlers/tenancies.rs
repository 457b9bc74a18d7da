//! # Tenancy API Handlers
//!
//! Handlers for administrative tenancy management: opening tenancies,
//! reading them back and the End Tenancy escape hatch.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CallerExtension;
use crate::error::ApiError;
use crate::models::tenancy;
use crate::server::AppState;
use crate::workflow::service::NewTenancy;
use crate::workflow::{RoomSlot, UserRole, WorkflowError};

/// Request payload for opening a tenancy
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTenancyDto {
    pub room_id: Uuid,
    /// "A" or "B" for two-person rooms; omit for single rooms
    #[schema(example = "A")]
    pub slot: Option<String>,
    pub tenant_user_id: Uuid,
    /// First day of the tenancy (ISO 8601 date)
    #[schema(example = "2026-09-01")]
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Monthly rent (optional)
    #[schema(example = 650.0)]
    pub rental_price: Option<f64>,
    /// When true the tenancy opens awaiting the move-in signature rather
    /// than immediately OCCUPIED
    #[serde(default)]
    pub pending_signature: bool,
}

/// Response payload describing a tenancy
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TenancyDto {
    pub id: Uuid,
    pub room_id: Uuid,
    pub slot: Option<String>,
    pub tenant_user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status
    #[schema(example = "OCCUPIED")]
    pub status: String,
    pub rental_price: Option<f64>,
    pub keys_received: bool,
    pub keys_received_at: Option<String>,
}

impl From<tenancy::Model> for TenancyDto {
    fn from(row: tenancy::Model) -> Self {
        Self {
            id: row.id,
            room_id: row.room_id,
            slot: row.slot,
            tenant_user_id: row.tenant_user_id,
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status,
            rental_price: row.rental_price,
            keys_received: row.keys_received,
            keys_received_at: row.keys_received_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// Open a tenancy (admin)
#[utoipa::path(
    post,
    path = "/api/v1/tenancies",
    security(("bearer_auth" = [])),
    request_body = CreateTenancyDto,
    responses(
        (status = 201, description = "Tenancy opened", body = TenancyDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Caller is not an admin", body = ApiError),
        (status = 404, description = "No such room", body = ApiError),
        (status = 409, description = "Room slot already occupied", body = ApiError)
    ),
    tag = "tenancies"
)]
pub async fn create_tenancy(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Json(request): Json<CreateTenancyDto>,
) -> Result<(StatusCode, Json<TenancyDto>), ApiError> {
    let slot = request
        .slot
        .as_deref()
        .map(RoomSlot::parse)
        .transpose()
        .map_err(ApiError::from)?;

    let created = state
        .lifecycle
        .create_tenancy(
            &caller,
            NewTenancy {
                room_id: request.room_id,
                slot,
                tenant_user_id: request.tenant_user_id,
                start_date: request.start_date,
                end_date: request.end_date,
                rental_price: request.rental_price,
                pending_signature: request.pending_signature,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List all tenancies (admin)
#[utoipa::path(
    get,
    path = "/api/v1/tenancies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tenancies", body = [TenancyDto]),
        (status = 403, description = "Caller is not an admin", body = ApiError)
    ),
    tag = "tenancies"
)]
pub async fn list_tenancies(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
) -> Result<Json<Vec<TenancyDto>>, ApiError> {
    caller
        .require_role(UserRole::Admin)
        .map_err(ApiError::from)?;
    let tenancies = state.lifecycle.tenancies().list_all().await?;
    Ok(Json(tenancies.into_iter().map(TenancyDto::from).collect()))
}

/// The caller's own current tenancy (tenant)
#[utoipa::path(
    get,
    path = "/api/v1/my-tenancy",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's most recent tenancy", body = TenancyDto),
        (status = 403, description = "Caller is not a tenant", body = ApiError),
        (status = 404, description = "Caller has no tenancy", body = ApiError)
    ),
    tag = "tenancies"
)]
pub async fn my_tenancy(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
) -> Result<Json<TenancyDto>, ApiError> {
    caller
        .require_role(UserRole::Tenant)
        .map_err(ApiError::from)?;
    let tenancy = state
        .lifecycle
        .tenancies()
        .latest_for_tenant(caller.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::from(WorkflowError::NotFound(
                "the caller has no tenancy".to_string(),
            ))
        })?;
    Ok(Json(tenancy.into()))
}

/// Get a tenancy by id
#[utoipa::path(
    get,
    path = "/api/v1/tenancies/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenancy UUID")),
    responses(
        (status = 200, description = "Tenancy", body = TenancyDto),
        (status = 403, description = "Not the caller's tenancy", body = ApiError),
        (status = 404, description = "No such tenancy", body = ApiError)
    ),
    tag = "tenancies"
)]
pub async fn get_tenancy(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(id): Path<Uuid>,
) -> Result<Json<TenancyDto>, ApiError> {
    let tenancy = state.lifecycle.tenancies().require(id).await?;

    // Tenants may only read their own tenancy.
    if caller.role == UserRole::Tenant && tenancy.tenant_user_id != caller.user_id {
        return Err(WorkflowError::Authorization(format!(
            "tenancy {id} does not belong to the caller"
        ))
        .into());
    }

    Ok(Json(tenancy.into()))
}

/// End a tenancy immediately, bypassing the inspection pipeline (admin)
#[utoipa::path(
    post,
    path = "/api/v1/tenancies/{id}/end",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenancy UUID")),
    responses(
        (status = 200, description = "Tenancy ended", body = TenancyDto),
        (status = 403, description = "Caller is not an admin", body = ApiError),
        (status = 404, description = "No such tenancy", body = ApiError),
        (status = 409, description = "Tenancy already ended", body = ApiError)
    ),
    tag = "tenancies"
)]
pub async fn end_tenancy(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(id): Path<Uuid>,
) -> Result<Json<TenancyDto>, ApiError> {
    let ended = state.lifecycle.end_tenancy(&caller, id).await?;
    Ok(Json(ended.into()))
}
