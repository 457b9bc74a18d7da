//! # Move-In API Handlers
//!
//! Handlers for the incoming tenant: key receipt confirmation, the signed
//! move-in acknowledgement and the prior-tenant evidence read-side.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CallerExtension;
use crate::error::ApiError;
use crate::handlers::tenancies::TenancyDto;
use crate::server::AppState;

/// Request payload for completing move-in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompleteMoveInDto {
    /// Stored reference to the signature image; must be non-empty
    #[schema(example = "local:///key-area/5f6f.../signature.jpg")]
    pub signature_image_url: String,
}

/// Prior tenant's move-out evidence for a room
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriorEvidenceDto {
    pub notes: Option<String>,
    pub damage_description: Option<String>,
    pub key_area_photos: Vec<String>,
    pub damage_photos: Vec<String>,
}

/// Confirm that the keys were handed over (tenant)
#[utoipa::path(
    post,
    path = "/api/v1/tenancies/{id}/keys-received",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenancy UUID")),
    responses(
        (status = 200, description = "Keys marked received", body = TenancyDto),
        (status = 403, description = "Not the caller's tenancy", body = ApiError),
        (status = 404, description = "No such tenancy", body = ApiError)
    ),
    tag = "move-in"
)]
pub async fn confirm_keys_received(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(id): Path<Uuid>,
) -> Result<Json<TenancyDto>, ApiError> {
    let updated = state.lifecycle.confirm_keys_received(&caller, id).await?;
    Ok(Json(updated.into()))
}

/// Sign the move-in acknowledgement and take occupancy (tenant)
#[utoipa::path(
    post,
    path = "/api/v1/tenancies/{id}/move-in",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenancy UUID")),
    request_body = CompleteMoveInDto,
    responses(
        (status = 200, description = "Move-in complete, tenancy is OCCUPIED", body = TenancyDto),
        (status = 400, description = "Empty signature", body = ApiError),
        (status = 403, description = "Not the caller's tenancy", body = ApiError),
        (status = 404, description = "No such tenancy", body = ApiError),
        (status = 409, description = "Keys not confirmed, or no pending signature state", body = ApiError)
    ),
    tag = "move-in"
)]
pub async fn complete_move_in(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteMoveInDto>,
) -> Result<Json<TenancyDto>, ApiError> {
    let updated = state
        .lifecycle
        .complete_move_in(&caller, id, &request.signature_image_url)
        .await?;
    Ok(Json(updated.into()))
}

/// Previous tenant's move-out evidence for a room
///
/// Returns an empty payload when the room has no ended tenancy; absence of
/// prior evidence is not an error.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/previous-tenant-evidence",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Room UUID")),
    responses(
        (status = 200, description = "Prior evidence, possibly empty", body = PriorEvidenceDto)
    ),
    tag = "move-in"
)]
pub async fn previous_tenant_evidence(
    State(state): State<AppState>,
    CallerExtension(_caller): CallerExtension,
    Path(room_id): Path<Uuid>,
) -> Result<Json<PriorEvidenceDto>, ApiError> {
    let evidence = state
        .lifecycle
        .previous_tenant_evidence(room_id)
        .await?
        .unwrap_or_default();

    Ok(Json(PriorEvidenceDto {
        notes: evidence.notes,
        damage_description: evidence.damage_description,
        key_area_photos: evidence.key_area_photos,
        damage_photos: evidence.damage_photos,
    }))
}
