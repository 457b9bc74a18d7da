//! # Move-Out API Handlers
//!
//! Handlers for the move-out intention recorder and the coordinator review
//! queue, plus the evidence photo upload endpoint. Photos are compressed
//! server-side and stored before the intention referencing them is
//! submitted; only references travel in the intention payload.

use axum::{
    body::Bytes,
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
use crate::models::move_out_intention;
use crate::repositories::MoveOutIntentionRepository;
use crate::server::AppState;
use crate::storage::{self, PhotoCategory};
use crate::workflow::service::{MoveOutSubmission, ReviewDecision};
use crate::workflow::WorkflowError;

/// Request payload for declaring a move-out
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitIntentionDto {
    /// Planned last day (ISO 8601 date)
    #[schema(example = "2026-10-31")]
    pub planned_move_out_date: NaiveDate,
    pub notes: Option<String>,
    pub rent_paid_up: bool,
    pub areas_cleaned: bool,
    pub has_damage: bool,
    /// Required when has_damage is true
    pub damage_description: Option<String>,
    /// Up to 10 stored photo references
    #[serde(default)]
    pub key_area_photos: Vec<String>,
    /// Up to 10 stored photo references
    #[serde(default)]
    pub damage_photos: Vec<String>,
}

/// Response payload describing a move-out intention
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntentionDto {
    pub id: Uuid,
    pub tenancy_id: Uuid,
    pub planned_move_out_date: NaiveDate,
    pub notes: Option<String>,
    pub rent_paid_up: bool,
    pub areas_cleaned: bool,
    pub has_damage: bool,
    pub damage_description: Option<String>,
    pub key_area_photos: Vec<String>,
    pub damage_photos: Vec<String>,
    /// PENDING, APPROVED or REJECTED
    #[schema(example = "PENDING")]
    pub sign_off_status: String,
    pub coordinator_notes: Option<String>,
    pub coordinator_signed_off_by: Option<Uuid>,
    pub coordinator_signed_off_at: Option<String>,
    pub submitted_at: String,
}

impl From<move_out_intention::Model> for IntentionDto {
    fn from(row: move_out_intention::Model) -> Self {
        let (key_area_photos, damage_photos) = MoveOutIntentionRepository::photo_refs(&row);
        Self {
            id: row.id,
            tenancy_id: row.tenancy_id,
            planned_move_out_date: row.planned_move_out_date,
            notes: row.notes,
            rent_paid_up: row.rent_paid_up,
            areas_cleaned: row.areas_cleaned,
            has_damage: row.has_damage,
            damage_description: row.damage_description,
            key_area_photos,
            damage_photos,
            sign_off_status: row.sign_off_status,
            coordinator_notes: row.coordinator_notes,
            coordinator_signed_off_by: row.coordinator_signed_off_by,
            coordinator_signed_off_at: row.coordinator_signed_off_at.map(|at| at.to_rfc3339()),
            submitted_at: row.submitted_at.to_rfc3339(),
        }
    }
}

/// Request payload for the coordinator's sign-off decision
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewIntentionDto {
    /// APPROVE or REJECT
    #[schema(example = "APPROVE")]
    pub decision: String,
    /// Required for both decisions
    pub coordinator_notes: String,
}

/// Response payload for a stored photo
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PhotoUploadResponseDto {
    /// Reference to persist in the intention payload
    #[schema(example = "local:///damage/5f6f.../1756200000000-00ab.jpg")]
    pub reference: String,
    /// Stored size after compression, in bytes
    pub bytes: usize,
}

/// Declare a move-out for the caller's tenancy (tenant)
#[utoipa::path(
    post,
    path = "/api/v1/tenancies/{id}/move-out-intention",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenancy UUID")),
    request_body = SubmitIntentionDto,
    responses(
        (status = 201, description = "Intention recorded, tenancy is MOVE_OUT_INTENDED", body = IntentionDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Not the caller's tenancy", body = ApiError),
        (status = 404, description = "No such tenancy", body = ApiError),
        (status = 409, description = "Tenancy not in OCCUPIED state", body = ApiError)
    ),
    tag = "move-out"
)]
pub async fn submit_intention(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(tenancy_id): Path<Uuid>,
    Json(request): Json<SubmitIntentionDto>,
) -> Result<(StatusCode, Json<IntentionDto>), ApiError> {
    let created = state
        .lifecycle
        .submit_move_out_intention(
            &caller,
            tenancy_id,
            MoveOutSubmission {
                planned_move_out_date: request.planned_move_out_date,
                notes: request.notes,
                rent_paid_up: request.rent_paid_up,
                areas_cleaned: request.areas_cleaned,
                has_damage: request.has_damage,
                damage_description: request.damage_description,
                key_area_photos: request.key_area_photos,
                damage_photos: request.damage_photos,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Pending move-out intentions in the caller's houses (coordinator)
#[utoipa::path(
    get,
    path = "/api/v1/move-out-intentions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending intentions scoped to the caller's houses", body = [IntentionDto]),
        (status = 403, description = "Caller is not a coordinator", body = ApiError)
    ),
    tag = "move-out"
)]
pub async fn list_intentions(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
) -> Result<Json<Vec<IntentionDto>>, ApiError> {
    let intentions = state.lifecycle.reviews_for_coordinator(&caller).await?;
    Ok(Json(intentions.into_iter().map(IntentionDto::from).collect()))
}

/// Approve or reject a move-out intention (coordinator)
#[utoipa::path(
    post,
    path = "/api/v1/move-out-intentions/{id}/review",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Intention UUID")),
    request_body = ReviewIntentionDto,
    responses(
        (status = 200, description = "Decision recorded", body = IntentionDto),
        (status = 400, description = "Missing notes or unknown decision", body = ApiError),
        (status = 403, description = "Caller does not coordinate this house", body = ApiError),
        (status = 404, description = "No such intention", body = ApiError),
        (status = 409, description = "Already signed off", body = ApiError)
    ),
    tag = "move-out"
)]
pub async fn review_intention(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(intention_id): Path<Uuid>,
    Json(request): Json<ReviewIntentionDto>,
) -> Result<Json<IntentionDto>, ApiError> {
    let decision = match request.decision.as_str() {
        "APPROVE" => ReviewDecision::Approve,
        "REJECT" => ReviewDecision::Reject,
        other => {
            return Err(WorkflowError::Validation(format!(
                "decision must be APPROVE or REJECT, got '{other}'"
            ))
            .into());
        }
    };

    let reviewed = state
        .lifecycle
        .review_move_out_intention(&caller, intention_id, decision, &request.coordinator_notes)
        .await?;
    Ok(Json(reviewed.into()))
}

/// Upload an evidence photo for a tenancy
///
/// The raw image body is compressed to a JPEG under the store ceiling, then
/// written to the named bucket. The returned reference goes into the
/// intention submission payload.
#[utoipa::path(
    post,
    path = "/api/v1/tenancies/{id}/photos/{category}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Tenancy UUID"),
        ("category" = String, Path, description = "Bucket: key-area or damage")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Photo stored", body = PhotoUploadResponseDto),
        (status = 400, description = "Unknown category", body = ApiError),
        (status = 422, description = "Image unreadable or over the size ceiling", body = ApiError)
    ),
    tag = "move-out"
)]
pub async fn upload_photo(
    State(state): State<AppState>,
    CallerExtension(_caller): CallerExtension,
    Path((tenancy_id, category)): Path<(Uuid, String)>,
    body: Bytes,
) -> Result<(StatusCode, Json<PhotoUploadResponseDto>), ApiError> {
    let category = PhotoCategory::parse(&category).map_err(ApiError::from)?;

    // JPEG re-encoding is CPU-bound; keep it off the async workers.
    let compressed = tokio::task::spawn_blocking(move || storage::compress_photo(&body))
        .await
        .map_err(|err| {
            ApiError::from(WorkflowError::Upload(format!("compression task failed: {err}")))
        })??;

    let stored_bytes = compressed.len();
    let reference = state
        .photos
        .put(category, tenancy_id, &compressed)
        .await?;

    tracing::info!(
        %tenancy_id,
        category = category.as_str(),
        bytes = stored_bytes,
        "Stored evidence photo"
    );

    Ok((
        StatusCode::CREATED,
        Json(PhotoUploadResponseDto {
            reference,
            bytes: stored_bytes,
        }),
    ))
}
