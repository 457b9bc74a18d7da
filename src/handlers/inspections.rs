//! # Inspection API Handlers
//!
//! Handlers for the inspection checklist engine: opening a draft
//! inspection, saving the checklist and finalizing it.

use std::collections::BTreeMap;

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
use crate::models::{inspection, inspection_checklist_item};
use crate::server::AppState;
use crate::workflow::checklist::{ChecklistAnswer, ChecklistAnswers, ChecklistKey};

/// One checklist entry in a save/finalize request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChecklistItemDto {
    pub yes_no: bool,
    /// Required when yes_no is false
    #[serde(default)]
    pub description: String,
}

/// Checklist payload keyed by the fixed item vocabulary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChecklistDto {
    /// Map of checklist key (e.g. "rent_paid") to answer
    pub items: BTreeMap<String, ChecklistItemDto>,
}

impl ChecklistDto {
    fn into_answers(self) -> Result<ChecklistAnswers, ApiError> {
        let mut answers = ChecklistAnswers::new();
        for (key, item) in self.items {
            let key = ChecklistKey::parse(&key).map_err(ApiError::from)?;
            answers.insert(
                key,
                ChecklistAnswer {
                    yes_no: item.yes_no,
                    description: item.description,
                },
            );
        }
        Ok(answers)
    }
}

/// Response payload describing an inspection and its checklist
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InspectionDto {
    pub id: Uuid,
    pub tenancy_id: Uuid,
    pub room_id: Uuid,
    pub created_by: Uuid,
    /// DRAFT or FINAL
    #[schema(example = "DRAFT")]
    pub status: String,
    pub finalized_at: Option<String>,
    pub checklist: BTreeMap<String, ChecklistItemDto>,
}

impl InspectionDto {
    fn from_parts(
        row: inspection::Model,
        items: Vec<inspection_checklist_item::Model>,
    ) -> Self {
        let checklist = items
            .into_iter()
            .map(|item| {
                (
                    item.key,
                    ChecklistItemDto {
                        yes_no: item.yes_no,
                        description: item.description_if_no.unwrap_or_default(),
                    },
                )
            })
            .collect();
        Self {
            id: row.id,
            tenancy_id: row.tenancy_id,
            room_id: row.room_id,
            created_by: row.created_by,
            status: row.status,
            finalized_at: row.finalized_at.map(|at| at.to_rfc3339()),
            checklist,
        }
    }
}

/// Open a draft inspection for a tenancy (coordinator)
#[utoipa::path(
    post,
    path = "/api/v1/tenancies/{id}/inspections",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenancy UUID")),
    responses(
        (status = 201, description = "Inspection opened, tenancy is MOVE_OUT_INSPECTION_DRAFT", body = InspectionDto),
        (status = 403, description = "Caller does not coordinate this house", body = ApiError),
        (status = 404, description = "No such tenancy", body = ApiError),
        (status = 409, description = "No reviewable intention, or bad tenancy state", body = ApiError)
    ),
    tag = "inspections"
)]
pub async fn create_inspection(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(tenancy_id): Path<Uuid>,
) -> Result<(StatusCode, Json<InspectionDto>), ApiError> {
    let created = state.lifecycle.create_inspection(&caller, tenancy_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(InspectionDto::from_parts(created, Vec::new())),
    ))
}

/// Get an inspection with its checklist
#[utoipa::path(
    get,
    path = "/api/v1/inspections/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Inspection UUID")),
    responses(
        (status = 200, description = "Inspection", body = InspectionDto),
        (status = 404, description = "No such inspection", body = ApiError)
    ),
    tag = "inspections"
)]
pub async fn get_inspection(
    State(state): State<AppState>,
    CallerExtension(_caller): CallerExtension,
    Path(id): Path<Uuid>,
) -> Result<Json<InspectionDto>, ApiError> {
    let row = state.lifecycle.inspections().require(id).await?;
    let items = state.lifecycle.inspections().checklist(id).await?;
    Ok(Json(InspectionDto::from_parts(row, items)))
}

/// Save the draft checklist, replacing any prior answers (coordinator)
#[utoipa::path(
    put,
    path = "/api/v1/inspections/{id}/checklist",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Inspection UUID")),
    request_body = ChecklistDto,
    responses(
        (status = 200, description = "Checklist saved", body = InspectionDto),
        (status = 400, description = "Item answered 'no' without a description", body = ApiError),
        (status = 403, description = "Caller does not coordinate this house", body = ApiError),
        (status = 404, description = "No such inspection", body = ApiError),
        (status = 409, description = "Inspection already finalized", body = ApiError)
    ),
    tag = "inspections"
)]
pub async fn save_checklist(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(id): Path<Uuid>,
    Json(request): Json<ChecklistDto>,
) -> Result<Json<InspectionDto>, ApiError> {
    let answers = request.into_answers()?;
    state.lifecycle.save_checklist(&caller, id, &answers).await?;

    let row = state.lifecycle.inspections().require(id).await?;
    let items = state.lifecycle.inspections().checklist(id).await?;
    Ok(Json(InspectionDto::from_parts(row, items)))
}

/// Validate the full checklist, lock the inspection and transition the
/// tenancy (coordinator)
#[utoipa::path(
    post,
    path = "/api/v1/inspections/{id}/finalize",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Inspection UUID")),
    request_body = ChecklistDto,
    responses(
        (status = 200, description = "Inspection is FINAL, tenancy is MOVE_OUT_INSPECTION_FINAL", body = InspectionDto),
        (status = 400, description = "Checklist incomplete", body = ApiError),
        (status = 403, description = "Caller does not coordinate this house", body = ApiError),
        (status = 404, description = "No such inspection", body = ApiError),
        (status = 409, description = "Inspection already finalized", body = ApiError)
    ),
    tag = "inspections"
)]
pub async fn finalize_inspection(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(id): Path<Uuid>,
    Json(request): Json<ChecklistDto>,
) -> Result<Json<InspectionDto>, ApiError> {
    let answers = request.into_answers()?;
    let finalized = state
        .lifecycle
        .finalize_inspection(&caller, id, &answers)
        .await?;

    let items = state.lifecycle.inspections().checklist(finalized.id).await?;
    Ok(Json(InspectionDto::from_parts(finalized, items)))
}
