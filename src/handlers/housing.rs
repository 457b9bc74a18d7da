//! # Housing API Handlers
//!
//! Handlers for houses, rooms and coordinator assignments. All mutations
//! are admin-only; listing is open to any authenticated caller.

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
use crate::models::{house, room};
use crate::repositories::{CreateHouseRequest, CreateRoomRequest};
use crate::server::AppState;
use crate::workflow::UserRole;

/// Request payload for creating a house
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateHouseDto {
    /// Display name for the house
    #[schema(example = "Maple House")]
    pub name: String,
    /// Street address (optional)
    #[schema(example = "12 Maple Street")]
    pub address: Option<String>,
}

/// Response payload describing a house
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseDto {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub active: bool,
}

impl From<house::Model> for HouseDto {
    fn from(row: house::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            active: row.active,
        }
    }
}

/// Request payload for creating a room within a house
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRoomDto {
    /// Room label, unique within the house
    #[schema(example = "2B")]
    pub label: String,
    /// 1 for a single room, 2 for a shared room with A/B slots
    #[schema(example = 2)]
    pub capacity: i16,
}

/// Response payload describing a room
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: Uuid,
    pub house_id: Uuid,
    pub label: String,
    pub capacity: i16,
    pub active: bool,
}

impl From<room::Model> for RoomDto {
    fn from(row: room::Model) -> Self {
        Self {
            id: row.id,
            house_id: row.house_id,
            label: row.label,
            capacity: row.capacity,
            active: row.active,
        }
    }
}

/// Request payload for assigning a coordinator to a house
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignCoordinatorDto {
    /// Profile id of the coordinator
    pub coordinator_user_id: Uuid,
}

/// Create a house (admin)
#[utoipa::path(
    post,
    path = "/api/v1/houses",
    security(("bearer_auth" = [])),
    request_body = CreateHouseDto,
    responses(
        (status = 201, description = "House created", body = HouseDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Caller is not an admin", body = ApiError)
    ),
    tag = "housing"
)]
pub async fn create_house(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Json(request): Json<CreateHouseDto>,
) -> Result<(StatusCode, Json<HouseDto>), ApiError> {
    let created = state
        .lifecycle
        .create_house(
            &caller,
            CreateHouseRequest {
                name: request.name,
                address: request.address,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List houses
#[utoipa::path(
    get,
    path = "/api/v1/houses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All houses", body = [HouseDto])
    ),
    tag = "housing"
)]
pub async fn list_houses(
    State(state): State<AppState>,
    CallerExtension(_caller): CallerExtension,
) -> Result<Json<Vec<HouseDto>>, ApiError> {
    let houses = state.lifecycle.housing().list_houses().await?;
    Ok(Json(houses.into_iter().map(HouseDto::from).collect()))
}

/// Create a room in a house (admin)
#[utoipa::path(
    post,
    path = "/api/v1/houses/{id}/rooms",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "House UUID")),
    request_body = CreateRoomDto,
    responses(
        (status = 201, description = "Room created", body = RoomDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Caller is not an admin", body = ApiError),
        (status = 404, description = "No such house", body = ApiError)
    ),
    tag = "housing"
)]
pub async fn create_room(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(house_id): Path<Uuid>,
    Json(request): Json<CreateRoomDto>,
) -> Result<(StatusCode, Json<RoomDto>), ApiError> {
    let created = state
        .lifecycle
        .create_room(
            &caller,
            CreateRoomRequest {
                house_id,
                label: request.label,
                capacity: request.capacity,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List the rooms of a house
#[utoipa::path(
    get,
    path = "/api/v1/houses/{id}/rooms",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "House UUID")),
    responses(
        (status = 200, description = "Rooms of the house", body = [RoomDto])
    ),
    tag = "housing"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    CallerExtension(_caller): CallerExtension,
    Path(house_id): Path<Uuid>,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    let rooms = state.lifecycle.housing().list_rooms(house_id).await?;
    Ok(Json(rooms.into_iter().map(RoomDto::from).collect()))
}

/// Response payload describing a coordinator assignment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CoordinatorDto {
    pub house_id: Uuid,
    pub coordinator_user_id: Uuid,
}

/// List the coordinators assigned to a house
#[utoipa::path(
    get,
    path = "/api/v1/houses/{id}/coordinators",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "House UUID")),
    responses(
        (status = 200, description = "Coordinator assignments", body = [CoordinatorDto])
    ),
    tag = "housing"
)]
pub async fn list_coordinators(
    State(state): State<AppState>,
    CallerExtension(_caller): CallerExtension,
    Path(house_id): Path<Uuid>,
) -> Result<Json<Vec<CoordinatorDto>>, ApiError> {
    let assignments = state
        .lifecycle
        .housing()
        .list_coordinators(house_id)
        .await?;
    Ok(Json(
        assignments
            .into_iter()
            .map(|a| CoordinatorDto {
                house_id: a.house_id,
                coordinator_user_id: a.coordinator_user_id,
            })
            .collect(),
    ))
}

/// Assign a coordinator to a house (admin)
#[utoipa::path(
    post,
    path = "/api/v1/houses/{id}/coordinators",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "House UUID")),
    request_body = AssignCoordinatorDto,
    responses(
        (status = 201, description = "Coordinator assigned"),
        (status = 403, description = "Caller is not an admin", body = ApiError),
        (status = 404, description = "No such house", body = ApiError),
        (status = 409, description = "Already assigned", body = ApiError)
    ),
    tag = "housing"
)]
pub async fn assign_coordinator(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path(house_id): Path<Uuid>,
    Json(request): Json<AssignCoordinatorDto>,
) -> Result<StatusCode, ApiError> {
    state
        .lifecycle
        .assign_coordinator(&caller, house_id, request.coordinator_user_id)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Remove a coordinator assignment (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/houses/{id}/coordinators/{user_id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "House UUID"),
        ("user_id" = Uuid, Path, description = "Coordinator profile UUID")
    ),
    responses(
        (status = 204, description = "Assignment removed"),
        (status = 403, description = "Caller is not an admin", body = ApiError),
        (status = 404, description = "No such assignment", body = ApiError)
    ),
    tag = "housing"
)]
pub async fn remove_coordinator(
    State(state): State<AppState>,
    CallerExtension(caller): CallerExtension,
    Path((house_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    caller
        .require_role(UserRole::Admin)
        .map_err(ApiError::from)?;
    state
        .lifecycle
        .housing()
        .remove_coordinator(house_id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
