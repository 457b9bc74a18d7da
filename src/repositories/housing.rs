//! Housing repository: houses, rooms and coordinator assignments.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::models::house::{self, Entity as House};
use crate::models::house_coordinator::{self, Entity as HouseCoordinator};
use crate::models::room::{self, Entity as Room};
use crate::workflow::WorkflowError;

/// Request data for creating a house
#[derive(Debug, Clone)]
pub struct CreateHouseRequest {
    pub name: String,
    pub address: Option<String>,
}

/// Request data for creating a room within a house
#[derive(Debug, Clone)]
pub struct CreateRoomRequest {
    pub house_id: Uuid,
    pub label: String,
    pub capacity: i16,
}

/// Repository for house, room and coordinator-assignment operations
#[derive(Debug, Clone)]
pub struct HousingRepository {
    db: Arc<DatabaseConnection>,
}

impl HousingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create_house(
        &self,
        request: CreateHouseRequest,
    ) -> Result<house::Model, WorkflowError> {
        if request.name.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "house name cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let row = house::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name.trim().to_string()),
            address: Set(request.address),
            active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(row.insert(&*self.db).await?)
    }

    pub async fn list_houses(&self) -> Result<Vec<house::Model>, WorkflowError> {
        Ok(House::find()
            .order_by_asc(house::Column::Name)
            .all(&*self.db)
            .await?)
    }

    pub async fn get_house(&self, house_id: Uuid) -> Result<Option<house::Model>, WorkflowError> {
        Ok(House::find_by_id(house_id).one(&*self.db).await?)
    }

    pub async fn create_room(
        &self,
        request: CreateRoomRequest,
    ) -> Result<room::Model, WorkflowError> {
        if request.label.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "room label cannot be empty".to_string(),
            ));
        }
        if !matches!(request.capacity, 1 | 2) {
            return Err(WorkflowError::Validation(format!(
                "room capacity must be 1 or 2, got {}",
                request.capacity
            )));
        }
        self.get_house(request.house_id).await?.ok_or_else(|| {
            WorkflowError::NotFound(format!("house {} not found", request.house_id))
        })?;

        let now = Utc::now();
        let row = room::ActiveModel {
            id: Set(Uuid::new_v4()),
            house_id: Set(request.house_id),
            label: Set(request.label.trim().to_string()),
            capacity: Set(request.capacity),
            active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(row.insert(&*self.db).await?)
    }

    pub async fn get_room(&self, room_id: Uuid) -> Result<Option<room::Model>, WorkflowError> {
        Ok(Room::find_by_id(room_id).one(&*self.db).await?)
    }

    pub async fn list_rooms(&self, house_id: Uuid) -> Result<Vec<room::Model>, WorkflowError> {
        Ok(Room::find()
            .filter(room::Column::HouseId.eq(house_id))
            .order_by_asc(room::Column::Label)
            .all(&*self.db)
            .await?)
    }

    pub async fn assign_coordinator(
        &self,
        house_id: Uuid,
        coordinator_user_id: Uuid,
    ) -> Result<house_coordinator::Model, WorkflowError> {
        self.get_house(house_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("house {house_id} not found")))?;

        let row = house_coordinator::ActiveModel {
            id: Set(Uuid::new_v4()),
            house_id: Set(house_id),
            coordinator_user_id: Set(coordinator_user_id),
            created_at: Set(Utc::now().into()),
        };
        Ok(row.insert(&*self.db).await?)
    }

    pub async fn remove_coordinator(
        &self,
        house_id: Uuid,
        coordinator_user_id: Uuid,
    ) -> Result<(), WorkflowError> {
        let assignment = HouseCoordinator::find()
            .filter(house_coordinator::Column::HouseId.eq(house_id))
            .filter(house_coordinator::Column::CoordinatorUserId.eq(coordinator_user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                WorkflowError::NotFound(format!(
                    "coordinator {coordinator_user_id} is not assigned to house {house_id}"
                ))
            })?;
        assignment.delete(&*self.db).await?;
        Ok(())
    }

    pub async fn list_coordinators(
        &self,
        house_id: Uuid,
    ) -> Result<Vec<house_coordinator::Model>, WorkflowError> {
        Ok(HouseCoordinator::find()
            .filter(house_coordinator::Column::HouseId.eq(house_id))
            .all(&*self.db)
            .await?)
    }

    /// Whether `coordinator_user_id` is assigned to the house owning `room_id`.
    pub async fn coordinates_room(
        &self,
        coordinator_user_id: Uuid,
        room_id: Uuid,
    ) -> Result<bool, WorkflowError> {
        let room = self
            .get_room(room_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("room {room_id} not found")))?;

        let assignment = HouseCoordinator::find()
            .filter(house_coordinator::Column::HouseId.eq(room.house_id))
            .filter(house_coordinator::Column::CoordinatorUserId.eq(coordinator_user_id))
            .one(&*self.db)
            .await?;
        Ok(assignment.is_some())
    }

    /// All house ids the coordinator is assigned to.
    pub async fn houses_for_coordinator(
        &self,
        coordinator_user_id: Uuid,
    ) -> Result<Vec<Uuid>, WorkflowError> {
        let assignments = HouseCoordinator::find()
            .filter(house_coordinator::Column::CoordinatorUserId.eq(coordinator_user_id))
            .all(&*self.db)
            .await?;
        Ok(assignments.into_iter().map(|a| a.house_id).collect())
    }
}
