//! Tenancy repository for database operations.
//!
//! Status writes go through [`TenancyRepository::set_status`], which takes the
//! parsed enum value; out-of-vocabulary strings cannot reach the store.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::models::tenancy::{self, Entity as Tenancy};
use crate::workflow::{RoomSlot, TenancyStatus, WorkflowError};

/// Request data for creating a tenancy
#[derive(Debug, Clone)]
pub struct CreateTenancyRequest {
    pub room_id: Uuid,
    pub slot: Option<RoomSlot>,
    pub tenant_user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rental_price: Option<f64>,
    /// Initial lifecycle status; OCCUPIED for an in-place tenant,
    /// MOVE_IN_PENDING_SIGNATURE for an incoming one.
    pub status: TenancyStatus,
}

/// Repository for tenancy database operations
#[derive(Debug, Clone)]
pub struct TenancyRepository {
    db: Arc<DatabaseConnection>,
}

impl TenancyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        request: CreateTenancyRequest,
    ) -> Result<tenancy::Model, WorkflowError> {
        let now = Utc::now();
        let row = tenancy::ActiveModel {
            id: Set(Uuid::new_v4()),
            room_id: Set(request.room_id),
            slot: Set(request.slot.map(|s| s.as_str().to_string())),
            tenant_user_id: Set(request.tenant_user_id),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            status: Set(request.status.as_str().to_string()),
            rental_price: Set(request.rental_price),
            keys_received: Set(false),
            keys_received_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(row.insert(&*self.db).await?)
    }

    pub async fn get(&self, tenancy_id: Uuid) -> Result<Option<tenancy::Model>, WorkflowError> {
        Ok(Tenancy::find_by_id(tenancy_id).one(&*self.db).await?)
    }

    /// Fetch a tenancy or fail with NotFound.
    pub async fn require(&self, tenancy_id: Uuid) -> Result<tenancy::Model, WorkflowError> {
        self.get(tenancy_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("tenancy {tenancy_id} not found")))
    }

    pub async fn list_all(&self) -> Result<Vec<tenancy::Model>, WorkflowError> {
        Ok(Tenancy::find()
            .order_by_desc(tenancy::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    /// Non-terminal tenancies occupying the given room, optionally narrowed
    /// to one slot. Used to enforce the one-active-occupancy invariant.
    pub async fn active_for_room(
        &self,
        room_id: Uuid,
        slot: Option<RoomSlot>,
    ) -> Result<Vec<tenancy::Model>, WorkflowError> {
        let mut query = Tenancy::find()
            .filter(tenancy::Column::RoomId.eq(room_id))
            .filter(tenancy::Column::Status.ne(TenancyStatus::Ended.as_str()));
        if let Some(slot) = slot {
            query = query.filter(tenancy::Column::Slot.eq(slot.as_str()));
        }
        Ok(query.all(&*self.db).await?)
    }

    /// The caller's most recent tenancy, whatever its lifecycle state.
    pub async fn latest_for_tenant(
        &self,
        tenant_user_id: Uuid,
    ) -> Result<Option<tenancy::Model>, WorkflowError> {
        Ok(Tenancy::find()
            .filter(tenancy::Column::TenantUserId.eq(tenant_user_id))
            .order_by_desc(tenancy::Column::CreatedAt)
            .one(&*self.db)
            .await?)
    }

    /// Most recent ENDED tenancy for a room, used to surface prior evidence
    /// to the incoming tenant.
    pub async fn most_recent_ended_for_room(
        &self,
        room_id: Uuid,
    ) -> Result<Option<tenancy::Model>, WorkflowError> {
        Ok(Tenancy::find()
            .filter(tenancy::Column::RoomId.eq(room_id))
            .filter(tenancy::Column::Status.eq(TenancyStatus::Ended.as_str()))
            .order_by_desc(tenancy::Column::EndDate)
            .one(&*self.db)
            .await?)
    }

    /// Writes the next lifecycle status. The caller is responsible for having
    /// checked the transition against the current status.
    pub async fn set_status(
        &self,
        row: tenancy::Model,
        next: TenancyStatus,
    ) -> Result<tenancy::Model, WorkflowError> {
        let mut active = row.into_active_model();
        active.status = Set(next.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&*self.db).await?)
    }

    /// Ends a tenancy: status ENDED plus end_date (today when unset).
    pub async fn end(&self, row: tenancy::Model) -> Result<tenancy::Model, WorkflowError> {
        let now = Utc::now();
        let end_date = row.end_date.unwrap_or_else(|| now.date_naive());
        let mut active = row.into_active_model();
        active.status = Set(TenancyStatus::Ended.as_str().to_string());
        active.end_date = Set(Some(end_date));
        active.updated_at = Set(now.into());
        Ok(active.update(&*self.db).await?)
    }

    /// Marks the keys as received by the tenant.
    pub async fn mark_keys_received(
        &self,
        row: tenancy::Model,
    ) -> Result<tenancy::Model, WorkflowError> {
        let now = Utc::now();
        let mut active = row.into_active_model();
        active.keys_received = Set(true);
        active.keys_received_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        Ok(active.update(&*self.db).await?)
    }
}
