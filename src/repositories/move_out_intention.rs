//! Move-out intention repository for database operations.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::models::move_out_intention::{self, Entity as MoveOutIntention};
use crate::workflow::{SignOffStatus, WorkflowError};

/// Request data for recording a move-out intention
#[derive(Debug, Clone)]
pub struct CreateIntentionRequest {
    pub tenancy_id: Uuid,
    pub planned_move_out_date: NaiveDate,
    pub notes: Option<String>,
    pub rent_paid_up: bool,
    pub areas_cleaned: bool,
    pub has_damage: bool,
    pub damage_description: Option<String>,
    pub key_area_photos: Vec<String>,
    pub damage_photos: Vec<String>,
}

/// Repository for move-out intention database operations
#[derive(Debug, Clone)]
pub struct MoveOutIntentionRepository {
    db: Arc<DatabaseConnection>,
}

impl MoveOutIntentionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        request: CreateIntentionRequest,
    ) -> Result<move_out_intention::Model, WorkflowError> {
        let now = Utc::now();
        let row = move_out_intention::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenancy_id: Set(request.tenancy_id),
            planned_move_out_date: Set(request.planned_move_out_date),
            notes: Set(request.notes),
            rent_paid_up: Set(request.rent_paid_up),
            areas_cleaned: Set(request.areas_cleaned),
            has_damage: Set(request.has_damage),
            damage_description: Set(request.damage_description),
            key_area_photos: Set(json!(request.key_area_photos)),
            damage_photos: Set(json!(request.damage_photos)),
            sign_off_status: Set(SignOffStatus::Pending.as_str().to_string()),
            coordinator_notes: Set(None),
            coordinator_signed_off_by: Set(None),
            coordinator_signed_off_at: Set(None),
            submitted_at: Set(now.into()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(row.insert(&*self.db).await?)
    }

    pub async fn get(
        &self,
        intention_id: Uuid,
    ) -> Result<Option<move_out_intention::Model>, WorkflowError> {
        Ok(MoveOutIntention::find_by_id(intention_id)
            .one(&*self.db)
            .await?)
    }

    pub async fn require(
        &self,
        intention_id: Uuid,
    ) -> Result<move_out_intention::Model, WorkflowError> {
        self.get(intention_id).await?.ok_or_else(|| {
            WorkflowError::NotFound(format!("move-out intention {intention_id} not found"))
        })
    }

    /// The PENDING intention for a tenancy, if one exists. At most one may be
    /// non-terminal at a time.
    pub async fn pending_for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> Result<Option<move_out_intention::Model>, WorkflowError> {
        Ok(MoveOutIntention::find()
            .filter(move_out_intention::Column::TenancyId.eq(tenancy_id))
            .filter(
                move_out_intention::Column::SignOffStatus.eq(SignOffStatus::Pending.as_str()),
            )
            .one(&*self.db)
            .await?)
    }

    /// The most recent intention for a tenancy regardless of sign-off state.
    pub async fn latest_for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> Result<Option<move_out_intention::Model>, WorkflowError> {
        Ok(MoveOutIntention::find()
            .filter(move_out_intention::Column::TenancyId.eq(tenancy_id))
            .order_by_desc(move_out_intention::Column::SubmittedAt)
            .one(&*self.db)
            .await?)
    }

    /// Intentions still awaiting a sign-off decision, newest first.
    pub async fn list_pending(&self) -> Result<Vec<move_out_intention::Model>, WorkflowError> {
        Ok(MoveOutIntention::find()
            .filter(
                move_out_intention::Column::SignOffStatus.eq(SignOffStatus::Pending.as_str()),
            )
            .order_by_desc(move_out_intention::Column::SubmittedAt)
            .all(&*self.db)
            .await?)
    }

    /// Records the coordinator's sign-off decision.
    pub async fn sign_off(
        &self,
        row: move_out_intention::Model,
        decision: SignOffStatus,
        coordinator_user_id: Uuid,
        coordinator_notes: String,
    ) -> Result<move_out_intention::Model, WorkflowError> {
        let now = Utc::now();
        let mut active = row.into_active_model();
        active.sign_off_status = Set(decision.as_str().to_string());
        active.coordinator_notes = Set(Some(coordinator_notes));
        active.coordinator_signed_off_by = Set(Some(coordinator_user_id));
        active.coordinator_signed_off_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        Ok(active.update(&*self.db).await?)
    }

    /// Decodes the photo reference arrays stored on an intention row.
    pub fn photo_refs(row: &move_out_intention::Model) -> (Vec<String>, Vec<String>) {
        let decode = |value: &serde_json::Value| -> Vec<String> {
            value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };
        (decode(&row.key_area_photos), decode(&row.damage_photos))
    }
}
