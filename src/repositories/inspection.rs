//! Inspection repository for database operations.
//!
//! Checklist persistence is full-replace: every save deletes the existing
//! rows for the inspection and bulk-inserts the new set. No history of prior
//! answers is retained.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::models::inspection::{self, Entity as Inspection};
use crate::models::inspection_checklist_item::{self, Entity as ChecklistItem};
use crate::workflow::checklist::ChecklistAnswers;
use crate::workflow::{InspectionStatus, WorkflowError};

/// Repository for inspection and checklist database operations
#[derive(Debug, Clone)]
pub struct InspectionRepository {
    db: Arc<DatabaseConnection>,
}

impl InspectionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        tenancy_id: Uuid,
        room_id: Uuid,
        created_by: Uuid,
    ) -> Result<inspection::Model, WorkflowError> {
        let now = Utc::now();
        let row = inspection::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenancy_id: Set(tenancy_id),
            room_id: Set(room_id),
            created_by: Set(created_by),
            status: Set(InspectionStatus::Draft.as_str().to_string()),
            finalized_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(row.insert(&*self.db).await?)
    }

    pub async fn get(
        &self,
        inspection_id: Uuid,
    ) -> Result<Option<inspection::Model>, WorkflowError> {
        Ok(Inspection::find_by_id(inspection_id).one(&*self.db).await?)
    }

    pub async fn require(&self, inspection_id: Uuid) -> Result<inspection::Model, WorkflowError> {
        self.get(inspection_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("inspection {inspection_id} not found")))
    }

    /// Most recent FINAL inspection for a room, surfaced to the incoming
    /// tenant during move-in.
    pub async fn latest_final_for_room(
        &self,
        room_id: Uuid,
    ) -> Result<Option<inspection::Model>, WorkflowError> {
        Ok(Inspection::find()
            .filter(inspection::Column::RoomId.eq(room_id))
            .filter(inspection::Column::Status.eq(InspectionStatus::Final.as_str()))
            .order_by_desc(inspection::Column::FinalizedAt)
            .one(&*self.db)
            .await?)
    }

    /// Replaces the checklist rows for an inspection: delete-all, re-insert.
    pub async fn replace_checklist(
        &self,
        inspection_id: Uuid,
        answers: &ChecklistAnswers,
    ) -> Result<(), WorkflowError> {
        ChecklistItem::delete_many()
            .filter(inspection_checklist_item::Column::InspectionId.eq(inspection_id))
            .exec(&*self.db)
            .await?;

        if answers.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let rows: Vec<inspection_checklist_item::ActiveModel> = answers
            .iter()
            .map(|(key, answer)| inspection_checklist_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                inspection_id: Set(inspection_id),
                key: Set(key.as_str().to_string()),
                yes_no: Set(answer.yes_no),
                description_if_no: Set(if answer.yes_no {
                    None
                } else {
                    Some(answer.description.clone())
                }),
                created_at: Set(now.into()),
            })
            .collect();

        ChecklistItem::insert_many(rows).exec(&*self.db).await?;
        Ok(())
    }

    pub async fn checklist(
        &self,
        inspection_id: Uuid,
    ) -> Result<Vec<inspection_checklist_item::Model>, WorkflowError> {
        Ok(ChecklistItem::find()
            .filter(inspection_checklist_item::Column::InspectionId.eq(inspection_id))
            .order_by_asc(inspection_checklist_item::Column::Key)
            .all(&*self.db)
            .await?)
    }

    /// Locks the inspection: status FINAL plus the finalization timestamp.
    pub async fn finalize(
        &self,
        row: inspection::Model,
    ) -> Result<inspection::Model, WorkflowError> {
        let now = Utc::now();
        let mut active = row.into_active_model();
        active.status = Set(InspectionStatus::Final.as_str().to_string());
        active.finalized_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        Ok(active.update(&*self.db).await?)
    }
}
