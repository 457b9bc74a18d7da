//! Move-in acknowledgement repository for database operations.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::move_in_acknowledgement::{self, Entity as MoveInAcknowledgement};
use crate::workflow::WorkflowError;

/// Request data for recording a signed move-in acknowledgement
#[derive(Debug, Clone)]
pub struct CreateAcknowledgementRequest {
    pub tenancy_id: Uuid,
    pub inspection_id: Option<Uuid>,
    pub signed_by: Uuid,
    pub signature_image_url: String,
    pub audit: Option<JsonValue>,
}

/// Repository for move-in acknowledgement database operations
#[derive(Debug, Clone)]
pub struct MoveInRepository {
    db: Arc<DatabaseConnection>,
}

impl MoveInRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        request: CreateAcknowledgementRequest,
    ) -> Result<move_in_acknowledgement::Model, WorkflowError> {
        let now = Utc::now();
        let row = move_in_acknowledgement::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenancy_id: Set(request.tenancy_id),
            inspection_id: Set(request.inspection_id),
            signed_by: Set(request.signed_by),
            signed_at: Set(now.into()),
            signature_image_url: Set(request.signature_image_url),
            audit: Set(request.audit),
            created_at: Set(now.into()),
        };
        Ok(row.insert(&*self.db).await?)
    }

    pub async fn for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> Result<Option<move_in_acknowledgement::Model>, WorkflowError> {
        Ok(MoveInAcknowledgement::find()
            .filter(move_in_acknowledgement::Column::TenancyId.eq(tenancy_id))
            .one(&*self.db)
            .await?)
    }
}
