//! Profile repository for database operations.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::models::profile::{self, Entity as Profile};
use crate::workflow::{UserRole, WorkflowError};

/// Request data for creating a new profile
#[derive(Debug, Clone)]
pub struct CreateProfileRequest {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// Repository for profile database operations
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a profile row. There is no auth-provider integration here;
    /// profiles are plain rows carrying the role claim.
    pub async fn create(
        &self,
        request: CreateProfileRequest,
    ) -> Result<profile::Model, WorkflowError> {
        let email = request.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(WorkflowError::Validation(format!(
                "'{email}' is not a valid email address"
            )));
        }
        if request.name.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "profile name cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let row = profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            name: Set(request.name.trim().to_string()),
            role: Set(request.role.as_str().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(row.insert(&*self.db).await?)
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> Result<Option<profile::Model>, WorkflowError> {
        Ok(Profile::find_by_id(user_id).one(&*self.db).await?)
    }

    pub async fn list(&self) -> Result<Vec<profile::Model>, WorkflowError> {
        Ok(Profile::find()
            .order_by_asc(profile::Column::Name)
            .all(&*self.db)
            .await?)
    }
}
