//! # Tenancy Lifecycle Workflow
//!
//! The move-out → inspection → move-in workflow: status machine, move-out
//! intention recorder, coordinator sign-off, inspection checklist engine and
//! move-in acknowledgement. Every operation takes an explicit [`Caller`]
//! resolved by the auth middleware rather than reading ambient session state,
//! so authorization checks are unit-testable.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod checklist;
pub mod service;
pub mod status;

pub use service::LifecycleService;
pub use status::{InspectionStatus, RoomSlot, SignOffStatus, TenancyStatus, UserRole};

/// Errors surfaced by workflow operations.
///
/// Messages pass through to the caller unmodified; multi-step operations are
/// not rolled back on partial failure (see DESIGN.md).
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Caller does not own or may not act on the resource.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// Referenced tenancy/inspection/room is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Attempted mutation on a finalized or terminal record.
    #[error("invalid state: {0}")]
    State(String),

    /// Photo compression or storage write failed.
    #[error("upload failed: {0}")]
    Upload(String),

    /// Opaque failure from the relational store.
    #[error("store error: {0}")]
    Remote(#[from] sea_orm::DbErr),
}

/// Explicit caller identity passed into every workflow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Role claim from the caller's profile
    pub role: UserRole,
}

impl Caller {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn require_role(&self, role: UserRole) -> Result<(), WorkflowError> {
        if self.role == role {
            Ok(())
        } else {
            Err(WorkflowError::Authorization(format!(
                "requires role {}, caller has {}",
                role.as_str(),
                self.role.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_role_rejects_other_roles() {
        let caller = Caller::new(Uuid::new_v4(), UserRole::Tenant);
        assert!(caller.require_role(UserRole::Tenant).is_ok());
        let err = caller.require_role(UserRole::Admin).unwrap_err();
        assert!(matches!(err, WorkflowError::Authorization(_)));
    }
}
