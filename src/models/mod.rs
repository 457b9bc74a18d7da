//! # Data Models
//!
//! This module contains the SeaORM entity models for all Houseflow tables.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod house;
pub mod house_coordinator;
pub mod inspection;
pub mod inspection_checklist_item;
pub mod move_in_acknowledgement;
pub mod move_out_intention;
pub mod profile;
pub mod room;
pub mod tenancy;

pub use house::Entity as House;
pub use house_coordinator::Entity as HouseCoordinator;
pub use inspection::Entity as Inspection;
pub use inspection_checklist_item::Entity as InspectionChecklistItem;
pub use move_in_acknowledgement::Entity as MoveInAcknowledgement;
pub use move_out_intention::Entity as MoveOutIntention;
pub use profile::Entity as Profile;
pub use room::Entity as Room;
pub use tenancy::Entity as Tenancy;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "houseflow".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
