//! MoveInAcknowledgement entity model
//!
//! The new tenant's signed confirmation that they reviewed the prior
//! evidence and received the keys. Created once per tenancy.

use super::tenancy::Entity as Tenancy;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// MoveInAcknowledgement entity representing the signed move-in confirmation
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "move_in_acknowledgements")]
pub struct Model {
    /// Unique identifier for the acknowledgement (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Tenancy being acknowledged
    pub tenancy_id: Uuid,

    /// Inspection the tenant reviewed, if the room had one
    pub inspection_id: Option<Uuid>,

    /// Tenant who signed
    pub signed_by: Uuid,

    /// Timestamp of the signature
    pub signed_at: DateTimeWithTimeZone,

    /// Storage reference for the signature image
    pub signature_image_url: String,

    /// Structured audit trail (JSON)
    #[sea_orm(column_type = "JsonBinary")]
    pub audit: Option<JsonValue>,

    /// Timestamp when the row was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Tenancy",
        from = "Column::TenancyId",
        to = "super::tenancy::Column::Id"
    )]
    Tenancy,
}

impl Related<Tenancy> for Entity {
    fn to() -> RelationDef {
        Relation::Tenancy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
