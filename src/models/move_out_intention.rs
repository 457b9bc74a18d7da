//! MoveOutIntention entity model
//!
//! A tenant's declared intent to vacate, with self-reported condition flags,
//! evidence photo references (JSON arrays of storage URLs) and the
//! coordinator sign-off trail.

use super::tenancy::Entity as Tenancy;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{Date, DateTimeWithTimeZone};
use serde_json::Value as JsonValue;

/// MoveOutIntention entity representing a tenant's declared intent to vacate
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "move_out_intentions")]
pub struct Model {
    /// Unique identifier for the intention (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Tenancy the intention belongs to
    pub tenancy_id: Uuid,

    /// Date the tenant plans to vacate
    pub planned_move_out_date: Date,

    /// Free-text notes from the tenant
    pub notes: Option<String>,

    /// Tenant asserts rent is paid up to the move-out date
    pub rent_paid_up: bool,

    /// Tenant asserts bedroom and common areas are cleaned
    pub areas_cleaned: bool,

    /// Tenant reports damage
    pub has_damage: bool,

    /// Damage description, required when has_damage is set
    pub damage_description: Option<String>,

    /// Ordered key-area photo references (JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub key_area_photos: JsonValue,

    /// Ordered damage photo references (JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub damage_photos: JsonValue,

    /// Coordinator sign-off status (PENDING | APPROVED | REJECTED)
    pub sign_off_status: String,

    /// Coordinator's review notes
    pub coordinator_notes: Option<String>,

    /// Coordinator who signed off
    pub coordinator_signed_off_by: Option<Uuid>,

    /// Timestamp of the sign-off decision
    pub coordinator_signed_off_at: Option<DateTimeWithTimeZone>,

    /// Timestamp when the tenant submitted the intention
    pub submitted_at: DateTimeWithTimeZone,

    /// Timestamp when the row was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the row was last updated
    pub updated_at: DateTimeWithTimeZone,
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
