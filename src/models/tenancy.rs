//! Tenancy entity model
//!
//! One tenant's occupancy of one room slot. The `status` column holds the
//! lifecycle state the workflow module transitions through; it is stored as
//! text and parsed into [`crate::workflow::status::TenancyStatus`] at the
//! boundary.

use super::room::Entity as Room;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{Date, DateTimeWithTimeZone};

/// Tenancy entity representing one tenant's occupancy of one room slot
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tenancies")]
pub struct Model {
    /// Unique identifier for the tenancy (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Room being occupied
    pub room_id: Uuid,

    /// Slot within a two-person room ("A"/"B"), none for single rooms
    pub slot: Option<String>,

    /// Tenant user occupying the room
    pub tenant_user_id: Uuid,

    /// First day of the occupancy
    pub start_date: Date,

    /// Last day of the occupancy, set when the tenancy ends
    pub end_date: Option<Date>,

    /// Lifecycle status (one of the six enumerated values)
    pub status: String,

    /// Agreed rental price (optional)
    pub rental_price: Option<f64>,

    /// Whether the tenant has confirmed receiving the keys
    pub keys_received: bool,

    /// Timestamp of the keys-received confirmation
    pub keys_received_at: Option<DateTimeWithTimeZone>,

    /// Timestamp when the tenancy was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the tenancy was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Room",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::TenantUserId",
        to = "super::profile::Column::Id"
    )]
    Tenant,
    #[sea_orm(has_many = "super::move_out_intention::Entity")]
    MoveOutIntention,
    #[sea_orm(has_many = "super::inspection::Entity")]
    Inspection,
}

impl Related<Room> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::move_out_intention::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MoveOutIntention.def()
    }
}

impl Related<super::inspection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inspection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
