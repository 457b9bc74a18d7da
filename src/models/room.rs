//! Room entity model
//!
//! Rooms belong to a house; capacity-2 rooms are let per slot (A/B).

use super::house::Entity as House;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Room entity representing a lettable room within a house
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    /// Unique identifier for the room (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// House this room belongs to
    pub house_id: Uuid,

    /// Display label, unique within the house
    pub label: String,

    /// Number of tenants the room accommodates (1 or 2)
    pub capacity: i16,

    /// Whether the room is currently lettable
    pub active: bool,

    /// Timestamp when the room was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the room was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "House",
        from = "Column::HouseId",
        to = "super::house::Column::Id"
    )]
    House,
    #[sea_orm(has_many = "super::tenancy::Entity")]
    Tenancy,
}

impl Related<House> for Entity {
    fn to() -> RelationDef {
        Relation::House.def()
    }
}

impl Related<super::tenancy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenancy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
