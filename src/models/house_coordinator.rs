//! HouseCoordinator entity model
//!
//! Assignment of a coordinator user to a house. Coordinator-facing workflow
//! actions are scoped to assigned houses.

use super::house::Entity as House;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// HouseCoordinator entity linking a coordinator user to a house
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "house_coordinators")]
pub struct Model {
    /// Unique identifier for the assignment (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// House the coordinator is assigned to
    pub house_id: Uuid,

    /// Coordinator user identifier
    pub coordinator_user_id: Uuid,

    /// Timestamp when the assignment was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "House",
        from = "Column::HouseId",
        to = "super::house::Column::Id"
    )]
    House,
}

impl Related<House> for Entity {
    fn to() -> RelationDef {
        Relation::House.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
