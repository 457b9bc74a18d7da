//! Inspection entity model
//!
//! A coordinator's structured assessment of room condition at move-out. Once
//! the status is FINAL the inspection and its checklist are immutable.

use super::tenancy::Entity as Tenancy;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Inspection entity representing a move-out condition assessment
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inspections")]
pub struct Model {
    /// Unique identifier for the inspection (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Tenancy being inspected
    pub tenancy_id: Uuid,

    /// Room being inspected
    pub room_id: Uuid,

    /// Coordinator who created the inspection
    pub created_by: Uuid,

    /// Inspection status (DRAFT | FINAL)
    pub status: String,

    /// Timestamp of finalization, set exactly once
    pub finalized_at: Option<DateTimeWithTimeZone>,

    /// Timestamp when the inspection was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the inspection was last updated
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
    #[sea_orm(has_many = "super::inspection_checklist_item::Entity")]
    ChecklistItem,
}

impl Related<Tenancy> for Entity {
    fn to() -> RelationDef {
        Relation::Tenancy.def()
    }
}

impl Related<super::inspection_checklist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChecklistItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
