//! InspectionChecklistItem entity model
//!
//! One answered checklist question. Rows are fully replaced on every save.

use super::inspection::Entity as Inspection;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Checklist item entity holding one yes/no answer for an inspection
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inspection_checklist_items")]
pub struct Model {
    /// Unique identifier for the checklist row (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Inspection this answer belongs to
    pub inspection_id: Uuid,

    /// Checklist key (one of the fixed enumerated vocabulary)
    pub key: String,

    /// Yes/no answer
    pub yes_no: bool,

    /// Explanation, required when the answer is "no"
    pub description_if_no: Option<String>,

    /// Timestamp when the row was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Inspection",
        from = "Column::InspectionId",
        to = "super::inspection::Column::Id"
    )]
    Inspection,
}

impl Related<Inspection> for Entity {
    fn to() -> RelationDef {
        Relation::Inspection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
