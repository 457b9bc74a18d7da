//! Migration to create the inspection_checklist_items table.
//!
//! Checklist rows are fully replaced on every save; the unique index on
//! (inspection_id, key) guards against duplicate keys within one inspection.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InspectionChecklistItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InspectionChecklistItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InspectionChecklistItems::InspectionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InspectionChecklistItems::Key).text().not_null())
                    .col(
                        ColumnDef::new(InspectionChecklistItems::YesNo)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InspectionChecklistItems::DescriptionIfNo)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InspectionChecklistItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checklist_items_inspection")
                            .from(
                                InspectionChecklistItems::Table,
                                InspectionChecklistItems::InspectionId,
                            )
                            .to(Inspections::Table, Inspections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_checklist_items_inspection_key")
                    .table(InspectionChecklistItems::Table)
                    .col(InspectionChecklistItems::InspectionId)
                    .col(InspectionChecklistItems::Key)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(InspectionChecklistItems::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum InspectionChecklistItems {
    Table,
    Id,
    InspectionId,
    Key,
    YesNo,
    DescriptionIfNo,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Inspections {
    Table,
    Id,
}
