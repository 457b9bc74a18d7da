//! Migration to create the move_in_acknowledgements table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MoveInAcknowledgements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MoveInAcknowledgements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MoveInAcknowledgements::TenancyId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MoveInAcknowledgements::InspectionId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MoveInAcknowledgements::SignedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MoveInAcknowledgements::SignedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MoveInAcknowledgements::SignatureImageUrl)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MoveInAcknowledgements::Audit)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MoveInAcknowledgements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_move_in_acknowledgements_tenancy")
                            .from(
                                MoveInAcknowledgements::Table,
                                MoveInAcknowledgements::TenancyId,
                            )
                            .to(Tenancies::Table, Tenancies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_move_in_acknowledgements_tenancy")
                    .table(MoveInAcknowledgements::Table)
                    .col(MoveInAcknowledgements::TenancyId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MoveInAcknowledgements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MoveInAcknowledgements {
    Table,
    Id,
    TenancyId,
    InspectionId,
    SignedBy,
    SignedAt,
    SignatureImageUrl,
    Audit,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tenancies {
    Table,
    Id,
}
