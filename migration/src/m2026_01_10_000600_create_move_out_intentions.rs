//! Migration to create the move_out_intentions table.
//!
//! Stores the tenant's declared intent to vacate, the self-reported condition
//! flags, evidence photo references, and the coordinator sign-off trail.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MoveOutIntentions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MoveOutIntentions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MoveOutIntentions::TenancyId).uuid().not_null())
                    .col(
                        ColumnDef::new(MoveOutIntentions::PlannedMoveOutDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MoveOutIntentions::Notes).text().null())
                    .col(
                        ColumnDef::new(MoveOutIntentions::RentPaidUp)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::AreasCleaned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::HasDamage)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::DamageDescription)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::KeyAreaPhotos)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::DamagePhotos)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::SignOffStatus)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::CoordinatorNotes)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::CoordinatorSignedOffBy)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::CoordinatorSignedOffAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MoveOutIntentions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_move_out_intentions_tenancy")
                            .from(MoveOutIntentions::Table, MoveOutIntentions::TenancyId)
                            .to(Tenancies::Table, Tenancies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_move_out_intentions_tenancy")
                    .table(MoveOutIntentions::Table)
                    .col(MoveOutIntentions::TenancyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MoveOutIntentions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MoveOutIntentions {
    Table,
    Id,
    TenancyId,
    PlannedMoveOutDate,
    Notes,
    RentPaidUp,
    AreasCleaned,
    HasDamage,
    DamageDescription,
    KeyAreaPhotos,
    DamagePhotos,
    SignOffStatus,
    CoordinatorNotes,
    CoordinatorSignedOffBy,
    CoordinatorSignedOffAt,
    SubmittedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tenancies {
    Table,
    Id,
}
