//! Migration to create the tenancies table.
//!
//! A tenancy is one tenant's occupancy of one room slot and carries the
//! lifecycle status the workflow transitions through.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tenancies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tenancies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tenancies::RoomId).uuid().not_null())
                    .col(ColumnDef::new(Tenancies::Slot).text().null())
                    .col(ColumnDef::new(Tenancies::TenantUserId).uuid().not_null())
                    .col(ColumnDef::new(Tenancies::StartDate).date().not_null())
                    .col(ColumnDef::new(Tenancies::EndDate).date().null())
                    .col(ColumnDef::new(Tenancies::Status).text().not_null())
                    .col(ColumnDef::new(Tenancies::RentalPrice).double().null())
                    .col(
                        ColumnDef::new(Tenancies::KeysReceived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Tenancies::KeysReceivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Tenancies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tenancies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tenancies_room")
                            .from(Tenancies::Table, Tenancies::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tenancies_tenant")
                            .from(Tenancies::Table, Tenancies::TenantUserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tenancies_room_status")
                    .table(Tenancies::Table)
                    .col(Tenancies::RoomId)
                    .col(Tenancies::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tenancies_tenant_user")
                    .table(Tenancies::Table)
                    .col(Tenancies::TenantUserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tenancies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tenancies {
    Table,
    Id,
    RoomId,
    Slot,
    TenantUserId,
    StartDate,
    EndDate,
    Status,
    RentalPrice,
    KeysReceived,
    KeysReceivedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}
