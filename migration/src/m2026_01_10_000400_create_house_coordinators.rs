//! Migration to create the house_coordinators table.
//!
//! Assigns coordinator users to houses; coordinator-facing workflow actions
//! are scoped to assigned houses.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HouseCoordinators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HouseCoordinators::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HouseCoordinators::HouseId).uuid().not_null())
                    .col(
                        ColumnDef::new(HouseCoordinators::CoordinatorUserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HouseCoordinators::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_house_coordinators_house")
                            .from(HouseCoordinators::Table, HouseCoordinators::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_house_coordinators_unique_assignment")
                    .table(HouseCoordinators::Table)
                    .col(HouseCoordinators::HouseId)
                    .col(HouseCoordinators::CoordinatorUserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HouseCoordinators::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum HouseCoordinators {
    Table,
    Id,
    HouseId,
    CoordinatorUserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
}
