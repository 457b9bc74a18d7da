//! Database migrations for the Houseflow API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_01_10_000100_create_profiles;
mod m2026_01_10_000200_create_houses;
mod m2026_01_10_000300_create_rooms;
mod m2026_01_10_000400_create_house_coordinators;
mod m2026_01_10_000500_create_tenancies;
mod m2026_01_10_000600_create_move_out_intentions;
mod m2026_01_10_000700_create_inspections;
mod m2026_01_10_000800_create_inspection_checklist_items;
mod m2026_01_10_000900_create_move_in_acknowledgements;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_01_10_000100_create_profiles::Migration),
            Box::new(m2026_01_10_000200_create_houses::Migration),
            Box::new(m2026_01_10_000300_create_rooms::Migration),
            Box::new(m2026_01_10_000400_create_house_coordinators::Migration),
            Box::new(m2026_01_10_000500_create_tenancies::Migration),
            Box::new(m2026_01_10_000600_create_move_out_intentions::Migration),
            Box::new(m2026_01_10_000700_create_inspections::Migration),
            Box::new(m2026_01_10_000800_create_inspection_checklist_items::Migration),
            Box::new(m2026_01_10_000900_create_move_in_acknowledgements::Migration),
        ]
    }
}
