//! Test utilities for database testing.
//!
//! Sets up in-memory SQLite databases with migrations applied and provides
//! fixture builders for the housing and tenancy tables.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use houseflow::repositories::{
    CreateHouseRequest, CreateProfileRequest, CreateRoomRequest, CreateTenancyRequest,
    HousingRepository, ProfileRepository, TenancyRepository,
};
use houseflow::workflow::{Caller, RoomSlot, TenancyStatus, UserRole};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // SQLite does not enforce our Postgres foreign key semantics; disable FK
    // checks so fixtures can be inserted piecemeal.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Sets up an in-memory SQLite database and returns it Arc-wrapped.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// Creates a profile with the given role and returns its caller identity.
#[allow(dead_code)]
pub async fn create_caller(
    db: &Arc<DatabaseConnection>,
    role: UserRole,
    email: &str,
) -> Result<Caller> {
    let repo = ProfileRepository::new(Arc::clone(db));
    let profile = repo
        .create(CreateProfileRequest {
            email: email.to_string(),
            name: format!("Test {}", role.as_str()),
            role,
        })
        .await?;
    Ok(Caller::new(profile.id, role))
}

/// Creates a house with one single-capacity room; returns (house_id, room_id).
#[allow(dead_code)]
pub async fn create_house_with_room(db: &Arc<DatabaseConnection>) -> Result<(Uuid, Uuid)> {
    let repo = HousingRepository::new(Arc::clone(db));
    let house = repo
        .create_house(CreateHouseRequest {
            name: format!("House {}", &Uuid::new_v4().to_string()[..8]),
            address: Some("1 Test Lane".to_string()),
        })
        .await?;
    let room = repo
        .create_room(CreateRoomRequest {
            house_id: house.id,
            label: "1A".to_string(),
            capacity: 1,
        })
        .await?;
    Ok((house.id, room.id))
}

/// Assigns a coordinator to a house.
#[allow(dead_code)]
pub async fn assign_coordinator(
    db: &Arc<DatabaseConnection>,
    house_id: Uuid,
    coordinator: &Caller,
) -> Result<()> {
    let repo = HousingRepository::new(Arc::clone(db));
    repo.assign_coordinator(house_id, coordinator.user_id).await?;
    Ok(())
}

/// Creates a tenancy in the given status for a tenant caller.
#[allow(dead_code)]
pub async fn create_tenancy_with_status(
    db: &Arc<DatabaseConnection>,
    room_id: Uuid,
    tenant: &Caller,
    status: TenancyStatus,
) -> Result<Uuid> {
    create_tenancy_in_slot(db, room_id, None, tenant, status).await
}

/// Creates a tenancy for a specific slot in the given status.
#[allow(dead_code)]
pub async fn create_tenancy_in_slot(
    db: &Arc<DatabaseConnection>,
    room_id: Uuid,
    slot: Option<RoomSlot>,
    tenant: &Caller,
    status: TenancyStatus,
) -> Result<Uuid> {
    let repo = TenancyRepository::new(Arc::clone(db));
    let tenancy = repo
        .create(CreateTenancyRequest {
            room_id,
            slot,
            tenant_user_id: tenant.user_id,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
            end_date: None,
            rental_price: Some(500.0),
            status,
        })
        .await?;
    Ok(tenancy.id)
}
