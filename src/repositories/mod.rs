//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for database entities, providing a clean API for data access.

pub mod housing;
pub mod inspection;
pub mod move_in;
pub mod move_out_intention;
pub mod profile;
pub mod tenancy;

pub use housing::{CreateHouseRequest, CreateRoomRequest, HousingRepository};
pub use inspection::InspectionRepository;
pub use move_in::{CreateAcknowledgementRequest, MoveInRepository};
pub use move_out_intention::{CreateIntentionRequest, MoveOutIntentionRepository};
pub use profile::{CreateProfileRequest, ProfileRepository};
pub use tenancy::{CreateTenancyRequest, TenancyRepository};
