//! # Houseflow API Library
//!
//! Core functionality for the Houseflow service: the tenancy lifecycle
//! workflow, HTTP handlers, repositories and server configuration.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod workflow;
pub use migration;
