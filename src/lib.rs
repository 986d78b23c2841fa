//! plant_monitor: data service for an IoT plant-monitoring system
//!
//! Devices post soil humidity, light and temperature readings; the mobile
//! app reads them back, registers plants, logs in and polls an alert
//! mailbox. Everything sits on a small SQLite schema (users, plants,
//! plant_types, data, alerts).
//!
//! This lib exposes the store and the HTTP router.

pub mod config;
pub mod error;
pub mod logging;
pub mod migrations;
pub mod models;
// REST API module: Axum HTTP handlers on $PORT
pub mod rest;
pub mod seed;
pub mod store;
pub mod timezone;

pub use config::Config;
pub use error::{ApiError, StoreError};
pub use store::Store;
