//! `stockdesk-client`
//!
//! **Responsibility:** typed access to the inventory endpoints of the admin
//! backend.
//!
//! This crate provides:
//! - An explicit [`Session`] plus request signing (bearer token)
//! - Schema-checked decoding of every response
//! - Local stock guards before adjustments are sent
//! - Environment-based configuration
//!
//! The backend remains the authority; the client never applies a stock change
//! locally before the backend confirms it.

pub mod client;
pub mod config;
pub mod error;
pub mod inflight;
pub mod session;
pub mod types;

pub use client::InventoryClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use inflight::{AdjustmentTarget, InFlight, InFlightGuard};
pub use session::{Session, sign_request};
pub use types::{
    InventoryPage, InventoryQuery, Pagination, StockTracking, StockUpdate, UpdatedProduct,
    UpdatedVariant,
};
