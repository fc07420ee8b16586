//! `stockdesk-core`: shared building blocks.
//!
//! This crate contains **pure** primitives (no HTTP, no IO) used by the
//! inventory domain and the backend client.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, find_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ProductId, Sku};
pub use value_object::ValueObject;
