//! Inventory domain module.
//!
//! This crate contains the stock rules the admin client applies locally,
//! implemented purely as deterministic domain logic (no IO, no HTTP). The
//! backend stays the system of record; everything here is either derived for
//! display or a guard evaluated before a request is sent.

pub mod adjustment;
pub mod listing;
pub mod product;
pub mod stock;

pub use adjustment::{AdjustmentError, AdjustmentType, StockAdjustment, StockAdjustmentRequest};
pub use listing::{InventorySort, InventorySummary, StockFilter};
pub use product::{CategoryRef, Product, Variant, VariantAttribute};
pub use stock::{StockStatus, StockThresholds, StockTone, aggregate_stock, classify};
