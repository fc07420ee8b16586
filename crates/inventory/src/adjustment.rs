//! Stock adjustment (apply-delta) rules.
//!
//! An adjustment is validated locally before it is sent: the quantity must be
//! positive and a removal can never take stock below zero. The backend
//! re-checks both; after a successful request the caller refetches instead of
//! trusting the locally projected value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockdesk_core::{ProductId, Sku, ValueObject};

use crate::product::Product;

/// Direction of a stock adjustment (`type` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentType {
    Add,
    Remove,
}

impl AdjustmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentType::Add => "add",
            AdjustmentType::Remove => "remove",
        }
    }
}

impl core::fmt::Display for AdjustmentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for AdjustmentType {
    type Err = AdjustmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(AdjustmentType::Add),
            "remove" => Ok(AdjustmentType::Remove),
            other => Err(AdjustmentError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustmentError {
    #[error("quantity must be a positive integer")]
    InvalidQuantity,
    #[error("quantity exceeds current stock (requested {requested}, available {available})")]
    ExceedsCurrentStock { requested: u64, available: u64 },
    #[error("adjustment type must be `add` or `remove`, got `{0}`")]
    UnknownType(String),
    #[error("adjustment targets product {expected} but product {actual} was given")]
    ProductMismatch {
        expected: ProductId,
        actual: ProductId,
    },
    #[error("product {0} has variants; a variant SKU is required")]
    VariantRequired(ProductId),
    #[error("product {0} has no variants; a variant SKU cannot be given")]
    UnexpectedVariant(ProductId),
    #[error("variant {sku} not found in product {product_id}")]
    VariantNotFound { product_id: ProductId, sku: Sku },
}

/// A direction plus a strictly positive quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StockAdjustment {
    kind: AdjustmentType,
    quantity: u64,
}

impl ValueObject for StockAdjustment {}

impl StockAdjustment {
    pub fn new(kind: AdjustmentType, quantity: u64) -> Result<Self, AdjustmentError> {
        if quantity == 0 {
            return Err(AdjustmentError::InvalidQuantity);
        }
        Ok(Self { kind, quantity })
    }

    pub fn add(quantity: u64) -> Result<Self, AdjustmentError> {
        Self::new(AdjustmentType::Add, quantity)
    }

    pub fn remove(quantity: u64) -> Result<Self, AdjustmentError> {
        Self::new(AdjustmentType::Remove, quantity)
    }

    pub fn kind(&self) -> AdjustmentType {
        self.kind
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Signed stock delta (`+q` for add, `-q` for remove).
    pub fn signed_delta(&self) -> i128 {
        let q = i128::from(self.quantity);
        match self.kind {
            AdjustmentType::Add => q,
            AdjustmentType::Remove => -q,
        }
    }

    /// Compute the stock that results from applying this adjustment.
    ///
    /// `current` itself is never modified; on error the caller's state stays
    /// as it was.
    pub fn apply(&self, current: u64) -> Result<u64, AdjustmentError> {
        match self.kind {
            AdjustmentType::Add => Ok(current.saturating_add(self.quantity)),
            AdjustmentType::Remove => {
                if self.quantity > current {
                    return Err(AdjustmentError::ExceedsCurrentStock {
                        requested: self.quantity,
                        available: current,
                    });
                }
                Ok(current - self.quantity)
            }
        }
    }
}

/// Body of `POST /inventory/update-stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentRequest {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_sku: Option<Sku>,
    #[serde(rename = "type")]
    pub kind: AdjustmentType,
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl StockAdjustmentRequest {
    pub fn new(product_id: ProductId, variant_sku: Option<Sku>, adjustment: StockAdjustment) -> Self {
        Self {
            product_id,
            variant_sku,
            kind: adjustment.kind(),
            quantity: adjustment.quantity(),
            reason: None,
            notes: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = non_blank(reason);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = non_blank(notes);
        self
    }

    /// Re-validate the direction/quantity pair (the fields are public, so a
    /// request may have been built or decoded without going through
    /// [`StockAdjustment::new`]).
    pub fn adjustment(&self) -> Result<StockAdjustment, AdjustmentError> {
        StockAdjustment::new(self.kind, self.quantity)
    }

    /// Current stock of the adjustment target within `product`.
    ///
    /// Products with variants are adjusted per SKU; products without variants
    /// are adjusted through their product-level stock.
    pub fn current_stock(&self, product: &Product) -> Result<u64, AdjustmentError> {
        if product.id != self.product_id {
            return Err(AdjustmentError::ProductMismatch {
                expected: self.product_id.clone(),
                actual: product.id.clone(),
            });
        }

        match (&self.variant_sku, product.has_variants()) {
            (Some(sku), true) => product
                .variant(sku)
                .map(|v| v.stock())
                .ok_or_else(|| AdjustmentError::VariantNotFound {
                    product_id: product.id.clone(),
                    sku: sku.clone(),
                }),
            (None, true) => Err(AdjustmentError::VariantRequired(product.id.clone())),
            (Some(_), false) => Err(AdjustmentError::UnexpectedVariant(product.id.clone())),
            (None, false) => Ok(product.total_stock()),
        }
    }

    /// Validate against a known current quantity and return the projected one.
    pub fn check_against(&self, current: u64) -> Result<u64, AdjustmentError> {
        self.adjustment()?.apply(current)
    }

    /// Validate against a fetched product and return the projected quantity of
    /// the target (variant or product-level stock).
    pub fn check_against_product(&self, product: &Product) -> Result<u64, AdjustmentError> {
        let adjustment = self.adjustment()?;
        let current = self.current_stock(product)?;
        adjustment.apply(current)
    }
}
