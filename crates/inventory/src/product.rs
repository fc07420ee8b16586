use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use stockdesk_core::{
    CategoryId, DomainError, DomainResult, Entity, ProductId, Sku, ValueObject, find_by_id,
};

use crate::stock::{StockStatus, StockThresholds, aggregate_stock};

/// Category reference as returned by the backend.
///
/// List endpoints send the bare id; detail endpoints populate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(CategoryId),
    Embedded {
        #[serde(rename = "_id")]
        id: CategoryId,
        #[serde(default)]
        name: Option<String>,
    },
}

impl CategoryRef {
    pub fn id(&self) -> &CategoryId {
        match self {
            CategoryRef::Id(id) => id,
            CategoryRef::Embedded { id, .. } => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Id(_) => None,
            CategoryRef::Embedded { name, .. } => name.as_deref(),
        }
    }
}

/// Display-only attribute of a variant (e.g. `size = XL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
}

impl ValueObject for VariantAttribute {}

/// A purchasable configuration of a product with its own SKU and stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub sku: Sku,
    /// Units on hand. Older records may omit it; treat as zero.
    #[serde(default)]
    pub stock_quantity: Option<u64>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub attributes: Vec<VariantAttribute>,
}

impl Variant {
    pub fn stock(&self) -> u64 {
        self.stock_quantity.unwrap_or(0)
    }

    /// `"size: XL, color: Red"`; empty when the variant has no attributes.
    pub fn attribute_label(&self) -> String {
        self.attributes
            .iter()
            .map(|a| format!("{}: {}", a.name, a.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Entity for Variant {
    type Id = Sku;

    fn id(&self) -> &Self::Id {
        &self.sku
    }
}

/// Read-mostly copy of a backend product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// Product-level stock, used only when `variants` is empty.
    #[serde(default, rename = "totalStock")]
    pub fallback_stock: Option<u64>,
}

impl Product {
    /// Derived total stock (see [`aggregate_stock`]).
    pub fn total_stock(&self) -> u64 {
        aggregate_stock(&self.variants, self.fallback_stock)
    }

    pub fn stock_status(&self, thresholds: &StockThresholds) -> StockStatus {
        thresholds.classify(self.total_stock())
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn variant(&self, sku: &Sku) -> Option<&Variant> {
        find_by_id(&self.variants, sku)
    }

    /// Check invariants the client relies on: a non-blank title and SKUs that
    /// are unique within the product.
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {} has an empty title",
                self.id
            )));
        }

        let mut seen = HashSet::with_capacity(self.variants.len());
        for v in &self.variants {
            if v.sku.as_str().trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "product {} has a variant with an empty SKU",
                    self.id
                )));
            }
            if !seen.insert(v.sku.as_str()) {
                return Err(DomainError::validation(format!(
                    "product {} has duplicate SKU {}",
                    self.id, v.sku
                )));
            }
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
