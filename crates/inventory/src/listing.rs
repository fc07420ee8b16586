//! Inventory list helpers: filter/sort options and per-page summaries.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::stock::{StockStatus, StockThresholds};

/// `stockFilter` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
}

impl StockFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockFilter::All => "all",
            StockFilter::InStock => "in-stock",
            StockFilter::LowStock => "low-stock",
            StockFilter::OutOfStock => "out-of-stock",
        }
    }

    pub fn matches(&self, status: StockStatus) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::InStock => status == StockStatus::InStock,
            StockFilter::LowStock => status == StockStatus::LowStock,
            StockFilter::OutOfStock => status == StockStatus::OutOfStock,
        }
    }

    /// Apply the filter to an already fetched page.
    pub fn apply<'a>(
        &self,
        products: &'a [Product],
        thresholds: &StockThresholds,
    ) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|p| self.matches(p.stock_status(thresholds)))
            .collect()
    }
}

/// `sort` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventorySort {
    #[default]
    Newest,
    TitleAsc,
    TitleDesc,
    StockAsc,
    StockDesc,
}

impl InventorySort {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventorySort::Newest => "newest",
            InventorySort::TitleAsc => "title-asc",
            InventorySort::TitleDesc => "title-desc",
            InventorySort::StockAsc => "stock-asc",
            InventorySort::StockDesc => "stock-desc",
        }
    }
}

/// Per-status counts for a list of products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    pub products: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total_units: u64,
}

impl InventorySummary {
    pub fn from_products(products: &[Product], thresholds: &StockThresholds) -> Self {
        products.iter().fold(Self::default(), |mut acc, p| {
            let total = p.total_stock();
            acc.products += 1;
            acc.total_units = acc.total_units.saturating_add(total);
            match thresholds.classify(total) {
                StockStatus::InStock => acc.in_stock += 1,
                StockStatus::LowStock => acc.low_stock += 1,
                StockStatus::OutOfStock => acc.out_of_stock += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::ProductId;

    fn product(id: &str, stock: u64) -> Product {
        Product {
            id: ProductId::parse(id).unwrap(),
            title: format!("Product {id}"),
            category: None,
            variants: Vec::new(),
            fallback_stock: Some(stock),
        }
    }

    #[test]
    fn summary_counts_each_band() {
        let products = vec![product("a", 0), product("b", 3), product("c", 5), product("d", 40)];
        let summary = InventorySummary::from_products(&products, &StockThresholds::default());

        assert_eq!(summary.products, 4);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.low_stock, 2);
        assert_eq!(summary.in_stock, 1);
        assert_eq!(summary.total_units, 48);
    }

    #[test]
    fn filter_keeps_matching_products() {
        let products = vec![product("a", 0), product("b", 3), product("c", 9)];
        let thresholds = StockThresholds::default();

        let filtered = StockFilter::LowStock.apply(&products, &thresholds);
        let low: Vec<_> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(low, vec!["b"]);
        assert_eq!(StockFilter::All.apply(&products, &thresholds).len(), 3);
    }

    #[test]
    fn query_values_match_wire_names() {
        assert_eq!(serde_json::to_value(StockFilter::OutOfStock).unwrap(), "out-of-stock");
        assert_eq!(StockFilter::OutOfStock.as_str(), "out-of-stock");
        assert_eq!(serde_json::to_value(InventorySort::StockDesc).unwrap(), "stock-desc");
        assert_eq!(InventorySort::default().as_str(), "newest");
    }
}
