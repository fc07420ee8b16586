//! Stock aggregation and status classification.

use serde::{Deserialize, Serialize};

use stockdesk_core::ValueObject;

use crate::product::Variant;

/// Default upper bound (inclusive) of the "low stock" band.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 5;

/// Total available stock for a product.
///
/// With at least one variant, the total is the sum of the variant quantities
/// (a missing quantity counts as zero) and `fallback` is ignored. Without
/// variants, the product-level `fallback` is used (missing counts as zero).
pub fn aggregate_stock(variants: &[Variant], fallback: Option<u64>) -> u64 {
    if variants.is_empty() {
        return fallback.unwrap_or(0);
    }

    variants
        .iter()
        .map(Variant::stock)
        .fold(0u64, u64::saturating_add)
}

/// Three-state stock classification shown in list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

/// Visual tone paired with a [`StockStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTone {
    Danger,
    Warning,
    Success,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    pub fn tone(&self) -> StockTone {
        match self {
            StockStatus::OutOfStock => StockTone::Danger,
            StockStatus::LowStock => StockTone::Warning,
            StockStatus::InStock => StockTone::Success,
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.label())
    }
}

impl StockTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockTone::Danger => "danger",
            StockTone::Warning => "warning",
            StockTone::Success => "success",
        }
    }
}

/// Thresholds used by the classifier.
///
/// `low_stock` is the inclusive upper bound of the low band: quantities in
/// `1..=low_stock` are low, anything above is in stock. Zero is always out of
/// stock, whatever the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockThresholds {
    pub low_stock: u64,
}

impl ValueObject for StockThresholds {}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            low_stock: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl StockThresholds {
    pub fn new(low_stock: u64) -> Self {
        Self { low_stock }
    }

    pub fn classify(&self, quantity: u64) -> StockStatus {
        // Zero must be tested before the low band.
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= self.low_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Classify a quantity with the default threshold.
pub fn classify(quantity: u64) -> StockStatus {
    StockThresholds::default().classify(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::Sku;

    fn variant(sku: &str, qty: Option<u64>) -> Variant {
        Variant {
            sku: Sku::parse(sku).unwrap(),
            stock_quantity: qty,
            price: 10.0,
            attributes: Vec::new(),
        }
    }

    #[test]
    fn aggregate_sums_variant_quantities() {
        let variants = vec![
            variant("A", Some(3)),
            variant("B", Some(0)),
            variant("C", Some(12)),
        ];
        assert_eq!(aggregate_stock(&variants, None), 15);
    }

    #[test]
    fn aggregate_ignores_fallback_when_variants_exist() {
        let variants = vec![variant("A", Some(2))];
        assert_eq!(aggregate_stock(&variants, Some(99)), 2);
    }

    #[test]
    fn aggregate_treats_missing_variant_quantity_as_zero() {
        let variants = vec![variant("A", None), variant("B", Some(4))];
        assert_eq!(aggregate_stock(&variants, None), 4);
    }

    #[test]
    fn aggregate_uses_fallback_without_variants() {
        assert_eq!(aggregate_stock(&[], Some(7)), 7);
        assert_eq!(aggregate_stock(&[], None), 0);
    }

    #[test]
    fn aggregate_saturates_instead_of_overflowing() {
        let variants = vec![variant("A", Some(u64::MAX)), variant("B", Some(1))];
        assert_eq!(aggregate_stock(&variants, None), u64::MAX);
    }

    #[test]
    fn classify_uses_default_bands() {
        assert_eq!(classify(0), StockStatus::OutOfStock);
        assert_eq!(classify(1), StockStatus::LowStock);
        assert_eq!(classify(5), StockStatus::LowStock);
        assert_eq!(classify(6), StockStatus::InStock);
    }

    #[test]
    fn labels_and_tones_match_status() {
        assert_eq!(classify(0).label(), "Out of Stock");
        assert_eq!(classify(0).tone(), StockTone::Danger);
        assert_eq!(classify(3).label(), "Low Stock");
        assert_eq!(classify(3).tone().as_str(), "warning");
        assert_eq!(classify(50).to_string(), "In Stock");
        assert_eq!(classify(50).tone(), StockTone::Success);
    }

    #[test]
    fn custom_threshold_moves_low_band() {
        let thresholds = StockThresholds::new(20);
        assert_eq!(thresholds.classify(20), StockStatus::LowStock);
        assert_eq!(thresholds.classify(21), StockStatus::InStock);
    }

    #[test]
    fn zero_threshold_still_reports_out_of_stock() {
        let thresholds = StockThresholds::new(0);
        assert_eq!(thresholds.classify(0), StockStatus::OutOfStock);
        assert_eq!(thresholds.classify(1), StockStatus::InStock);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: aggregation does not depend on variant order.
            #[test]
            fn aggregation_is_order_independent(
                quantities in prop::collection::vec(prop::option::of(0u64..10_000), 1..20)
            ) {
                let variants: Vec<Variant> = quantities
                    .iter()
                    .enumerate()
                    .map(|(i, q)| variant(&format!("SKU-{i}"), *q))
                    .collect();
                let mut reversed = variants.clone();
                reversed.reverse();

                let expected: u64 = quantities.iter().map(|q| q.unwrap_or(0)).sum();
                prop_assert_eq!(aggregate_stock(&variants, None), expected);
                prop_assert_eq!(aggregate_stock(&reversed, None), expected);
            }

            /// Property: classification is deterministic and respects band order.
            #[test]
            fn classification_is_deterministic(quantity in 0u64..1_000, low in 0u64..50) {
                let thresholds = StockThresholds::new(low);
                let first = thresholds.classify(quantity);
                prop_assert_eq!(first, thresholds.classify(quantity));

                let expected = if quantity == 0 {
                    StockStatus::OutOfStock
                } else if quantity <= low {
                    StockStatus::LowStock
                } else {
                    StockStatus::InStock
                };
                prop_assert_eq!(first, expected);
            }
        }
    }
}
