//! Guard against re-submitting an adjustment that is still pending.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use stockdesk_core::{ProductId, Sku};
use stockdesk_inventory::StockAdjustmentRequest;

/// What an adjustment changes: one variant, or the product-level stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdjustmentTarget {
    pub product_id: ProductId,
    pub sku: Option<Sku>,
}

impl AdjustmentTarget {
    pub fn new(product_id: ProductId, sku: Option<Sku>) -> Self {
        Self { product_id, sku }
    }

    pub fn of(request: &StockAdjustmentRequest) -> Self {
        Self::new(request.product_id.clone(), request.variant_sku.clone())
    }
}

impl fmt::Display for AdjustmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sku {
            Some(sku) => write!(f, "product {} (SKU {})", self.product_id, sku),
            None => write!(f, "product {}", self.product_id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    targets: Arc<Mutex<HashSet<AdjustmentTarget>>>,
}

/// Releases its target when dropped (completion or cancellation).
#[derive(Debug)]
pub struct InFlightGuard {
    targets: Arc<Mutex<HashSet<AdjustmentTarget>>>,
    target: AdjustmentTarget,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `target`; `None` when it is already claimed.
    pub fn try_acquire(&self, target: AdjustmentTarget) -> Option<InFlightGuard> {
        let mut targets = self.targets.lock().unwrap_or_else(|p| p.into_inner());
        if !targets.insert(target.clone()) {
            return None;
        }
        Some(InFlightGuard {
            targets: Arc::clone(&self.targets),
            target,
        })
    }

    pub fn is_pending(&self, target: &AdjustmentTarget) -> bool {
        self.targets
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .contains(target)
    }
}

impl InFlightGuard {
    pub fn target(&self) -> &AdjustmentTarget {
        &self.target
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut targets = self.targets.lock().unwrap_or_else(|p| p.into_inner());
        targets.remove(&self.target);
    }
}
