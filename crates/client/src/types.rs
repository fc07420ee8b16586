//! Wire types exchanged with the backend REST API.
//!
//! Every response is decoded into one of these types before it reaches the
//! rest of the client; a body that does not fit is a
//! [`ClientError::MalformedResponse`], never a silently defaulted value.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use stockdesk_core::{ProductId, Sku, find_by_id};
use stockdesk_inventory::{AdjustmentType, InventorySort, Product, StockFilter};

use crate::error::ClientError;

/// Standard response wrapper: `{ success, data?, message? }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shape; some endpoints use `error` instead of `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Extract a human readable message from an error body, if it has one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
}

/// Decode a 2xx body into the payload of its envelope.
///
/// Returns the payload and the optional backend message.
pub fn decode_envelope<T>(status: u16, body: &str) -> Result<(T, Option<String>), ClientError>
where
    T: DeserializeOwned,
{
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

    if !envelope.success {
        return Err(ClientError::Api {
            status,
            message: envelope
                .message
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
        });
    }

    match envelope.data {
        Some(data) => Ok((data, envelope.message)),
        None => Err(ClientError::MalformedResponse(
            "successful response without `data`".to_string(),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// `data` of `GET /inventory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

impl InventoryPage {
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        find_by_id(&self.products, id)
    }
}

/// Query string of `GET /inventory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub stock_filter: StockFilter,
    pub sort: InventorySort,
}

impl InventoryQuery {
    /// First page with the given page size.
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: None,
            stock_filter: StockFilter::All,
            sort: InventorySort::default(),
        }
    }

    /// Pages are 1-based; 0 is clamped to 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self
    }

    pub fn stock_filter(mut self, filter: StockFilter) -> Self {
        self.stock_filter = filter;
        self
    }

    pub fn sort(mut self, sort: InventorySort) -> Self {
        self.sort = sort;
        self
    }
}

/// Variant as echoed back by `POST /inventory/update-stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedVariant {
    pub sku: Sku,
    pub stock_quantity: u64,
}

/// Product summary echoed back by `POST /inventory/update-stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProduct {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub total_stock: u64,
    #[serde(default)]
    pub variant: Option<UpdatedVariant>,
}

/// Audit record the backend writes for every adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTracking {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<AdjustmentType>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub previous_stock: Option<u64>,
    #[serde(default)]
    pub new_stock: Option<u64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `data` of `POST /inventory/update-stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdateData {
    pub product: UpdatedProduct,
    #[serde(default)]
    pub tracking: Option<StockTracking>,
}

/// Outcome of a confirmed stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    pub product: UpdatedProduct,
    pub tracking: Option<StockTracking>,
    pub message: Option<String>,
}

impl StockUpdate {
    /// Stock of the adjusted target as reported by the backend.
    pub fn confirmed_stock(&self) -> u64 {
        self.product
            .variant
            .as_ref()
            .map(|v| v.stock_quantity)
            .unwrap_or(self.product.total_stock)
    }
}
