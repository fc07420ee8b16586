//! HTTP client for the inventory endpoints of the backend.
//!
//! The backend is the system of record. Requests are sent once (no retries);
//! a failure leaves the caller's state as it was.

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use stockdesk_core::ProductId;
use stockdesk_inventory::{Product, StockAdjustmentRequest, StockThresholds};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::inflight::{AdjustmentTarget, InFlight};
use crate::session::{Session, sign_request};
use crate::types::{
    InventoryPage, InventoryQuery, StockUpdate, StockUpdateData, decode_envelope, error_message,
};

#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
    thresholds: StockThresholds,
    page_size: u32,
    in_flight: InFlight,
}

impl InventoryClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session,
            thresholds: config.thresholds,
            page_size: config.page_size,
            in_flight: InFlight::new(),
        })
    }

    /// Build a client from a config, seeding the session with its token.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let session = match &config.auth_token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        };
        Self::new(config, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn thresholds(&self) -> &StockThresholds {
        &self.thresholds
    }

    /// First-page query using the configured page size.
    pub fn default_query(&self) -> InventoryQuery {
        InventoryQuery::new(self.page_size)
    }

    /// `GET /inventory`.
    #[instrument(skip(self), fields(page = query.page, limit = query.limit))]
    pub async fn list_inventory(&self, query: &InventoryQuery) -> Result<InventoryPage, ClientError> {
        let url = self.endpoint(&["inventory"])?;
        let (page, _): (InventoryPage, _) = self
            .execute(self.http.get(url).query(query), "inventory")
            .await?;

        for product in &page.products {
            product
                .validate()
                .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        }

        debug!(
            "Fetched {} products (page {}/{})",
            page.products.len(),
            page.pagination.page,
            page.pagination.total_pages
        );
        Ok(page)
    }

    /// `GET /product/admin/{productId}`.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError> {
        let url = self.endpoint(&["product", "admin", id.as_str()])?;
        let what = format!("product {id}");
        let (product, _): (Product, _) = self.execute(self.http.get(url), &what).await?;

        if &product.id != id {
            return Err(ClientError::MalformedResponse(format!(
                "requested product {id} but received {}",
                product.id
            )));
        }
        product
            .validate()
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        Ok(product)
    }

    /// `POST /inventory/update-stock`, checked locally against `current`.
    ///
    /// An invalid quantity or a removal larger than `current` is rejected
    /// before any request is made.
    pub async fn update_stock(
        &self,
        request: &StockAdjustmentRequest,
        current: u64,
    ) -> Result<StockUpdate, ClientError> {
        let projected = request.check_against(current)?;
        debug!(current, projected, "Adjustment passed local checks");
        self.send_adjustment(request).await
    }

    /// Like [`update_stock`](Self::update_stock), resolving the current
    /// quantity of the target (variant or product-level) from `product`.
    pub async fn adjust(
        &self,
        product: &Product,
        request: &StockAdjustmentRequest,
    ) -> Result<StockUpdate, ClientError> {
        let projected = request.check_against_product(product)?;
        debug!(projected, "Adjustment passed local checks");
        self.send_adjustment(request).await
    }

    /// Adjust, then refetch the product so the caller renders the backend's
    /// value rather than the locally projected one.
    pub async fn adjust_and_refresh(
        &self,
        product: &Product,
        request: &StockAdjustmentRequest,
    ) -> Result<(StockUpdate, Product), ClientError> {
        let update = self.adjust(product, request).await?;
        let refreshed = self.get_product(&request.product_id).await?;
        Ok((update, refreshed))
    }

    #[instrument(
        skip(self, request),
        fields(product_id = %request.product_id, kind = %request.kind, quantity = request.quantity)
    )]
    async fn send_adjustment(&self, request: &StockAdjustmentRequest) -> Result<StockUpdate, ClientError> {
        let target = AdjustmentTarget::of(request);
        let _guard = self
            .in_flight
            .try_acquire(target.clone())
            .ok_or(ClientError::InFlight(target))?;

        let url = self.endpoint(&["inventory", "update-stock"])?;
        let what = format!("product {}", request.product_id);
        let (data, message): (StockUpdateData, _) = self
            .execute(self.http.post(url).json(request), &what)
            .await?;

        if data.product.id != request.product_id {
            return Err(ClientError::MalformedResponse(format!(
                "adjusted product {} but response describes {}",
                request.product_id, data.product.id
            )));
        }
        if let (Some(sku), Some(variant)) = (&request.variant_sku, &data.product.variant) {
            if &variant.sku != sku {
                return Err(ClientError::MalformedResponse(format!(
                    "adjusted variant {sku} but response describes {}",
                    variant.sku
                )));
            }
        }

        let update = StockUpdate {
            product: data.product,
            tracking: data.tracking,
            message,
        };
        info!(
            confirmed_stock = update.confirmed_stock(),
            "Stock adjustment confirmed by backend"
        );
        Ok(update)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Network(format!("cannot build a URL from {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sign, send and decode one request. `what` names the resource for
    /// not-found errors.
    async fn execute<T>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<(T, Option<String>), ClientError>
    where
        T: DeserializeOwned,
    {
        let resp = sign_request(request, &self.session)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend rejected credentials; clearing session");
            self.session.clear();
            return Err(ClientError::Unauthorized);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                what: what.to_string(),
                message: error_message(&body),
            });
        }

        if !status.is_success() {
            let message = error_message(&body);
            warn!(status = status.as_u16(), message = ?message, "Backend request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        decode_envelope(status.as_u16(), &body)
    }
}
