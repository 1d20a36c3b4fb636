// core/src/api/backend.rs

//! The checkout engine's view of the backend API.
//!
//! The backend's internal behavior is opaque and assumed correct; this
//! trait is the narrow contract the checkout subsystem depends on, and
//! what tests replace with a scripted mock.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use crate::error::Result;
use crate::models::{CouponCheck, CreatedOrder, DraftOrder, OrderListItem, PaymentOutcome, PaymentRequest};

use super::client::ApiClient;

#[async_trait]
pub trait CheckoutBackend: Send + Sync {
  /// Asks the pricing authority whether `code` is currently redeemable
  /// against `subtotal_cents`. Stateless; mutates nothing.
  async fn validate_coupon(&self, code: &str, subtotal_cents: i64) -> Result<CouponCheck>;

  /// Converts a draft into a durable order with server-computed totals.
  async fn create_order(&self, draft: &DraftOrder) -> Result<CreatedOrder>;

  /// Cancels a previously created, unpaid order.
  async fn cancel_order(&self, order_number: &str) -> Result<CreatedOrder>;

  /// Submits one tokenized charge attempt against a created order.
  async fn process_card_payment(&self, request: &PaymentRequest) -> Result<PaymentOutcome>;

  /// The authenticated shopper's order history. 401 when unauthenticated.
  async fn my_orders(&self) -> Result<Vec<OrderListItem>>;

  /// Detail of one prior order. 401 when unauthenticated.
  async fn order_detail(&self, order_number: &str) -> Result<CreatedOrder>;
}

/// Production backend speaking JSON over HTTP via [`ApiClient`].
#[derive(Debug)]
pub struct HttpBackend {
  client: Arc<ApiClient>,
}

impl HttpBackend {
  pub fn new(client: Arc<ApiClient>) -> Self {
    HttpBackend { client }
  }
}

#[async_trait]
impl CheckoutBackend for HttpBackend {
  #[instrument(skip(self))]
  async fn validate_coupon(&self, code: &str, subtotal_cents: i64) -> Result<CouponCheck> {
    let body = json!({ "code": code, "subtotal_cents": subtotal_cents });
    self.client.post("/coupons/validate/", &body, true).await
  }

  #[instrument(skip(self, draft), fields(items = draft.items.len()))]
  async fn create_order(&self, draft: &DraftOrder) -> Result<CreatedOrder> {
    self.client.post("/orders/create/", draft, true).await
  }

  #[instrument(skip(self))]
  async fn cancel_order(&self, order_number: &str) -> Result<CreatedOrder> {
    self.client.post(&format!("/orders/{order_number}/cancel/"), &json!({}), true).await
  }

  #[instrument(skip(self, request), fields(order_id = request.order_id))]
  async fn process_card_payment(&self, request: &PaymentRequest) -> Result<PaymentOutcome> {
    self.client.post("/payments/process-card/", request, true).await
  }

  #[instrument(skip(self))]
  async fn my_orders(&self) -> Result<Vec<OrderListItem>> {
    self.client.get("/orders/", true).await
  }

  #[instrument(skip(self))]
  async fn order_detail(&self, order_number: &str) -> Result<CreatedOrder> {
    self.client.get(&format!("/orders/{order_number}/"), true).await
  }
}
